//! List Column Component
//!
//! One board list: header (rename, reorder, ownership, members, delete),
//! the card sequence with drop zones, and the add-card form.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{make_on_mouseleave, make_on_target_mouseenter, DropTarget};

use crate::api::tasks;
use crate::board;
use crate::components::board_view::BoardDnd;
use crate::components::card_tile::CardTile;
use crate::components::delete_confirm_button::DeleteConfirmButton;
use crate::components::drop_zone::DropZone;
use crate::context::use_app_context;
use crate::forms::{CardForm, FieldErrors, ListForm};
use crate::models::{Card, List, ListId, Priority};
use crate::store::{store_apply, use_app_store, AppStateStoreFields};

#[component]
pub fn ListColumn(list_id: ListId, dnd: BoardDnd) -> impl IntoView {
    let store = use_app_store();

    let list = {
        let list_id = list_id.clone();
        Memo::new(move |_| store.lists().with(|lists| lists.iter().find(|l| l.id == list_id).cloned()))
    };

    // (index, card id) pairs; zone `index` sits above the card
    let cards = move || {
        list.with(|l| {
            l.as_ref()
                .map(|l| l.cards.iter().map(|c| c.id.clone()).enumerate().collect::<Vec<_>>())
                .unwrap_or_default()
        })
    };
    let card_count = move || list.with(|l| l.as_ref().map(|l| l.cards.len()).unwrap_or(0));

    let header_target = DropTarget::Container(list_id.clone());
    let header_over = {
        let target = header_target.clone();
        move || dnd.drop_target().as_ref() == Some(&target)
    };

    let tail_list_id = list_id.clone();
    let zone_list_id = list_id.clone();
    let card_list_id = list_id.clone();

    view! {
        <div class="list-column">
            <div
                class=move || if header_over() { "list-header drop-target" } else { "list-header" }
                on:mouseenter=make_on_target_mouseenter(dnd, header_target.clone())
                on:mouseleave=make_on_mouseleave(dnd)
            >
                <ListHeader list_id=list_id.clone() />
            </div>
            <div class="list-cards">
                <For
                    each=cards
                    key=|(index, id)| (*index, id.clone())
                    children=move |(index, card_id)| {
                        view! {
                            <DropZone list_id=zone_list_id.clone() index=index dnd=dnd />
                            <CardTile card_id=card_id dnd=dnd />
                        }
                    }
                />
                {move || view! { <DropZone list_id=tail_list_id.clone() index=card_count() dnd=dnd /> }}
            </div>
            <AddCardForm list_id=card_list_id />
        </div>
    }
}

/// Name, owner and member controls
#[component]
fn ListHeader(list_id: ListId) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (editing, set_editing) = signal(false);
    let (name_value, set_name_value) = signal(String::new());
    let (name_error, set_name_error) = signal(None::<String>);
    let (show_members, set_show_members) = signal(false);

    let list_id = StoredValue::new(list_id);
    // Narrow reads so card edits in this list leave the header alone
    let name = Memo::new(move |_| {
        let id = list_id.get_value();
        store.lists().with(|lists| lists.iter().find(|l| l.id == id).map(|l| l.name.clone()).unwrap_or_default())
    });
    let card_count = Memo::new(move |_| {
        let id = list_id.get_value();
        store.lists().with(|lists| lists.iter().find(|l| l.id == id).map_or(0, |l| l.cards.len()))
    });
    let membership = Memo::new(move |_| {
        let id = list_id.get_value();
        store.lists().with(|lists| board::membership(lists, &id))
    });

    let user_name = move |id: &str| {
        store
            .users()
            .with(|users| users.iter().find(|u| u.id == id).map(|u| u.name.clone()))
            .unwrap_or_else(|| id.to_string())
    };

    // Apply a board op to this list and save it
    let apply = move |op: &dyn Fn(&[List]) -> board::BoardResult<Vec<List>>| {
        match store_apply(&store, op) {
            Ok(()) => ctx.sync_lists(store, vec![list_id.get_value()]),
            Err(e) => {
                tracing::warn!(list = %list_id.get_value(), error = %e, "list update rejected");
                ctx.toaster.error(e.to_string());
            }
        }
    };

    let save_name = move || {
        let form = ListForm { name: name_value.get_untracked() };
        match form.validate() {
            Ok(name) => {
                set_name_error.set(None);
                set_editing.set(false);
                let id = list_id.get_value();
                apply(&|lists| board::rename_list(lists, &id, &name));
            }
            Err(errors) => set_name_error.set(errors.get("name").map(str::to_string)),
        }
    };

    let move_by = move |offset: isize| {
        let id = list_id.get_value();
        let Some(current) = store.lists().with_untracked(|lists| lists.iter().position(|l| l.id == id)) else {
            return;
        };
        let Some(dest) = current.checked_add_signed(offset) else { return };
        if let Err(e) = store_apply(&store, |lists| board::move_list(lists, &id, dest)) {
            tracing::warn!(list = %id, error = %e, "list reorder rejected");
            return;
        }
        let lists = store.lists().get_untracked();
        let api = ctx.api();
        spawn_local(async move {
            if tasks::save_list_order(&api, &lists).await.is_ok() {
                tracing::debug!("list order saved");
            }
        });
    };

    let delete_list = move |_: ()| {
        let id = list_id.get_value();
        if let Err(e) = store_apply(&store, |lists| board::delete_list(lists, &id)) {
            tracing::warn!(list = %id, error = %e, "list delete rejected");
            return;
        }
        let api = ctx.api();
        spawn_local(async move {
            if tasks::delete_list(&api, &id).await.is_ok() {
                tracing::info!(list = %id, "list deleted");
            }
        });
    };

    move || {
        let Some(board::Membership { owner, members }) = membership.get() else {
            return ().into_any();
        };
        let owner_label = owner.clone();

        view! {
            <div class="list-title-row">
                {move || if editing.get() {
                    view! {
                        <form class="list-rename-form" on:submit=move |ev: web_sys::SubmitEvent| {
                            ev.prevent_default();
                            save_name();
                        }>
                            <input
                                type="text"
                                prop:value=move || name_value.get()
                                on:input=move |ev| set_name_value.set(event_target_value(&ev))
                                on:keydown=move |ev: web_sys::KeyboardEvent| {
                                    if ev.key() == "Escape" {
                                        set_editing.set(false);
                                        set_name_error.set(None);
                                    }
                                }
                            />
                            {move || name_error.get().map(|e| view! { <span class="field-error">{e}</span> })}
                        </form>
                    }.into_any()
                } else {
                    view! {
                        <h3
                            class="list-name"
                            on:dblclick=move |_| {
                                set_name_value.set(name.get_untracked());
                                set_editing.set(true);
                            }
                        >
                            {move || name.get()}
                            <span class="card-count">
                                {move || card_count.get()}
                            </span>
                        </h3>
                    }.into_any()
                }}
                <div class="list-actions">
                    <button class="list-move-btn" title="左移" on:click=move |_| move_by(-1)>"◀"</button>
                    <button class="list-move-btn" title="右移" on:click=move |_| move_by(1)>"▶"</button>
                    <button class="list-members-btn" title="成员" on:click=move |_| set_show_members.update(|v| *v = !*v)>
                        "👥"
                    </button>
                    <DeleteConfirmButton button_class="list-delete-btn" prompt="删除列表?" on_confirm=delete_list />
                </div>
            </div>
            <div class="list-owner">
                {move || format!("负责人: {}", user_name(&owner_label))}
            </div>
            <Show when=move || show_members.get()>
                <MemberEditor
                    owner=owner.clone()
                    members=members.clone()
                    on_transfer=Callback::new(move |user: String| {
                        let id = list_id.get_value();
                        apply(&|lists| board::transfer_owner(lists, &id, &user));
                    })
                    on_add=Callback::new(move |user: String| {
                        let id = list_id.get_value();
                        apply(&|lists| board::add_member(lists, &id, &user));
                    })
                    on_remove=Callback::new(move |user: String| {
                        let id = list_id.get_value();
                        apply(&|lists| board::remove_member(lists, &id, &user));
                    })
                />
            </Show>
        }
        .into_any()
    }
}

/// Owner transfer and member list for one list
#[component]
fn MemberEditor(
    owner: String,
    members: Vec<String>,
    on_transfer: Callback<String>,
    on_add: Callback<String>,
    on_remove: Callback<String>,
) -> impl IntoView {
    let store = use_app_store();
    let users = move || store.users().get();
    let name_of = move |id: &str| {
        store
            .users()
            .with(|users| users.iter().find(|u| u.id == id).map(|u| u.name.clone()))
            .unwrap_or_else(|| id.to_string())
    };

    let member_rows = members
        .iter()
        .map(|id| {
            let id = id.clone();
            let is_owner = id == owner;
            let remove_id = id.clone();
            view! {
                <li class="member-row">
                    <span>{name_of(&id)}</span>
                    {is_owner.then(|| view! { <span class="owner-badge">"负责人"</span> })}
                    {(!is_owner).then(|| view! {
                        <button class="member-remove-btn" on:click=move |_| on_remove.run(remove_id.clone())>"×"</button>
                    })}
                </li>
            }
        })
        .collect_view();

    let current_owner = owner.clone();
    view! {
        <div class="member-editor">
            <ul class="member-list">{member_rows}</ul>
            <label class="member-field">
                "转交给"
                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    if !value.is_empty() && value != current_owner {
                        on_transfer.run(value);
                    }
                }>
                    <option value="">"选择用户"</option>
                    {move || users().into_iter().map(|u| view! { <option value=u.id.clone()>{u.name}</option> }).collect_view()}
                </select>
            </label>
            <label class="member-field">
                "添加成员"
                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    if !value.is_empty() {
                        on_add.run(value);
                    }
                }>
                    <option value="">"选择用户"</option>
                    {move || users().into_iter().map(|u| view! { <option value=u.id.clone()>{u.name}</option> }).collect_view()}
                </select>
            </label>
        </div>
    }
}

/// Inline add-card form at the bottom of a column
#[component]
fn AddCardForm(list_id: ListId) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (open, set_open) = signal(false);
    let (title, set_title) = signal(String::new());
    let (priority, set_priority) = signal(Priority::default().as_str().to_string());
    let (due_date, set_due_date) = signal(String::new());
    let (errors, set_errors) = signal(FieldErrors::default());
    let list_id = StoredValue::new(list_id);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = CardForm {
            title: title.get_untracked(),
            priority: priority.get_untracked(),
            due_date: due_date.get_untracked(),
        };
        let valid = match form.validate() {
            Ok(v) => v,
            Err(e) => {
                set_errors.set(e);
                return;
            }
        };

        let mut card = Card::new(valid.title);
        card.priority = valid.priority;
        card.due_date = valid.due_date;
        let id = list_id.get_value();
        match store_apply(&store, |lists| board::add_card(lists, &id, card)) {
            Ok(()) => {
                set_errors.set(FieldErrors::default());
                set_title.set(String::new());
                set_due_date.set(String::new());
                set_open.set(false);
                ctx.sync_lists(store, vec![id]);
            }
            Err(e) => tracing::warn!(list = %id, error = %e, "add card rejected"),
        }
    };

    let field_error = move |field: &'static str| {
        move || errors.with(|e| e.get(field).map(|m| view! { <span class="field-error">{m.to_string()}</span> }))
    };

    view! {
        <Show
            when=move || open.get()
            fallback=move || view! {
                <button class="add-card-btn" on:click=move |_| set_open.set(true)>"+ 添加卡片"</button>
            }
        >
            <form class="add-card-form" on:submit=submit>
                <input
                    type="text"
                    placeholder="卡片标题"
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />
                {field_error("title")}
                <div class="add-card-row">
                    <select
                        prop:value=move || priority.get()
                        on:change=move |ev| set_priority.set(event_target_value(&ev))
                    >
                        {Priority::ALL.iter().map(|p| view! { <option value=p.as_str()>{p.label()}</option> }).collect_view()}
                    </select>
                    <input
                        type="date"
                        prop:value=move || due_date.get()
                        on:input=move |ev| set_due_date.set(event_target_value(&ev))
                    />
                </div>
                {field_error("priority")}
                {field_error("due_date")}
                <div class="add-card-row">
                    <button type="submit">"添加"</button>
                    <button type="button" on:click=move |_| {
                        set_open.set(false);
                        set_errors.set(FieldErrors::default());
                    }>"取消"</button>
                </div>
            </form>
        </Show>
    }
}
