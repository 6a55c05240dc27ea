//! Card Detail Panel
//!
//! Side panel for the selected card. Header fields are edited here; every
//! other sub-field belongs to a module component. Modules report a
//! `CardChange`, which the panel applies to the card, writes to the store
//! and records in the change log. Nothing reaches the server until Save.

use leptos::prelude::*;

use crate::board;
use crate::card::{self, CardChange};
use crate::components::attachments_module::AttachmentsModule;
use crate::components::checklist_module::ChecklistModule;
use crate::components::comments_module::CommentsModule;
use crate::components::delete_confirm_button::DeleteConfirmButton;
use crate::components::description_module::DescriptionModule;
use crate::components::images_module::ImagesModule;
use crate::components::labels_module::LabelsModule;
use crate::components::members_module::MembersModule;
use crate::context::use_app_context;
use crate::forms::CARD_TITLE_MAX;
use crate::models::{Card, CardId, CardStatus, Priority};
use crate::store::{store_apply, store_delete_card, store_list_of, store_update_card, use_app_store, AppStateStoreFields};

/// Panel host; remounts the body whenever a different card is selected
#[component]
pub fn CardDetail() -> impl IntoView {
    let store = use_app_store();

    move || match store.selected_card().get() {
        Some(card_id) => view! { <CardPanel card_id=card_id /> }.into_any(),
        None => ().into_any(),
    }
}

#[component]
fn CardPanel(card_id: CardId) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let card_id = StoredValue::new(card_id);
    let card = Memo::new(move |_| {
        let id = card_id.get_value();
        store.lists().with(|lists| board::get_card(lists, &id).cloned())
    });

    let change_log = RwSignal::new(Vec::<String>::new());
    let dirty = RwSignal::new(false);

    let on_change = Callback::new(move |change: CardChange| {
        let Some(mut next) = card.get_untracked() else {
            return;
        };
        next.apply(change.edit);
        match store_update_card(&store, next) {
            Ok(()) => {
                tracing::debug!(card = %card_id.get_value(), summary = %change.summary, "card edited");
                change_log.update(|log| log.push(change.summary));
                dirty.set(true);
            }
            Err(e) => tracing::warn!(card = %card_id.get_value(), error = %e, "card edit dropped"),
        }
    });

    // Sub-field views handed to modules
    let description = card_field(card, |c| c.description.clone());
    let checklist = card_field(card, |c| c.checklist.clone());
    let labels = card_field(card, |c| c.labels.clone());
    let assignees = card_field(card, |c| c.assignees.clone());
    let attachments = card_field(card, |c| c.attachments.clone());
    let images = card_field(card, |c| c.images.clone());
    let comments = card_field(card, |c| c.comments.clone());

    let list_name = move || {
        card.track();
        store_list_of(&store, &card_id.get_value()).map(|l| l.name).unwrap_or_default()
    };

    let save = move |_| {
        let id = card_id.get_value();
        ctx.sync_card_list(store, &id);
        dirty.set(false);
        tracing::info!(card = %id, "card saved");
    };

    let duplicate = move |_| {
        let id = card_id.get_value();
        let mut copy_id = None;
        let result = store_apply(&store, |lists| {
            let (next, new_id) = board::duplicate_card(lists, &id)?;
            copy_id = Some(new_id);
            Ok(next)
        });
        match (result, copy_id) {
            (Ok(()), Some(copy_id)) => {
                ctx.sync_card_list(store, &copy_id);
                ctx.toaster.success("已复制卡片");
                store.selected_card().set(Some(copy_id));
            }
            (Err(e), _) => tracing::warn!(card = %id, error = %e, "duplicate rejected"),
            _ => {}
        }
    };

    let delete = move |_: ()| {
        let id = card_id.get_value();
        let Some(list) = store_list_of(&store, &id) else { return };
        match store_delete_card(&store, &id) {
            Ok(()) => {
                tracing::info!(card = %id, list = %list.id, "card deleted");
                ctx.sync_lists(store, vec![list.id]);
            }
            Err(e) => tracing::warn!(card = %id, error = %e, "delete rejected"),
        }
    };

    let close = move |_| store.selected_card().set(None);

    view! {
        <aside class="card-detail">
            <div class="card-detail-header">
                <span class="card-detail-list">{list_name}</span>
                <div class="card-detail-actions">
                    <button
                        class="save-btn"
                        class:dirty=move || dirty.get()
                        on:click=save
                    >
                        "保存"
                    </button>
                    <button class="duplicate-btn" on:click=duplicate>"复制"</button>
                    <DeleteConfirmButton button_class="card-delete-btn" on_confirm=delete />
                    <button class="close-btn" on:click=close>"关闭"</button>
                </div>
            </div>

            <CardHeaderFields card=card on_change=on_change />

            <DescriptionModule text=description on_change=on_change />
            <ChecklistModule items=checklist on_change=on_change />
            <LabelsModule labels=labels on_change=on_change />
            <MembersModule assignees=assignees on_change=on_change />
            <AttachmentsModule attachments=attachments on_change=on_change />
            <ImagesModule images=images on_change=on_change />
            <CommentsModule comments=comments on_change=on_change />

            <section class="change-log">
                <h4>"本次修改"</h4>
                <Show
                    when=move || change_log.with(|log| !log.is_empty())
                    fallback=|| view! { <p class="empty-hint">"暂无修改"</p> }
                >
                    <ul>
                        {move || change_log.get().into_iter().map(|entry| view! { <li>{entry}</li> }).collect_view()}
                    </ul>
                </Show>
            </section>
        </aside>
    }
}

/// Read-only view of one sub-field of the panel's card
fn card_field<T>(card: Memo<Option<Card>>, get: fn(&Card) -> T) -> Signal<T>
where
    T: Default + Clone + Send + Sync + 'static,
{
    Signal::derive(move || card.with(|c| c.as_ref().map(get).unwrap_or_default()))
}

/// Title, status, priority and due date
#[component]
fn CardHeaderFields(card: Memo<Option<Card>>, on_change: Callback<CardChange>) -> impl IntoView {
    let (title_value, set_title_value) = signal(String::new());
    let (title_error, set_title_error) = signal(None::<String>);

    // Refill the title box when the stored title changes
    let stored_title = Memo::new(move |_| card.with(|c| c.as_ref().map(|c| c.title.clone())));
    Effect::new(move |_| {
        if let Some(title) = stored_title.get() {
            set_title_value.set(title);
        }
    });

    let save_title = move || {
        let value = title_value.get_untracked();
        let title = value.trim();
        let current = stored_title.get_untracked().unwrap_or_default();
        if title == current {
            return;
        }
        if title.is_empty() {
            set_title_error.set(Some("请输入标题".to_string()));
        } else if title.chars().count() > CARD_TITLE_MAX {
            set_title_error.set(Some(format!("不能超过 {} 个字符", CARD_TITLE_MAX)));
        } else {
            set_title_error.set(None);
            on_change.run(card::set_title(title));
        }
    };

    let status = move || card.with(|c| c.as_ref().map(|c| c.status).unwrap_or_default());
    let priority = move || card.with(|c| c.as_ref().map(|c| c.priority).unwrap_or_default());
    let due_date = move || {
        card.with(|c| c.as_ref().and_then(|c| c.due_date).map(|d| d.format("%Y-%m-%d").to_string()))
            .unwrap_or_default()
    };

    view! {
        <div class="card-header-fields">
            <input
                class="card-title-input"
                type="text"
                prop:value=move || title_value.get()
                on:input=move |ev| set_title_value.set(event_target_value(&ev))
                on:blur=move |_| save_title()
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        save_title();
                    }
                }
            />
            {move || title_error.get().map(|e| view! { <span class="field-error">{e}</span> })}

            <div class="card-field-row">
                <label>
                    "状态"
                    <select
                        prop:value=move || status().as_str()
                        on:change=move |ev| {
                            if let Some(s) = CardStatus::parse(&event_target_value(&ev)) {
                                on_change.run(card::set_status(s));
                            }
                        }
                    >
                        {CardStatus::ALL.iter().map(|s| view! { <option value=s.as_str()>{s.label()}</option> }).collect_view()}
                    </select>
                </label>
                <label>
                    "优先级"
                    <select
                        prop:value=move || priority().as_str()
                        on:change=move |ev| {
                            if let Some(p) = Priority::parse(&event_target_value(&ev)) {
                                on_change.run(card::set_priority(p));
                            }
                        }
                    >
                        {Priority::ALL.iter().map(|p| view! { <option value=p.as_str()>{p.label()}</option> }).collect_view()}
                    </select>
                </label>
                <label>
                    "截止日期"
                    <input
                        type="date"
                        prop:value=due_date
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            let date = chrono::NaiveDate::parse_from_str(&value, "%Y-%m-%d").ok();
                            if value.is_empty() || date.is_some() {
                                on_change.run(card::set_due_date(date));
                            }
                        }
                    />
                </label>
            </div>
        </div>
    }
}
