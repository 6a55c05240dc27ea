//! New List Form Component
//!
//! Trailing board column for creating a list.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::tasks;
use crate::board;
use crate::context::use_app_context;
use crate::forms::ListForm;
use crate::models::List;
use crate::store::{store_apply, use_app_store};

#[component]
pub fn NewListForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (name, set_name) = signal(String::new());
    let (error, set_error) = signal(None::<String>);
    let (pending, set_pending) = signal(false);

    let create_list = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let name = match (ListForm { name: name.get_untracked() }).validate() {
            Ok(name) => name,
            Err(errors) => {
                set_error.set(errors.get("name").map(str::to_string));
                return;
            }
        };
        set_error.set(None);

        let Some(session) = ctx.session.current_untracked() else {
            tracing::warn!("create list without a session");
            return;
        };
        let draft = List::new(name, session.user_id);
        let api = ctx.api();
        set_pending.set(true);
        spawn_local(async move {
            // Server may assign its own id; keep whatever it returns
            if let Ok(created) = tasks::create_list(&api, &draft).await {
                match store_apply(&store, |lists| board::add_list(lists, created)) {
                    Ok(()) => {
                        tracing::info!("list created");
                        set_name.set(String::new());
                    }
                    Err(e) => tracing::warn!(error = %e, "created list rejected by board"),
                }
            }
            set_pending.set(false);
        });
    };

    view! {
        <form class="new-list-form" on:submit=create_list>
            <input
                type="text"
                placeholder="新建列表..."
                prop:value=move || name.get()
                on:input=move |ev| set_name.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || pending.get()>"+"</button>
            {move || error.get().map(|e| view! { <span class="field-error">{e}</span> })}
        </form>
    }
}
