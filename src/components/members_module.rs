//! Members Module Component
//!
//! Card assignees, picked from the known users.

use leptos::prelude::*;

use crate::card::members::{add_assignee, remove_assignee};
use crate::card::CardChange;
use crate::models::UserRef;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn MembersModule(assignees: Signal<Vec<UserRef>>, on_change: Callback<CardChange>) -> impl IntoView {
    let store = use_app_store();

    // Users not yet assigned
    let candidates = move || {
        let assigned = assignees.get();
        store
            .users()
            .get()
            .into_iter()
            .filter(|u| !assigned.iter().any(|a| a.id == u.id))
            .collect::<Vec<_>>()
    };

    let assign = move |ev: web_sys::Event| {
        let user_id = event_target_value(&ev);
        let user = store.users().with_untracked(|users| users.iter().find(|u| u.id == user_id).map(UserRef::from));
        if let Some(user) = user {
            if let Some(change) = add_assignee(&assignees.get_untracked(), &user) {
                on_change.run(change);
            }
        }
    };

    view! {
        <section class="card-module members-module">
            <h4>"成员"</h4>
            <div class="assignee-chips">
                {move || assignees.get().into_iter().map(|user| {
                    let user_id = user.id.clone();
                    view! {
                        <span class="assignee-chip">
                            {user.name}
                            <button
                                class="assignee-remove-btn"
                                on:click=move |_| {
                                    if let Some(change) = remove_assignee(&assignees.get_untracked(), &user_id) {
                                        on_change.run(change);
                                    }
                                }
                            >
                                "×"
                            </button>
                        </span>
                    }
                }).collect_view()}
            </div>
            <select class="assignee-picker" prop:value="" on:change=assign>
                <option value="">"指派成员..."</option>
                {move || candidates().into_iter().map(|u| view! { <option value=u.id.clone()>{u.name}</option> }).collect_view()}
            </select>
        </section>
    }
}
