//! Checklist Module Component

use leptos::prelude::*;

use crate::card::checklist::{add_item, completion_percent, edit_item, remove_item, toggle_item};
use crate::card::CardChange;
use crate::models::ChecklistItem;

#[component]
pub fn ChecklistModule(items: Signal<Vec<ChecklistItem>>, on_change: Callback<CardChange>) -> impl IntoView {
    let (new_text, set_new_text) = signal(String::new());

    let percent = move || items.with(|items| completion_percent(items));

    let add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if let Some(change) = add_item(&items.get_untracked(), &new_text.get_untracked()) {
            on_change.run(change);
            set_new_text.set(String::new());
        }
    };

    view! {
        <section class="card-module checklist-module">
            <h4>"检查项"</h4>
            <div class="checklist-progress">
                <div class="progress-bar">
                    <div class="progress-fill" style=move || format!("width: {}%", percent())></div>
                </div>
                <span class="progress-text">{move || format!("{}%", percent())}</span>
            </div>
            <ul class="checklist">
                <For
                    each=move || items.get()
                    key=|item| (item.id.clone(), item.checked, item.text.clone())
                    children=move |item| {
                        let toggle_id = item.id.clone();
                        let edit_id = item.id.clone();
                        let remove_id = item.id.clone();
                        view! {
                            <li class="checklist-item" class:checked=item.checked>
                                <input
                                    type="checkbox"
                                    prop:checked=item.checked
                                    on:change=move |_| {
                                        if let Some(change) = toggle_item(&items.get_untracked(), &toggle_id) {
                                            on_change.run(change);
                                        }
                                    }
                                />
                                <input
                                    type="text"
                                    class="checklist-text"
                                    prop:value=item.text.clone()
                                    on:change=move |ev| {
                                        let text = event_target_value(&ev);
                                        if let Some(change) = edit_item(&items.get_untracked(), &edit_id, &text) {
                                            on_change.run(change);
                                        }
                                    }
                                />
                                <button
                                    class="checklist-remove-btn"
                                    on:click=move |_| {
                                        if let Some(change) = remove_item(&items.get_untracked(), &remove_id) {
                                            on_change.run(change);
                                        }
                                    }
                                >
                                    "×"
                                </button>
                            </li>
                        }
                    }
                />
            </ul>
            <form class="checklist-add-form" on:submit=add>
                <input
                    type="text"
                    placeholder="添加检查项..."
                    prop:value=move || new_text.get()
                    on:input=move |ev| set_new_text.set(event_target_value(&ev))
                />
                <button type="submit">"+"</button>
            </form>
        </section>
    }
}
