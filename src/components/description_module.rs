//! Description Module Component
//!
//! Markdown source editor with a rendered preview.

use leptos::prelude::*;

use crate::card::description::set_description;
use crate::card::CardChange;
use crate::markdown::render_description;

#[component]
pub fn DescriptionModule(text: Signal<String>, on_change: Callback<CardChange>) -> impl IntoView {
    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(String::new());

    let start_edit = move |_| {
        set_draft.set(text.get_untracked());
        set_editing.set(true);
    };

    let commit = move |_| {
        if let Some(change) = set_description(&text.get_untracked(), &draft.get_untracked()) {
            on_change.run(change);
        }
        set_editing.set(false);
    };

    view! {
        <section class="card-module description-module">
            <h4>"描述"</h4>
            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <div class="description-preview" on:dblclick=start_edit>
                        {move || if text.with(|t| t.trim().is_empty()) {
                            view! { <p class="empty-hint">"双击添加描述"</p> }.into_any()
                        } else {
                            view! { <div class="markdown-body" inner_html=move || render_description(&text.get()) /> }.into_any()
                        }}
                    </div>
                }
            >
                <textarea
                    class="description-input"
                    rows="8"
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                />
                <div class="module-actions">
                    <button on:click=commit>"完成"</button>
                    <button on:click=move |_| set_editing.set(false)>"取消"</button>
                </div>
            </Show>
        </section>
    }
}
