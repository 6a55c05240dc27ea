//! Delete Confirm Button Component
//!
//! Two-step destructive action for lists, cards and users.

use leptos::prelude::*;

/// Inline confirmation: × first, then the prompt with ✓/✗.
///
/// Clicks never bubble, so the button can sit inside clickable cards and
/// draggable headers.
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(optional, into)] prompt: Option<String>,
) -> impl IntoView {
    let (armed, set_armed) = signal(false);
    let prompt = prompt.unwrap_or_else(|| "删除?".to_string());

    view! {
        <Show
            when=move || armed.get()
            fallback=move || {
                let button_class = button_class.clone();
                view! {
                    <button
                        class=button_class
                        on:click=move |ev| {
                            ev.stop_propagation();
                            set_armed.set(true);
                        }
                    >
                        "×"
                    </button>
                }
            }
        >
            <span class="delete-confirm">
                <span class="delete-confirm-text">{prompt.clone()}</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_armed.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_armed.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
