//! Toast Host Component

use leptos::prelude::*;

use crate::context::use_app_context;

/// Fixed stack of active toasts
#[component]
pub fn ToastHost() -> impl IntoView {
    let toaster = use_app_context().toaster;

    view! {
        <div class="toast-host">
            <For
                each=move || toaster.toasts.get()
                key=|t| t.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.class() on:click=move |_| toaster.dismiss(id)>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
