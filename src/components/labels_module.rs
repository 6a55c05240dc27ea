//! Labels Module Component

use leptos::prelude::*;

use crate::card::labels::{add_label, remove_label, LABEL_COLORS};
use crate::card::CardChange;
use crate::models::Label;

#[component]
pub fn LabelsModule(labels: Signal<Vec<Label>>, on_change: Callback<CardChange>) -> impl IntoView {
    let (new_text, set_new_text) = signal(String::new());
    let (color, set_color) = signal(LABEL_COLORS[0].0.to_string());

    let add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if let Some(change) = add_label(&labels.get_untracked(), &new_text.get_untracked(), &color.get_untracked()) {
            on_change.run(change);
            set_new_text.set(String::new());
        }
    };

    view! {
        <section class="card-module labels-module">
            <h4>"标签"</h4>
            <div class="label-chips">
                {move || labels.get().into_iter().map(|label| {
                    let text = label.text.clone();
                    view! {
                        <span class="label-chip" style=format!("background-color: {}", label.color)>
                            {label.text}
                            <button
                                class="label-remove-btn"
                                on:click=move |_| {
                                    if let Some(change) = remove_label(&labels.get_untracked(), &text) {
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
            <form class="label-add-form" on:submit=add>
                <input
                    type="text"
                    placeholder="标签名称"
                    prop:value=move || new_text.get()
                    on:input=move |ev| set_new_text.set(event_target_value(&ev))
                />
                <div class="color-swatches">
                    {LABEL_COLORS.iter().map(|(hex, name)| {
                        let hex = hex.to_string();
                        let value = hex.clone();
                        let selected = hex.clone();
                        view! {
                            <button
                                type="button"
                                class="color-swatch"
                                class:selected=move || color.get() == selected
                                title=*name
                                style=format!("background-color: {}", hex)
                                on:click=move |_| set_color.set(value.clone())
                            />
                        }
                    }).collect_view()}
                </div>
                <button type="submit">"+"</button>
            </form>
        </section>
    }
}
