//! Images Module Component

use leptos::prelude::*;

use crate::card::images::{add_image, remove_image, set_note};
use crate::card::CardChange;
use crate::models::ImageRef;

#[component]
pub fn ImagesModule(images: Signal<Vec<ImageRef>>, on_change: Callback<CardChange>) -> impl IntoView {
    let (new_url, set_new_url) = signal(String::new());

    let add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if let Some(change) = add_image(&images.get_untracked(), &new_url.get_untracked()) {
            on_change.run(change);
            set_new_url.set(String::new());
        }
    };

    view! {
        <section class="card-module images-module">
            <h4>"图片"</h4>
            <div class="image-grid">
                <For
                    each=move || images.get()
                    key=|img| (img.id.clone(), img.note.clone())
                    children=move |image| {
                        let note_id = image.id.clone();
                        let remove_id = image.id.clone();
                        view! {
                            <figure class="image-item">
                                <img src=image.url.clone() alt=image.note.clone() />
                                <figcaption>
                                    <input
                                        type="text"
                                        placeholder="备注"
                                        prop:value=image.note.clone()
                                        on:change=move |ev| {
                                            let note = event_target_value(&ev);
                                            if let Some(change) = set_note(&images.get_untracked(), &note_id, &note) {
                                                on_change.run(change);
                                            }
                                        }
                                    />
                                    <button
                                        class="image-remove-btn"
                                        on:click=move |_| {
                                            if let Some(change) = remove_image(&images.get_untracked(), &remove_id) {
                                                on_change.run(change);
                                            }
                                        }
                                    >
                                        "×"
                                    </button>
                                </figcaption>
                            </figure>
                        }
                    }
                />
            </div>
            <form class="image-add-form" on:submit=add>
                <input
                    type="url"
                    placeholder="图片地址"
                    prop:value=move || new_url.get()
                    on:input=move |ev| set_new_url.set(event_target_value(&ev))
                />
                <button type="submit">"+"</button>
            </form>
        </section>
    }
}
