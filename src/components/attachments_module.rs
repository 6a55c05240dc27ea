//! Attachments Module Component
//!
//! Files are chosen through a file input. Only name and size are read;
//! the blob reference is an object URL for download links.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::card::attachments::{add_attachment, format_size, remove_attachment, set_note};
use crate::card::{CardChange, CardEdit};
use crate::models::Attachment;

#[component]
pub fn AttachmentsModule(attachments: Signal<Vec<Attachment>>, on_change: Callback<CardChange>) -> impl IntoView {
    let on_files = move |ev: web_sys::Event| {
        let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
            return;
        };
        let Some(files) = input.files() else { return };

        let mut current = attachments.get_untracked();
        for i in 0..files.length() {
            let Some(file) = files.get(i) else { continue };
            let blob_ref = match web_sys::Url::create_object_url_with_blob(&file) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!(file = %file.name(), error = ?e, "object url failed");
                    continue;
                }
            };
            let change = add_attachment(&current, &file.name(), file.size() as u64, &blob_ref);
            if let CardEdit::Attachments(next) = &change.edit {
                current = next.clone();
            }
            on_change.run(change);
        }
        input.set_value("");
    };

    view! {
        <section class="card-module attachments-module">
            <h4>"附件"</h4>
            <ul class="attachment-list">
                <For
                    each=move || attachments.get()
                    key=|a| (a.id.clone(), a.note.clone())
                    children=move |attachment| {
                        let note_id = attachment.id.clone();
                        let remove_id = attachment.id.clone();
                        view! {
                            <li class="attachment-row">
                                <a href=attachment.blob_ref.clone() download=attachment.name.clone() target="_blank">
                                    {attachment.name.clone()}
                                </a>
                                <span class="attachment-size">{format_size(attachment.size)}</span>
                                <input
                                    type="text"
                                    class="attachment-note"
                                    placeholder="备注"
                                    prop:value=attachment.note.clone()
                                    on:change=move |ev| {
                                        let note = event_target_value(&ev);
                                        if let Some(change) = set_note(&attachments.get_untracked(), &note_id, &note) {
                                            on_change.run(change);
                                        }
                                    }
                                />
                                <button
                                    class="attachment-remove-btn"
                                    on:click=move |_| {
                                        if let Some(change) = remove_attachment(&attachments.get_untracked(), &remove_id) {
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
            <label class="file-picker">
                "上传附件"
                <input type="file" multiple=true on:change=on_files />
            </label>
        </section>
    }
}
