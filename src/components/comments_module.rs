//! Comments Module Component

use chrono::{Local, Utc};
use leptos::prelude::*;

use crate::card::comments::{add_comment, delete_comment};
use crate::card::CardChange;
use crate::models::Comment;

#[component]
pub fn CommentsModule(comments: Signal<Vec<Comment>>, on_change: Callback<CardChange>) -> impl IntoView {
    let (draft, set_draft) = signal(String::new());

    let post = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if let Some(change) = add_comment(&comments.get_untracked(), &draft.get_untracked(), Utc::now()) {
            on_change.run(change);
            set_draft.set(String::new());
        }
    };

    view! {
        <section class="card-module comments-module">
            <h4>{move || format!("评论 ({})", comments.with(Vec::len))}</h4>
            <ul class="comment-list">
                <For
                    each=move || comments.get()
                    key=|c| c.id.clone()
                    children=move |comment| {
                        let comment_id = comment.id.clone();
                        let when = comment.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string();
                        view! {
                            <li class="comment">
                                <div class="comment-meta">
                                    <span class="comment-author">{comment.author.clone()}</span>
                                    <span class="comment-time">{when}</span>
                                    <button
                                        class="comment-delete-btn"
                                        on:click=move |_| {
                                            if let Some(change) = delete_comment(&comments.get_untracked(), &comment_id) {
                                                on_change.run(change);
                                            }
                                        }
                                    >
                                        "×"
                                    </button>
                                </div>
                                <p class="comment-text">{comment.text.clone()}</p>
                            </li>
                        }
                    }
                />
            </ul>
            <form class="comment-form" on:submit=post>
                <textarea
                    rows="3"
                    placeholder="写评论..."
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                />
                <button type="submit">"发表"</button>
            </form>
        </section>
    }
}
