//! Chat Panel
//!
//! Direct messages with one peer at a time. History comes over REST;
//! live messages arrive through the realtime channel into the shared inbox.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::messages::{self, SendMessageArgs};
use crate::context::use_app_context;
use crate::models::ChatMessage;
use crate::realtime::{conversation, merge_messages};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ChatPanel(inbox: RwSignal<Vec<ChatMessage>>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (peer, set_peer) = signal(None::<String>);
    let (draft, set_draft) = signal(String::new());

    let me = move || ctx.session.current().map(|s| s.user_id).unwrap_or_default();

    let peers = move || {
        let me = me();
        store.users().get().into_iter().filter(|u| u.id != me).collect::<Vec<_>>()
    };

    // Load history whenever the peer changes
    Effect::new(move |_| {
        let Some(peer_id) = peer.get() else { return };
        let api = ctx.api();
        spawn_local(async move {
            if let Ok(history) = messages::history(&api, &peer_id).await {
                inbox.update(|inbox| merge_messages(inbox, history));
            }
        });
    });

    let thread = move || {
        let me = me();
        let Some(peer_id) = peer.get() else { return Vec::new() };
        inbox.with(|inbox| conversation(inbox, &me, &peer_id).into_iter().cloned().collect::<Vec<_>>())
    };

    let send = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let content = draft.get_untracked().trim().to_string();
        let Some(to) = peer.get_untracked() else { return };
        if content.is_empty() {
            return;
        }
        let api = ctx.api();
        spawn_local(async move {
            let args = SendMessageArgs { to: &to, content: &content };
            if let Ok(sent) = messages::send_message(&api, &args).await {
                inbox.update(|inbox| merge_messages(inbox, [sent]));
                set_draft.set(String::new());
            }
        });
    };

    view! {
        <div class="chat-panel">
            <aside class="chat-peers">
                {move || peers().into_iter().map(|u| {
                    let id = u.id.clone();
                    let selected_id = u.id.clone();
                    view! {
                        <button
                            class="chat-peer"
                            class:active=move || peer.get().as_deref() == Some(selected_id.as_str())
                            on:click=move |_| set_peer.set(Some(id.clone()))
                        >
                            {u.name}
                        </button>
                    }
                }).collect_view()}
            </aside>
            <section class="chat-thread">
                <Show
                    when=move || peer.get().is_some()
                    fallback=|| view! { <p class="empty-hint">"选择联系人开始聊天"</p> }
                >
                    <ul class="chat-messages">
                        {move || {
                            let me = me();
                            thread().into_iter().map(|m| {
                                let mine = m.from == me;
                                view! {
                                    <li class="chat-message" class:mine=mine>
                                        <span class="chat-content">{m.content}</span>
                                        <span class="chat-time">
                                            {m.sent_at.with_timezone(&chrono::Local).format("%H:%M").to_string()}
                                        </span>
                                    </li>
                                }
                            }).collect_view()
                        }}
                    </ul>
                    <form class="chat-form" on:submit=send>
                        <input
                            type="text"
                            placeholder="输入消息..."
                            prop:value=move || draft.get()
                            on:input=move |ev| set_draft.set(event_target_value(&ev))
                        />
                        <button type="submit">"发送"</button>
                    </form>
                </Show>
            </section>
        </div>
    }
}
