//! Realtime Channel
//!
//! WebSocket keyed by user id carrying chat messages. Dropped connections
//! are retried a fixed number of times with a fixed delay; after that the
//! channel gives up and logs an error.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

use crate::config::AppConfig;
use crate::models::ChatMessage;

/// Fixed-delay, bounded reconnect schedule
#[derive(Debug, Clone, PartialEq)]
pub struct ReconnectPolicy {
    max_attempts: u32,
    delay_ms: u32,
    attempts: u32,
}

impl ReconnectPolicy {
    pub fn new(max_attempts: u32, delay_ms: u32) -> Self {
        Self { max_attempts, delay_ms, attempts: 0 }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.reconnect_attempts, config.reconnect_delay_ms)
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Connection established - start counting from zero again
    pub fn on_open(&mut self) {
        self.attempts = 0;
    }

    /// Delay before the next attempt, or None once the budget is spent
    pub fn next_delay(&mut self) -> Option<u32> {
        if self.attempts >= self.max_attempts {
            return None;
        }
        self.attempts += 1;
        Some(self.delay_ms)
    }
}

pub fn socket_url(ws_base: &str, user_id: &str) -> String {
    format!("{}/{}", ws_base.trim_end_matches('/'), user_id)
}

pub fn parse_frame(text: &str) -> Result<ChatMessage, serde_json::Error> {
    serde_json::from_str(text)
}

/// Fold messages into the inbox, skipping known ids, oldest first
pub fn merge_messages(inbox: &mut Vec<ChatMessage>, incoming: impl IntoIterator<Item = ChatMessage>) {
    for msg in incoming {
        if !inbox.iter().any(|m| m.id == msg.id) {
            inbox.push(msg);
        }
    }
    inbox.sort_by_key(|m| m.sent_at);
}

/// Messages exchanged between `me` and `peer`
pub fn conversation<'a>(inbox: &'a [ChatMessage], me: &str, peer: &str) -> Vec<&'a ChatMessage> {
    inbox
        .iter()
        .filter(|m| (m.from == me && m.to == peer) || (m.from == peer && m.to == me))
        .collect()
}

struct Channel {
    url: String,
    policy: RefCell<ReconnectPolicy>,
    on_message: Box<dyn Fn(ChatMessage)>,
}

/// Open the channel; `on_message` runs for every decoded chat frame
pub fn connect<F>(url: String, policy: ReconnectPolicy, on_message: F)
where
    F: Fn(ChatMessage) + 'static,
{
    let channel = Rc::new(Channel { url, policy: RefCell::new(policy), on_message: Box::new(on_message) });
    open(channel);
}

fn open(channel: Rc<Channel>) {
    let ws = match WebSocket::new(&channel.url) {
        Ok(ws) => ws,
        Err(e) => {
            tracing::warn!(url = %channel.url, error = ?e, "websocket construction failed");
            schedule_reconnect(channel);
            return;
        }
    };

    let on_open = {
        let channel = channel.clone();
        Closure::<dyn FnMut()>::new(move || {
            tracing::info!(url = %channel.url, "realtime channel open");
            channel.policy.borrow_mut().on_open();
        })
    };
    ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));
    on_open.forget();

    let on_message = {
        let channel = channel.clone();
        Closure::<dyn FnMut(MessageEvent)>::new(move |ev: MessageEvent| {
            let Some(text) = ev.data().as_string() else {
                tracing::debug!("ignoring non-text frame");
                return;
            };
            match parse_frame(&text) {
                Ok(msg) => (channel.on_message)(msg),
                Err(e) => tracing::warn!(error = %e, "undecodable chat frame"),
            }
        })
    };
    ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
    on_message.forget();

    let on_close = Closure::<dyn FnMut(CloseEvent)>::new(move |ev: CloseEvent| {
        tracing::warn!(code = ev.code(), "realtime channel closed");
        schedule_reconnect(channel.clone());
    });
    ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));
    on_close.forget();
}

fn schedule_reconnect(channel: Rc<Channel>) {
    let next = channel.policy.borrow_mut().next_delay();
    match next {
        Some(delay) => {
            let attempt = channel.policy.borrow().attempts();
            tracing::info!(attempt, delay_ms = delay, "reconnecting realtime channel");
            Timeout::new(delay, move || open(channel)).forget();
        }
        None => {
            let attempts = channel.policy.borrow().attempts();
            tracing::error!(url = %channel.url, attempts, "realtime channel gave up reconnecting");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_gives_up_after_budget() {
        let mut policy = ReconnectPolicy::new(3, 3000);
        assert_eq!(policy.next_delay(), Some(3000));
        assert_eq!(policy.next_delay(), Some(3000));
        assert_eq!(policy.next_delay(), Some(3000));
        assert_eq!(policy.next_delay(), None);
        assert_eq!(policy.attempts(), 3);
    }

    #[test]
    fn test_open_resets_attempts() {
        let mut policy = ReconnectPolicy::new(2, 10);
        policy.next_delay();
        policy.next_delay();
        policy.on_open();
        assert_eq!(policy.next_delay(), Some(10));
    }

    #[test]
    fn test_socket_url() {
        assert_eq!(socket_url("wss://chat.example.com/ws/", "u9"), "wss://chat.example.com/ws/u9");
    }

    fn message(id: &str, from: &str, to: &str, secs: i64) -> ChatMessage {
        ChatMessage {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            content: format!("msg {}", id),
            sent_at: chrono::DateTime::from_timestamp(secs, 0).unwrap(),
        }
    }

    #[test]
    fn test_merge_skips_duplicates_and_orders() {
        let mut inbox = vec![message("m2", "a", "b", 20)];
        merge_messages(&mut inbox, vec![message("m1", "b", "a", 10), message("m2", "a", "b", 20)]);
        let ids: Vec<&str> = inbox.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
    }

    #[test]
    fn test_conversation_filters_by_peer() {
        let inbox = vec![message("m1", "a", "b", 1), message("m2", "c", "a", 2), message("m3", "b", "a", 3)];
        let ids: Vec<&str> = conversation(&inbox, "a", "b").iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m3"]);
    }

    #[test]
    fn test_parse_frame() {
        let msg = parse_frame(r#"{"id":"m1","from":"u1","to":"u2","content":"hi","sent_at":"2024-01-02T03:04:05Z"}"#).unwrap();
        assert_eq!(msg.content, "hi");
        assert!(parse_frame("ping").is_err());
    }
}
