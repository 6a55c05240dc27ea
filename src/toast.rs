//! Toast Notifications
//!
//! Centralized user-facing notifications. Error toasts are debounced with
//! a trailing window: a burst of failures shows only the last message.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

pub const ERROR_TOAST_DEBOUNCE_MS: u32 = 300;
pub const TOAST_LIFETIME_MS: u32 = 3000;

/// Message for an HTTP status code
pub fn status_message(status: u16) -> &'static str {
    match status {
        400 => "请求错误(400)",
        401 => "未授权，请重新登录(401)",
        403 => "拒绝访问(403)",
        404 => "请求出错(404)",
        408 => "请求超时(408)",
        500 => "服务器错误(500)",
        501 => "服务未实现(501)",
        502 => "网络错误(502)",
        503 => "服务不可用(503)",
        504 => "网络超时(504)",
        505 => "HTTP版本不受支持(505)",
        _ => "连接出错",
    }
}

pub const NETWORK_FAILURE_MESSAGE: &str = "网络连接失败";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast success",
            ToastKind::Info => "toast info",
            ToastKind::Error => "toast error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Trailing debounce for error messages.
///
/// Every `submit` supersedes the previous one; only the ticket of the last
/// submission yields a message when its timer fires.
#[derive(Debug, Default)]
pub struct ErrorDebouncer {
    generation: u64,
    pending: Option<String>,
}

impl ErrorDebouncer {
    pub fn submit(&mut self, message: String) -> u64 {
        self.generation += 1;
        self.pending = Some(message);
        self.generation
    }

    pub fn fire(&mut self, ticket: u64) -> Option<String> {
        if ticket == self.generation {
            self.pending.take()
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
struct ToasterState {
    debouncer: ErrorDebouncer,
    next_id: u64,
}

/// Toast queue shared through context
#[derive(Clone, Copy)]
pub struct Toaster {
    pub toasts: RwSignal<Vec<Toast>>,
    state: StoredValue<ToasterState>,
}

impl Toaster {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            state: StoredValue::new(ToasterState::default()),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message.into());
    }

    /// Debounced error toast
    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        let mut ticket = 0;
        self.state.update_value(|s| ticket = s.debouncer.submit(message));

        let this = *self;
        Timeout::new(ERROR_TOAST_DEBOUNCE_MS, move || {
            let mut ready = None;
            this.state.update_value(|s| ready = s.debouncer.fire(ticket));
            if let Some(message) = ready {
                this.push(ToastKind::Error, message);
            }
        })
        .forget();
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }

    fn push(&self, kind: ToastKind, message: String) {
        let mut id = 0;
        self.state.update_value(|s| {
            s.next_id += 1;
            id = s.next_id;
        });
        self.toasts.update(|list| list.push(Toast { id, kind, message }));

        let this = *self;
        Timeout::new(TOAST_LIFETIME_MS, move || this.dismiss(id)).forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_yields_single_message() {
        let mut debouncer = ErrorDebouncer::default();
        let tickets: Vec<u64> = ["请求超时(408)", "服务器错误(500)", "网络错误(502)"]
            .iter()
            .map(|m| debouncer.submit(m.to_string()))
            .collect();

        let shown: Vec<String> = tickets.into_iter().filter_map(|t| debouncer.fire(t)).collect();
        assert_eq!(shown, vec!["网络错误(502)".to_string()]);
    }

    #[test]
    fn test_separate_bursts_each_show() {
        let mut debouncer = ErrorDebouncer::default();
        let first = debouncer.submit("a".into());
        assert_eq!(debouncer.fire(first), Some("a".into()));
        // Firing twice does not duplicate
        assert_eq!(debouncer.fire(first), None);

        let second = debouncer.submit("b".into());
        assert_eq!(debouncer.fire(second), Some("b".into()));
    }

    #[test]
    fn test_status_message() {
        assert_eq!(status_message(404), "请求出错(404)");
        assert_eq!(status_message(401), "未授权，请重新登录(401)");
        assert_eq!(status_message(418), "连接出错");
    }
}
