//! Session
//!
//! The signed-in user's token and identity, held in an explicit
//! `SessionContext` instead of global state. Initialized from the `token`
//! cookie at startup, torn down on logout or when the server rejects it.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use wasm_bindgen::JsCast;

use crate::models::UserId;

pub const TOKEN_COOKIE: &str = "token";
pub const SIGN_IN_ROUTE: &str = "/signin";
pub const SIGN_IN_REDIRECT_DELAY_MS: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("no session token")]
    Missing,
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("session token expired")]
    Expired,
}

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default, deserialize_with = "string_or_number")]
    sub: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    id: Option<String>,
    name: Option<String>,
    username: Option<String>,
    exp: Option<i64>,
}

/// Subject claims arrive as either `"7"` or `7` depending on the issuer
fn string_or_number<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    match Option::<serde_json::Value>::deserialize(de)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!("unsupported subject: {}", other))),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user_id: UserId,
    pub name: String,
    /// Unix seconds
    pub expires_at: Option<i64>,
}

impl Session {
    /// Decode a JWT payload (signature is the server's business)
    pub fn from_token(token: &str, now_secs: i64) -> Result<Self, SessionError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(SessionError::Missing);
        }
        let payload = token
            .split('.')
            .nth(1)
            .ok_or_else(|| SessionError::Malformed("expected three segments".into()))?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| SessionError::Malformed(e.to_string()))?;
        let claims: Claims = serde_json::from_slice(&bytes).map_err(|e| SessionError::Malformed(e.to_string()))?;

        let user_id = claims
            .sub
            .or(claims.id)
            .ok_or_else(|| SessionError::Malformed("missing subject".into()))?;
        let session = Session {
            token: token.to_string(),
            name: claims.name.or(claims.username).unwrap_or_else(|| user_id.clone()),
            user_id,
            expires_at: claims.exp,
        };
        if !session.is_valid_at(now_secs) {
            return Err(SessionError::Expired);
        }
        Ok(session)
    }

    pub fn from_cookies(cookies: &str, now_secs: i64) -> Result<Self, SessionError> {
        let token = cookie_value(cookies, TOKEN_COOKIE).ok_or(SessionError::Missing)?;
        Self::from_token(&token, now_secs)
    }

    pub fn is_valid_at(&self, now_secs: i64) -> bool {
        self.expires_at.map_or(true, |exp| exp > now_secs)
    }
}

/// Find a cookie in a `document.cookie` string and percent-decode it
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| percent_decode_str(value).decode_utf8_lossy().into_owned())
    })
}

pub fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

fn html_document() -> Option<web_sys::HtmlDocument> {
    web_sys::window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()
}

fn read_cookies() -> String {
    html_document().and_then(|d| d.cookie().ok()).unwrap_or_default()
}

fn write_token_cookie(token: &str) {
    if let Some(doc) = html_document() {
        let encoded = utf8_percent_encode(token, NON_ALPHANUMERIC);
        let _ = doc.set_cookie(&format!("{}={}; path=/; SameSite=Lax", TOKEN_COOKIE, encoded));
    }
}

fn clear_token_cookie() {
    if let Some(doc) = html_document() {
        let _ = doc.set_cookie(&format!("{}=; path=/; Max-Age=0", TOKEN_COOKIE));
    }
}

/// Navigate to the sign-in route after `delay_ms`
pub fn redirect_to_sign_in(delay_ms: u32) {
    tracing::info!(delay_ms, "redirecting to sign-in");
    Timeout::new(delay_ms, || {
        if let Some(win) = web_sys::window() {
            let _ = win.location().set_href(SIGN_IN_ROUTE);
        }
    })
    .forget();
}

/// Reactive holder for the current session
#[derive(Clone, Copy)]
pub struct SessionContext {
    session: RwSignal<Option<Session>>,
}

impl SessionContext {
    /// Restore the session from the token cookie, if present and valid
    pub fn init() -> Self {
        let session = match Session::from_cookies(&read_cookies(), now_secs()) {
            Ok(session) => {
                tracing::info!(user = %session.user_id, "session restored");
                Some(session)
            }
            Err(SessionError::Missing) => None,
            Err(e) => {
                tracing::warn!(error = %e, "discarding stored session");
                clear_token_cookie();
                None
            }
        };
        Self { session: RwSignal::new(session) }
    }

    pub fn current(&self) -> Option<Session> {
        self.session.get()
    }

    pub fn current_untracked(&self) -> Option<Session> {
        self.session.get_untracked()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.with(|s| s.is_some())
    }

    /// Adopt a freshly issued token and persist it in the cookie
    pub fn sign_in(&self, token: &str) -> Result<Session, SessionError> {
        let session = Session::from_token(token, now_secs())?;
        write_token_cookie(token);
        self.session.set(Some(session.clone()));
        Ok(session)
    }

    /// Drop the session (server rejected it or it expired)
    pub fn expire(&self) {
        clear_token_cookie();
        self.session.set(None);
    }

    /// User-initiated logout
    pub fn logout(&self) {
        tracing::info!("logout");
        self.expire();
        if let Some(win) = web_sys::window() {
            let _ = win.location().set_href(SIGN_IN_ROUTE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_token(claims: &str) -> String {
        format!("eyJhbGciOiJIUzI1NiJ9.{}.sig", URL_SAFE_NO_PAD.encode(claims))
    }

    #[test]
    fn test_from_token() {
        let token = make_token(r#"{"sub":"u42","name":"Lin","exp":2000}"#);
        let session = Session::from_token(&token, 1000).unwrap();
        assert_eq!(session.user_id, "u42");
        assert_eq!(session.name, "Lin");
        assert_eq!(session.expires_at, Some(2000));
        assert!(session.is_valid_at(1999));
        assert!(!session.is_valid_at(2000));
    }

    #[test]
    fn test_expired_token() {
        let token = make_token(r#"{"sub":"u42","exp":10}"#);
        assert_eq!(Session::from_token(&token, 11), Err(SessionError::Expired));
    }

    #[test]
    fn test_malformed_token() {
        assert!(matches!(Session::from_token("not-a-jwt", 0), Err(SessionError::Malformed(_))));
        assert_eq!(Session::from_token("", 0), Err(SessionError::Missing));
        let no_subject = make_token(r#"{"name":"x"}"#);
        assert!(matches!(Session::from_token(&no_subject, 0), Err(SessionError::Malformed(_))));
    }

    #[test]
    fn test_numeric_subject() {
        let token = make_token(r#"{"id":7,"username":"amy","exp":4000000000}"#);
        let session = Session::from_token(&token, 0).unwrap();
        assert_eq!(session.user_id, "7");
        assert_eq!(session.name, "amy");

        let token = make_token(r#"{"sub":12,"id":"ignored"}"#);
        assert_eq!(Session::from_token(&token, 0).unwrap().user_id, "12");

        let token = make_token(r#"{"sub":null,"id":3}"#);
        assert_eq!(Session::from_token(&token, 0).unwrap().user_id, "3");

        let token = make_token(r#"{"sub":true}"#);
        assert!(matches!(Session::from_token(&token, 0), Err(SessionError::Malformed(_))));
    }

    #[test]
    fn test_cookie_value_is_decoded() {
        let cookies = "theme=dark; token=abc%2Edef; lang=zh";
        assert_eq!(cookie_value(cookies, "token").as_deref(), Some("abc.def"));
        assert_eq!(cookie_value(cookies, "missing"), None);
    }

    #[test]
    fn test_from_cookies() {
        let token = make_token(r#"{"id":"7","username":"amy"}"#);
        let cookies = format!("a=1; token={}", token);
        let session = Session::from_cookies(&cookies, 0).unwrap();
        assert_eq!(session.user_id, "7");
        assert_eq!(session.name, "amy");
        assert_eq!(Session::from_cookies("a=1", 0), Err(SessionError::Missing));
    }
}
