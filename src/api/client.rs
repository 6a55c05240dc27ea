//! HTTP Client
//!
//! Shared client consumed by every data-access function.
//!
//! - request interceptor: attaches `Authorization: Bearer` to everything but
//!   login/registration, refusing protected calls without a valid session
//! - response interceptor: unwraps the `{ "data": ... }` envelope, reports
//!   failures through the debounced error toast, and sends auth failures to
//!   the sign-in route

use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::{ApiError, ApiResult};
use crate::config::AppConfig;
use crate::session::{self, Session, SessionContext};
use crate::toast::Toaster;

/// Endpoints callable without a session
const PUBLIC_PATHS: &[&str] = &["/auth/login", "/auth/register"];

pub fn requires_auth(path: &str) -> bool {
    !PUBLIC_PATHS.iter().any(|p| path == *p)
}

/// Decide the bearer token for a request
pub fn authorize(path: &str, session: Option<&Session>, now_secs: i64) -> ApiResult<Option<String>> {
    if !requires_auth(path) {
        return Ok(None);
    }
    match session {
        Some(s) if s.is_valid_at(now_secs) => Ok(Some(s.token.clone())),
        _ => Err(ApiError::Unauthenticated),
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Unwrap the `data` field; an empty body counts as `{}`
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let body = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str::<Envelope<T>>(body)
        .map(|e| e.data)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Run a post-decode check, folding its failure into `ApiError::Decode`
pub fn validated<T, U, E: std::fmt::Display>(result: ApiResult<T>, check: impl FnOnce(T) -> Result<U, E>) -> ApiResult<U> {
    result.and_then(|value| check(value).map_err(|e| ApiError::Decode(e.to_string())))
}

/// Best-effort server error text
pub fn extract_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "msg", "error"] {
            if let Some(msg) = json.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    body.to_string()
}

/// Sign-in redirect delay when a failed request ends the session.
/// Public endpoints never do: a 401 from login is a wrong password.
pub fn session_end_delay(path: &str, err: &ApiError) -> Option<u32> {
    (err.is_auth_failure() && requires_auth(path)).then_some(session::SIGN_IN_REDIRECT_DELAY_MS)
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
    timeout: Duration,
    session: SessionContext,
    toaster: Toaster,
}

impl ApiClient {
    pub fn new(config: &AppConfig, session: SessionContext, toaster: Toaster) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: config.api_base.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(config.request_timeout_ms),
            session,
            toaster,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(Method::GET, path, None).await
    }

    /// GET whose decoded body must also pass `check`; a rejected body is
    /// reported like any other failed request
    pub async fn get_checked<T, U, E>(&self, path: &str, check: impl FnOnce(T) -> Result<U, E>) -> ApiResult<U>
    where
        T: DeserializeOwned,
        E: std::fmt::Display,
    {
        let result = validated(self.execute(Method::GET, path, None).await, check);
        self.reported(path, result)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send::<Option<serde_json::Value>>(Method::DELETE, path, None).await.map(|_| ())
    }

    async fn send<T: DeserializeOwned>(&self, method: Method, path: &str, body: Option<serde_json::Value>) -> ApiResult<T> {
        let result = self.execute(method, path, body).await;
        self.reported(path, result)
    }

    fn reported<T>(&self, path: &str, result: ApiResult<T>) -> ApiResult<T> {
        if let Err(e) = &result {
            self.report(path, e);
        }
        result
    }

    async fn execute<T: DeserializeOwned>(&self, method: Method, path: &str, body: Option<serde_json::Value>) -> ApiResult<T> {
        let bearer = authorize(path, self.session.current_untracked().as_ref(), session::now_secs())?;

        tracing::debug!(%method, path, "request");
        let mut request = self.http.request(method, self.url(path)).timeout(self.timeout);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16(), message: extract_message(&text) });
        }
        decode_envelope(&text)
    }

    fn report(&self, path: &str, err: &ApiError) {
        tracing::warn!(path, error = %err, "request failed");
        self.toaster.error(err.toast_message());
        if let Some(delay_ms) = session_end_delay(path, err) {
            self.session.expire();
            session::redirect_to_sign_in(delay_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(exp: Option<i64>) -> Session {
        Session { token: "tok".into(), user_id: "u1".into(), name: "u1".into(), expires_at: exp }
    }

    #[test]
    fn test_public_paths_skip_auth() {
        assert!(!requires_auth("/auth/login"));
        assert!(!requires_auth("/auth/register"));
        assert!(requires_auth("/auth/logout"));
        assert!(requires_auth("/tasks/lists"));
        assert_eq!(authorize("/auth/login", None, 0).unwrap(), None);
    }

    #[test]
    fn test_protected_path_without_session() {
        let err = authorize("/tasks/lists", None, 0).unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
        assert!(err.is_auth_failure());
    }

    #[test]
    fn test_auth_failure_ends_session_after_delay() {
        let missing = authorize("/tasks/lists", None, 0).unwrap_err();
        assert_eq!(session_end_delay("/tasks/lists", &missing), Some(1000));

        let rejected = ApiError::Status { status: 401, message: "token expired".into() };
        assert_eq!(session_end_delay("/profile", &rejected), Some(1000));

        // Wrong password on login is not a lost session
        assert_eq!(session_end_delay("/auth/login", &rejected), None);
        let server = ApiError::Status { status: 500, message: String::new() };
        assert_eq!(session_end_delay("/tasks/lists", &server), None);
        assert_eq!(session_end_delay("/tasks/lists", &ApiError::Decode("bad".into())), None);
    }

    #[test]
    fn test_validated_folds_check_failure() {
        let ok: ApiResult<u32> = validated(Ok::<_, ApiError>(4), |n: u32| if n % 2 == 0 { Ok(n / 2) } else { Err("odd") });
        assert_eq!(ok.unwrap(), 2);

        let err = validated(Ok::<_, ApiError>(3), |n: u32| if n % 2 == 0 { Ok(n / 2) } else { Err("odd") }).unwrap_err();
        assert!(matches!(err, ApiError::Decode(ref m) if m == "odd"));

        let passthrough = validated(Err::<u32, _>(ApiError::Unauthenticated), |n: u32| Ok::<_, &str>(n)).unwrap_err();
        assert!(matches!(passthrough, ApiError::Unauthenticated));
    }

    #[test]
    fn test_expired_session_is_rejected() {
        let s = session(Some(100));
        assert!(matches!(authorize("/profile", Some(&s), 100), Err(ApiError::Unauthenticated)));
        assert_eq!(authorize("/profile", Some(&s), 99).unwrap(), Some("tok".to_string()));
        assert_eq!(authorize("/profile", Some(&session(None)), i64::MAX).unwrap(), Some("tok".to_string()));
    }

    #[test]
    fn test_decode_envelope() {
        let ids: Vec<u32> = decode_envelope(r#"{"data":[1,2,3],"code":0}"#).unwrap();
        assert_eq!(ids, vec![1, 2, 3]);

        let empty: Option<serde_json::Value> = decode_envelope("").unwrap();
        assert!(empty.is_none());

        assert!(matches!(decode_envelope::<Vec<u32>>(r#"{"items":[]}"#), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_extract_message() {
        assert_eq!(extract_message(r#"{"msg":"用户名已存在"}"#), "用户名已存在");
        assert_eq!(extract_message(r#"{"message":"bad"}"#), "bad");
        assert_eq!(extract_message("plain text"), "plain text");
    }

    #[test]
    fn test_status_error_toast_text() {
        let err = ApiError::Status { status: 500, message: "boom".into() };
        assert_eq!(err.toast_message(), "服务器错误(500)");
        assert!(!err.is_auth_failure());
        assert!(ApiError::Status { status: 401, message: String::new() }.is_auth_failure());
    }
}
