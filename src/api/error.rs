//! Request layer errors

use thiserror::Error;

use crate::toast::{status_message, NETWORK_FAILURE_MESSAGE};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection failure, timeout, or body read error
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Protected endpoint called without a valid session
    #[error("not signed in")]
    Unauthenticated,

    /// Non-2xx response
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether this error should end the session
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthenticated | ApiError::Status { status: 401, .. })
    }

    /// Text for the error toast
    pub fn toast_message(&self) -> String {
        match self {
            ApiError::Transport(e) if e.is_timeout() => status_message(408).to_string(),
            ApiError::Transport(_) => NETWORK_FAILURE_MESSAGE.to_string(),
            ApiError::Unauthenticated => status_message(401).to_string(),
            ApiError::Status { status, .. } => status_message(*status).to_string(),
            ApiError::Decode(_) => "响应数据格式错误".to_string(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
