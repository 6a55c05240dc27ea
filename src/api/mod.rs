//! REST API
//!
//! Data-access functions per feature, all going through `ApiClient`.

mod client;
mod error;

pub mod auth;
pub mod messages;
pub mod notifications;
pub mod profile;
pub mod tasks;
pub mod users;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
