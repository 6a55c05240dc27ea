//! Auth Endpoints

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiResult};
use crate::models::User;

#[derive(Serialize)]
pub struct LoginArgs<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct RegisterArgs<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

pub async fn login(client: &ApiClient, args: &LoginArgs<'_>) -> ApiResult<LoginResponse> {
    client.post("/auth/login", args).await
}

pub async fn register(client: &ApiClient, args: &RegisterArgs<'_>) -> ApiResult<User> {
    client.post("/auth/register", args).await
}

pub async fn logout(client: &ApiClient) -> ApiResult<()> {
    client
        .post::<_, Option<serde_json::Value>>("/auth/logout", &serde_json::json!({}))
        .await
        .map(|_| ())
}
