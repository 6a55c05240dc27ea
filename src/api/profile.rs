//! Profile Endpoints

use serde::Serialize;

use super::{ApiClient, ApiResult};
use crate::models::User;

#[derive(Serialize)]
pub struct ProfileArgs<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordArgs<'a> {
    pub old_password: &'a str,
    pub new_password: &'a str,
}

pub async fn get_profile(client: &ApiClient) -> ApiResult<User> {
    client.get("/profile").await
}

pub async fn update_profile(client: &ApiClient, args: &ProfileArgs<'_>) -> ApiResult<User> {
    client.put("/profile", args).await
}

pub async fn change_password(client: &ApiClient, args: &PasswordArgs<'_>) -> ApiResult<()> {
    client
        .put::<_, Option<serde_json::Value>>("/profile/password", args)
        .await
        .map(|_| ())
}
