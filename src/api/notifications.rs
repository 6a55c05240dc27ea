//! Notification Endpoints

use super::{ApiClient, ApiResult};
use crate::models::Notification;

pub async fn list_notifications(client: &ApiClient) -> ApiResult<Vec<Notification>> {
    client.get("/notifications").await
}

pub async fn mark_read(client: &ApiClient, id: &str) -> ApiResult<()> {
    client
        .put::<_, Option<serde_json::Value>>(&format!("/notifications/{}/read", id), &serde_json::json!({}))
        .await
        .map(|_| ())
}

pub async fn mark_all_read(client: &ApiClient) -> ApiResult<()> {
    client
        .put::<_, Option<serde_json::Value>>("/notifications/read-all", &serde_json::json!({}))
        .await
        .map(|_| ())
}
