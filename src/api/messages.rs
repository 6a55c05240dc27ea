//! Chat Message Endpoints

use serde::Serialize;

use super::{ApiClient, ApiResult};
use crate::models::ChatMessage;

#[derive(Serialize)]
pub struct SendMessageArgs<'a> {
    pub to: &'a str,
    pub content: &'a str,
}

/// Conversation history with one peer, oldest first
pub async fn history(client: &ApiClient, peer_id: &str) -> ApiResult<Vec<ChatMessage>> {
    client.get(&format!("/messages/{}", peer_id)).await
}

pub async fn send_message(client: &ApiClient, args: &SendMessageArgs<'_>) -> ApiResult<ChatMessage> {
    client.post("/messages", args).await
}
