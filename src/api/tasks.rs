//! Task Board Endpoints
//!
//! Lists travel with their cards; saving a list saves its card sequence.

use serde::Serialize;

use super::{ApiClient, ApiResult};
use crate::board;
use crate::models::{List, ListId};

#[derive(Serialize)]
struct ListOrderArgs<'a> {
    ids: Vec<&'a str>,
}

/// Fetch all lists, rejecting a board with duplicate card ids
pub async fn fetch_lists(client: &ApiClient) -> ApiResult<Vec<List>> {
    client.get_checked("/tasks/lists", board::from_lists).await
}

pub async fn create_list(client: &ApiClient, list: &List) -> ApiResult<List> {
    client.post("/tasks/lists", list).await
}

pub async fn save_list(client: &ApiClient, list: &List) -> ApiResult<List> {
    client.put(&format!("/tasks/lists/{}", list.id), list).await
}

pub async fn delete_list(client: &ApiClient, list_id: &ListId) -> ApiResult<()> {
    client.delete(&format!("/tasks/lists/{}", list_id)).await
}

/// Persist the display order of lists
pub async fn save_list_order(client: &ApiClient, lists: &[List]) -> ApiResult<()> {
    let args = ListOrderArgs { ids: lists.iter().map(|l| l.id.as_str()).collect() };
    client
        .put::<_, Option<serde_json::Value>>("/tasks/lists/order", &args)
        .await
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::{decode_envelope, validated};
    use crate::api::ApiError;

    #[test]
    fn test_board_with_duplicate_card_ids_is_a_decode_failure() {
        let body = r#"{"data":[
            {"id":"a","name":"待办","owner":"u1","members":["u1"],"cards":[{"id":"c1","title":"one"}]},
            {"id":"b","name":"完成","owner":"u1","members":["u1"],"cards":[{"id":"c1","title":"again"}]}
        ]}"#;
        let err = validated(decode_envelope::<Vec<List>>(body), board::from_lists).unwrap_err();
        assert!(matches!(err, ApiError::Decode(ref m) if m.contains("c1")));
        assert_eq!(err.toast_message(), "响应数据格式错误");
    }
}
