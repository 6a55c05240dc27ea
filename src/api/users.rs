//! User Administration Endpoints

use super::{ApiClient, ApiResult};
use crate::models::{User, UserRef};

pub async fn list_users(client: &ApiClient) -> ApiResult<Vec<User>> {
    client.get("/users").await
}

pub async fn delete_user(client: &ApiClient, id: &str) -> ApiResult<()> {
    client.delete(&format!("/users/{}", id)).await
}

impl From<&User> for UserRef {
    fn from(user: &User) -> Self {
        UserRef { id: user.id.clone(), name: user.name.clone() }
    }
}
