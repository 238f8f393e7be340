use serde_json::{Map, Value};

use crate::client::EmbyClient;
use crate::models::User;

impl EmbyClient {
    /// List all users
    /// GET /Users
    pub async fn get_users(&self) -> crate::Result<Vec<User>> {
        self.get_json("/Users", &[]).await
    }

    /// The user the API key belongs to
    /// GET /Users/Me
    pub async fn get_current_user(&self) -> crate::Result<User> {
        self.get_json("/Users/Me", &[]).await
    }

    /// Items with playback data for one user
    /// GET /Users/{id}/Items
    pub async fn get_user_items(&self, user_id: &str) -> crate::Result<Map<String, Value>> {
        let path = format!("/Users/{}/Items", user_id);
        self.get_json(&path, &[]).await
    }
}
