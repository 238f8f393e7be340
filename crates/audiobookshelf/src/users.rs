use serde_json::{Map, Value};

use crate::client::AbsClient;
use crate::models::{User, UsersResponse};

impl AbsClient {
    /// List all users (requires an admin token)
    /// GET /api/users
    pub async fn get_users(&self) -> crate::Result<Vec<User>> {
        let response: UsersResponse = self.get_json("/api/users", &[]).await?;
        Ok(response.users)
    }

    /// The user owning the token
    /// GET /api/me
    pub async fn get_current_user(&self) -> crate::Result<User> {
        self.get_json("/api/me", &[]).await
    }

    /// Listening statistics of the current user
    /// GET /api/me/listening-stats
    pub async fn get_listening_stats(&self) -> crate::Result<Map<String, Value>> {
        self.get_json("/api/me/listening-stats", &[]).await
    }

    /// Recent listening sessions of the current user.
    ///
    /// Extracted from the `recentSessions` array of the listening stats;
    /// empty when the server omits it.
    pub async fn get_media_progress(&self) -> crate::Result<Vec<Value>> {
        let mut stats = self.get_listening_stats().await?;
        match stats.remove("recentSessions") {
            Some(Value::Array(sessions)) => Ok(sessions),
            _ => Ok(Vec::new()),
        }
    }
}
