use crate::client::EmbyClient;
use crate::models::SystemInfo;

impl EmbyClient {
    /// Get server information
    /// GET /System/Info
    pub async fn get_system_info(&self) -> crate::Result<SystemInfo> {
        self.get_json("/System/Info", &[]).await
    }
}
