use crate::client::AbsClient;
use crate::models::ServerStatus;

impl AbsClient {
    /// Get server status
    /// GET /status
    pub async fn get_server_status(&self) -> crate::Result<ServerStatus> {
        self.get_json("/status", &[]).await
    }
}
