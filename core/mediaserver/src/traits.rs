use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    LibraryInfo, ListeningStats, MediaServerType, SearchResult, ServerInfo, UserInfo,
};

/// Operations every media server backend supports.
///
/// Implementations translate their native responses into the canonical
/// models of this crate. Once a value leaves an implementation nothing
/// downstream looks at which backend produced it.
#[async_trait]
pub trait MediaServer: Send + Sync {
    /// Backend tag, used as the key of aggregated result maps
    fn server_type(&self) -> MediaServerType;

    async fn get_server_info(&self) -> Result<ServerInfo>;

    async fn get_users(&self) -> Result<Vec<UserInfo>>;

    /// The user owning the configured credential
    async fn get_current_user(&self) -> Result<UserInfo>;

    /// All libraries with `item_count` filled by one count call per library.
    ///
    /// Counts are fetched sequentially; a failed count leaves 0.
    async fn get_libraries(&self) -> Result<Vec<LibraryInfo>>;

    async fn get_library_items_count(&self, library_id: &str) -> Result<u64>;

    /// Search every library of the backend
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;

    /// Listening/watching statistics of the current user
    async fn get_listening_stats(&self) -> Result<ListeningStats>;

    /// Resolve a library name through the implementation's library cache.
    ///
    /// # Errors
    ///
    /// Returns `MediaServerError::NotFound` when the id is not part of the
    /// freshest library list available.
    async fn get_library_name(&self, library_id: &str) -> Result<String>;
}
