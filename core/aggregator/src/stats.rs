use std::sync::Arc;
use std::time::Duration;

use mediaserver::fanout::{self, DEFAULT_FANOUT_LIMIT};
use mediaserver::{
    LibraryWithStats, ListeningStats, MediaServer, MediaServerError, MediaServerType, Result,
    SearchResult, TtlCache, UserInfo,
};

/// Library statistics for one backend, cached for a short TTL.
///
/// A refresh lists the libraries, then counts the items of each library
/// concurrently. The snapshot is swapped as a whole, so readers never see
/// a partially refreshed list.
pub struct LibraryStatsService {
    server: Arc<dyn MediaServer>,
    cache: TtlCache<Vec<LibraryWithStats>>,
    fanout_limit: usize,
}

impl LibraryStatsService {
    pub fn new(server: Arc<dyn MediaServer>, ttl: Duration) -> Self {
        Self {
            server,
            cache: TtlCache::new(ttl),
            fanout_limit: DEFAULT_FANOUT_LIMIT,
        }
    }

    pub fn with_fanout_limit(mut self, limit: usize) -> Self {
        self.fanout_limit = limit.max(1);
        self
    }

    pub fn server_type(&self) -> MediaServerType {
        self.server.server_type()
    }

    /// Libraries with item counts, in backend order.
    ///
    /// Served from the cache while it is fresh. When the library list
    /// cannot be fetched the previous snapshot is returned if there is one.
    pub async fn get_libraries_with_stats(&self) -> Result<Arc<Vec<LibraryWithStats>>> {
        self.cache
            .get_or_refresh(|| self.fetch_stats())
            .await?
            .ok_or_else(|| {
                MediaServerError::NotFound(format!(
                    "library statistics of {} are unavailable",
                    self.server_type()
                ))
            })
    }

    async fn fetch_stats(&self) -> Result<Vec<LibraryWithStats>> {
        let libraries = self.server.get_libraries().await?;
        tracing::info!(
            "Refreshing {} library statistics for {} libraries",
            self.server_type(),
            libraries.len()
        );

        let counts = fanout::bounded(libraries.iter(), self.fanout_limit, |library| async move {
            match self.server.get_library_items_count(&library.id).await {
                Ok(count) => count,
                Err(e) => {
                    tracing::warn!(
                        "Failed to count items of {} library '{}': {}",
                        self.server_type(),
                        library.name,
                        e
                    );
                    0
                }
            }
        })
        .await;

        Ok(libraries
            .into_iter()
            .zip(counts)
            .map(|(library, item_count)| LibraryWithStats {
                library,
                item_count,
            })
            .collect())
    }

    pub async fn get_library_name(&self, library_id: &str) -> Result<String> {
        self.server.get_library_name(library_id).await
    }

    pub async fn get_users(&self) -> Result<Vec<UserInfo>> {
        self.server.get_users().await
    }

    pub async fn get_current_user(&self) -> Result<UserInfo> {
        self.server.get_current_user().await
    }

    pub async fn get_listening_stats(&self) -> Result<ListeningStats> {
        self.server.get_listening_stats().await
    }

    /// Search the backend; blank queries are rejected without a call.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(MediaServerError::InvalidQuery(
                "search query must not be empty".to_string(),
            ));
        }
        self.server.search(query).await
    }
}
