//! Audiobookshelf media server adapter

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use audiobookshelf::{AbsClient, Library, LibraryItem, ServerStatus, User};

use crate::cache::TtlCache;
use crate::fanout::{self, DEFAULT_FANOUT_LIMIT};
use crate::{
    LibraryInfo, ListeningStats, MediaServer, MediaServerError, MediaServerType, Result,
    SearchResult, ServerInfo, UserInfo,
};

const DEFAULT_LIBRARY_CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// Audiobookshelf adapter.
///
/// Audiobookshelf only searches one library per call, so [`search`]
/// fans out over every known library and merges the hits.
///
/// [`search`]: MediaServer::search
pub struct AudiobookshelfAdapter {
    client: Arc<AbsClient>,
    libraries: TtlCache<Vec<LibraryInfo>>,
    search_concurrency: usize,
}

impl AudiobookshelfAdapter {
    pub fn new(client: Arc<AbsClient>) -> Self {
        Self {
            client,
            libraries: TtlCache::new(DEFAULT_LIBRARY_CACHE_TTL),
            search_concurrency: DEFAULT_FANOUT_LIMIT,
        }
    }

    pub fn with_library_cache_ttl(mut self, ttl: Duration) -> Self {
        self.libraries = TtlCache::new(ttl);
        self
    }

    pub fn with_search_concurrency(mut self, limit: usize) -> Self {
        self.search_concurrency = limit.max(1);
        self
    }

    /// Search a single library
    pub async fn search_library(
        &self,
        query: &str,
        library_id: &str,
    ) -> Result<Vec<SearchResult>> {
        let items = self.client.search_library(library_id, query).await?;
        let known = self.known_libraries().await.ok();
        let known = known.as_deref().map(Vec::as_slice).unwrap_or_default();

        Ok(items
            .into_iter()
            .map(|item| to_search_result(item, library_id, known))
            .collect())
    }

    /// Library list from the name cache, without item counts
    async fn known_libraries(&self) -> Result<Arc<Vec<LibraryInfo>>> {
        self.libraries
            .get_or_refresh(|| self.fetch_libraries())
            .await?
            .ok_or_else(|| {
                MediaServerError::NotFound("Audiobookshelf library list unavailable".to_string())
            })
    }

    /// Libraries a search fans out over.
    ///
    /// The name cache stamps failed refreshes, so when it holds nothing the
    /// list is fetched directly and the next search retries again.
    async fn searchable_libraries(&self) -> Result<Arc<Vec<LibraryInfo>>> {
        match self.known_libraries().await {
            Ok(libraries) => Ok(libraries),
            Err(e) => {
                tracing::warn!("Audiobookshelf library cache unavailable, listing directly: {}", e);
                Ok(Arc::new(self.fetch_libraries().await?))
            }
        }
    }

    async fn fetch_libraries(&self) -> Result<Vec<LibraryInfo>> {
        let libraries = self.client.get_libraries().await?;
        tracing::debug!("Refreshed {} Audiobookshelf libraries", libraries.len());
        Ok(libraries.into_iter().map(LibraryInfo::from).collect())
    }
}

#[async_trait]
impl MediaServer for AudiobookshelfAdapter {
    fn server_type(&self) -> MediaServerType {
        MediaServerType::Audiobookshelf
    }

    async fn get_server_info(&self) -> Result<ServerInfo> {
        let status = self.client.get_server_status().await?;
        Ok(ServerInfo::from(status))
    }

    async fn get_users(&self) -> Result<Vec<UserInfo>> {
        let users = self.client.get_users().await?;
        Ok(users.into_iter().map(UserInfo::from).collect())
    }

    async fn get_current_user(&self) -> Result<UserInfo> {
        let user = self.client.get_current_user().await?;
        Ok(UserInfo::from(user))
    }

    async fn get_libraries(&self) -> Result<Vec<LibraryInfo>> {
        let mut libraries = self.fetch_libraries().await?;

        for library in &mut libraries {
            match self.client.get_library_items_count(&library.id).await {
                Ok(count) => library.item_count = count,
                Err(e) => {
                    tracing::warn!(
                        "Failed to count items of Audiobookshelf library '{}': {}",
                        library.name,
                        e
                    );
                }
            }
        }

        Ok(libraries)
    }

    async fn get_library_items_count(&self, library_id: &str) -> Result<u64> {
        Ok(self.client.get_library_items_count(library_id).await?)
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let libraries = self.searchable_libraries().await?;

        let per_library =
            fanout::bounded(libraries.iter(), self.search_concurrency, |library| async move {
                match self.client.search_library(&library.id, query).await {
                    Ok(items) => items,
                    Err(e) => {
                        tracing::warn!(
                            "Audiobookshelf search in library '{}' failed: {}",
                            library.name,
                            e
                        );
                        Vec::new()
                    }
                }
            })
            .await;

        let mut seen = HashSet::new();
        let mut results = Vec::new();
        for (library, items) in libraries.iter().zip(per_library) {
            for item in items {
                if seen.insert(dedup_key(&item)) {
                    results.push(to_search_result(item, &library.id, &libraries));
                }
            }
        }

        tracing::debug!(
            "Audiobookshelf search '{}' matched {} items in {} libraries",
            query,
            results.len(),
            libraries.len()
        );
        Ok(results)
    }

    async fn get_listening_stats(&self) -> Result<ListeningStats> {
        Ok(self.client.get_listening_stats().await?)
    }

    async fn get_library_name(&self, library_id: &str) -> Result<String> {
        let libraries = self.known_libraries().await?;
        libraries
            .iter()
            .find(|library| library.id == library_id)
            .map(|library| library.name.clone())
            .ok_or_else(|| {
                MediaServerError::NotFound(format!("Audiobookshelf library {}", library_id))
            })
    }
}

impl From<Library> for LibraryInfo {
    fn from(library: Library) -> Self {
        Self {
            id: library.id,
            name: library.name,
            item_count: 0,
            media_type: library.media_type,
            created_at: library.created_at,
            updated_at: library.updated_at,
            last_scan: library.last_scan.unwrap_or(0),
        }
    }
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            user_type: user.user_type,
            is_active: user.is_active,
            last_seen: user.last_seen.unwrap_or(0),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<ServerStatus> for ServerInfo {
    fn from(status: ServerStatus) -> Self {
        let name = if status.app.is_empty() {
            MediaServerType::Audiobookshelf.display_name().to_string()
        } else {
            status.app
        };
        Self {
            name,
            version: status.server_version.clone(),
            server_version: status.server_version,
            api_version: status.api_version,
            language: status.language,
            ..Default::default()
        }
    }
}

/// Items are the same when their ids match; id-less items fall back to
/// their relative path.
fn dedup_key(item: &LibraryItem) -> String {
    if item.id.is_empty() {
        item.rel_path.clone()
    } else {
        item.id.clone()
    }
}

fn to_search_result(
    item: LibraryItem,
    searched_library: &str,
    known: &[LibraryInfo],
) -> SearchResult {
    let library_id = if item.library_id.is_empty() {
        searched_library.to_string()
    } else {
        item.library_id.clone()
    };
    let library = known
        .iter()
        .find(|library| library.id == library_id)
        .map(|library| library.name.clone())
        .unwrap_or_else(|| library_id.clone());

    let metadata = item.metadata().cloned().unwrap_or_default();
    let title = metadata
        .title
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| file_name(&item.rel_path).to_string());
    let year = metadata
        .published_year
        .as_deref()
        .and_then(|year| year.trim().get(..4))
        .and_then(|year| year.parse().ok())
        .unwrap_or(0);
    let item_type = if item.media_type.is_empty() {
        "book".to_string()
    } else {
        item.media_type
    };

    SearchResult {
        id: format!("{}_{}", library_id, item.rel_path),
        title,
        author: metadata.author_name.unwrap_or_default(),
        size: item.size,
        added_at: item.added_at,
        library_id,
        library,
        item_type,
        path: item.path,
        rel_path: item.rel_path,
        overview: metadata.description.unwrap_or_default(),
        genres: metadata.genres,
        year,
        run_time: 0,
        media_type: "audio".to_string(),
    }
}

fn file_name(rel_path: &str) -> &str {
    rel_path.rsplit('/').next().unwrap_or(rel_path)
}
