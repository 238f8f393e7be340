//! Emby media server adapter

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use emby::{EmbyClient, Item, MediaFolder, SystemInfo, User};

use super::timestamp_millis;
use crate::cache::TtlCache;
use crate::{
    LibraryInfo, ListeningStats, MediaServer, MediaServerError, MediaServerType, Result,
    SearchResult, ServerInfo, UserInfo,
};

const DEFAULT_LIBRARY_CACHE_TTL: Duration = Duration::from_secs(30 * 60);
const SEARCH_LIMIT: u32 = 50;
const UNKNOWN_LIBRARY: &str = "Unknown Library";
/// 100ns ticks per millisecond
const TICKS_PER_MILLISECOND: i64 = 10_000;

/// Emby adapter.
///
/// Emby searches all libraries in one call; hits only carry a parent id,
/// which is resolved to a library name through the name cache.
pub struct EmbyAdapter {
    client: Arc<EmbyClient>,
    libraries: TtlCache<Vec<LibraryInfo>>,
}

impl EmbyAdapter {
    pub fn new(client: Arc<EmbyClient>) -> Self {
        Self {
            client,
            libraries: TtlCache::new(DEFAULT_LIBRARY_CACHE_TTL),
        }
    }

    pub fn with_library_cache_ttl(mut self, ttl: Duration) -> Self {
        self.libraries = TtlCache::new(ttl);
        self
    }

    async fn known_libraries(&self) -> Result<Arc<Vec<LibraryInfo>>> {
        self.libraries
            .get_or_refresh(|| self.fetch_libraries())
            .await?
            .ok_or_else(|| MediaServerError::NotFound("Emby library list unavailable".to_string()))
    }

    async fn fetch_libraries(&self) -> Result<Vec<LibraryInfo>> {
        let folders = self.client.get_media_folders().await?;
        tracing::debug!("Refreshed {} Emby libraries", folders.len());
        Ok(folders.into_iter().map(LibraryInfo::from).collect())
    }
}

#[async_trait]
impl MediaServer for EmbyAdapter {
    fn server_type(&self) -> MediaServerType {
        MediaServerType::Emby
    }

    async fn get_server_info(&self) -> Result<ServerInfo> {
        let info = self.client.get_system_info().await?;
        Ok(ServerInfo::from(info))
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
                        "Failed to count items of Emby library '{}': {}",
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
        let response = self.client.search_items(query, SEARCH_LIMIT).await?;

        // names are best effort, a failed refresh must not fail the search
        let known = match self.known_libraries().await {
            Ok(libraries) => Some(libraries),
            Err(e) => {
                tracing::warn!("Emby library names unavailable: {}", e);
                None
            }
        };
        let known = known.as_deref().map(Vec::as_slice).unwrap_or_default();

        Ok(response
            .items
            .into_iter()
            .map(|item| to_search_result(item, known))
            .collect())
    }

    async fn get_listening_stats(&self) -> Result<ListeningStats> {
        let user = self.client.get_current_user().await?;
        Ok(self.client.get_user_items(&user.id).await?)
    }

    async fn get_library_name(&self, library_id: &str) -> Result<String> {
        let libraries = self.known_libraries().await?;
        libraries
            .iter()
            .find(|library| library.id == library_id)
            .map(|library| library.name.clone())
            .ok_or_else(|| MediaServerError::NotFound(format!("Emby library {}", library_id)))
    }
}

impl From<MediaFolder> for LibraryInfo {
    fn from(folder: MediaFolder) -> Self {
        Self {
            id: folder.id,
            name: folder.name,
            media_type: folder.collection_type,
            ..Default::default()
        }
    }
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        let user_type = if user.policy.is_administrator {
            "Admin"
        } else {
            "EmbyUser"
        };
        Self {
            id: user.id,
            username: user.name,
            user_type: user_type.to_string(),
            is_active: !user.policy.is_disabled,
            last_seen: user
                .last_activity_date
                .as_deref()
                .map(timestamp_millis)
                .unwrap_or(0),
            created_at: 0,
            updated_at: 0,
        }
    }
}

impl From<SystemInfo> for ServerInfo {
    fn from(info: SystemInfo) -> Self {
        Self {
            id: info.id,
            name: info.server_name,
            version: info.version.clone(),
            server_version: info.version,
            api_version: "Emby".to_string(),
            language: String::new(),
            os: info.operating_system,
            arch: info.architecture,
            local_address: info.local_address,
            wan_address: info.wan_address,
        }
    }
}

fn to_search_result(item: Item, known: &[LibraryInfo]) -> SearchResult {
    let library_id = item.parent_id.unwrap_or_default();
    let library = if library_id.is_empty() {
        UNKNOWN_LIBRARY.to_string()
    } else {
        known
            .iter()
            .find(|library| library.id == library_id)
            .map(|library| library.name.clone())
            .unwrap_or_else(|| library_id.clone())
    };

    SearchResult {
        id: item.id,
        title: item.name,
        author: String::new(),
        size: item.size.unwrap_or(0),
        added_at: item.date_created.as_deref().map(timestamp_millis).unwrap_or(0),
        library_id,
        library,
        item_type: item.item_type.to_lowercase(),
        path: item.path.unwrap_or_default(),
        rel_path: String::new(),
        overview: item.overview.unwrap_or_default(),
        genres: item.genres,
        year: item.production_year.unwrap_or(0),
        run_time: item.run_time_ticks.unwrap_or(0) / TICKS_PER_MILLISECOND,
        media_type: item.media_type.unwrap_or_default(),
    }
}
