//! In-memory backend used by the unit tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use mediaserver::{
    LibraryInfo, ListeningStats, MediaServer, MediaServerError, MediaServerType, Result,
    SearchResult, ServerInfo, UserInfo,
};

pub(crate) struct FakeServer {
    server_type: MediaServerType,
    libraries: Vec<(LibraryInfo, u64)>,
    failing_counts: Vec<String>,
    fail_search: bool,
    pub fail_libraries: AtomicBool,
    pub library_calls: AtomicUsize,
    pub count_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
}

impl FakeServer {
    pub fn new(server_type: MediaServerType) -> Self {
        Self {
            server_type,
            libraries: Vec::new(),
            failing_counts: Vec::new(),
            fail_search: false,
            fail_libraries: AtomicBool::new(false),
            library_calls: AtomicUsize::new(0),
            count_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_libraries(mut self, libraries: &[(&str, u64)]) -> Self {
        self.libraries = libraries
            .iter()
            .map(|(id, count)| {
                let info = LibraryInfo {
                    id: id.to_string(),
                    name: id.to_uppercase(),
                    ..Default::default()
                };
                (info, *count)
            })
            .collect();
        self
    }

    pub fn failing_count(mut self, library_id: &str) -> Self {
        self.failing_counts.push(library_id.to_string());
        self
    }

    pub fn failing_search(mut self) -> Self {
        self.fail_search = true;
        self
    }

    fn unavailable(&self) -> MediaServerError {
        MediaServerError::NotFound(format!("{} is unavailable", self.server_type))
    }
}

#[async_trait]
impl MediaServer for FakeServer {
    fn server_type(&self) -> MediaServerType {
        self.server_type
    }

    async fn get_server_info(&self) -> Result<ServerInfo> {
        Ok(ServerInfo {
            name: self.server_type.to_string(),
            ..Default::default()
        })
    }

    async fn get_users(&self) -> Result<Vec<UserInfo>> {
        Ok(Vec::new())
    }

    async fn get_current_user(&self) -> Result<UserInfo> {
        Ok(UserInfo::default())
    }

    async fn get_libraries(&self) -> Result<Vec<LibraryInfo>> {
        self.library_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        if self.fail_libraries.load(Ordering::SeqCst) {
            return Err(self.unavailable());
        }
        Ok(self.libraries.iter().map(|(info, _)| info.clone()).collect())
    }

    async fn get_library_items_count(&self, library_id: &str) -> Result<u64> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(5)).await;
        if self.failing_counts.iter().any(|id| id == library_id) {
            return Err(self.unavailable());
        }
        self.libraries
            .iter()
            .find(|(info, _)| info.id == library_id)
            .map(|(_, count)| *count)
            .ok_or_else(|| MediaServerError::NotFound(library_id.to_string()))
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_search {
            return Err(self.unavailable());
        }
        Ok(vec![SearchResult {
            title: query.to_string(),
            ..Default::default()
        }])
    }

    async fn get_listening_stats(&self) -> Result<ListeningStats> {
        Ok(ListeningStats::new())
    }

    async fn get_library_name(&self, library_id: &str) -> Result<String> {
        self.libraries
            .iter()
            .find(|(info, _)| info.id == library_id)
            .map(|(info, _)| info.name.clone())
            .ok_or_else(|| MediaServerError::NotFound(library_id.to_string()))
    }
}
