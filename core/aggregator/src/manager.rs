use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use mediaserver::fanout::{self, DEFAULT_FANOUT_LIMIT};
use mediaserver::{
    build_adapters, LibraryInfo, MediaServer, MediaServerError, MediaServerType,
    MediaServersConfig, Result, SearchResult, ServerInfo, DEFAULT_LIBRARY_STATS_TTL,
};

use crate::LibraryStatsService;

/// Owns the configured backends and runs operations across all of them.
///
/// Fan-out results are keyed by backend type. A backend whose call failed
/// has no key; its error is logged and dropped.
pub struct MediaServerManager {
    servers: BTreeMap<MediaServerType, Arc<dyn MediaServer>>,
    stats: BTreeMap<MediaServerType, Arc<LibraryStatsService>>,
    fanout_limit: usize,
}

impl MediaServerManager {
    /// Build adapters for every backend enabled in `config`.
    ///
    /// # Errors
    ///
    /// `MediaServerError::Config` when no backend is configured or the HTTP
    /// client cannot be built.
    pub fn new(config: &MediaServersConfig) -> Result<Self> {
        let servers = build_adapters(config)?;
        Self::build(servers, config.fanout_limit, config.library_stats_ttl)
    }

    /// Use already constructed backends
    pub fn with_servers(servers: Vec<Arc<dyn MediaServer>>, fanout_limit: usize) -> Result<Self> {
        Self::build(servers, fanout_limit, DEFAULT_LIBRARY_STATS_TTL)
    }

    fn build(
        servers: Vec<Arc<dyn MediaServer>>,
        fanout_limit: usize,
        stats_ttl: Duration,
    ) -> Result<Self> {
        if servers.is_empty() {
            return Err(MediaServerError::Config(
                "no media server configured, set AUDIOBOOKSHELF_TOKEN or EMBY_TOKEN".to_string(),
            ));
        }

        let fanout_limit = if fanout_limit == 0 {
            DEFAULT_FANOUT_LIMIT
        } else {
            fanout_limit
        };

        let mut by_type = BTreeMap::new();
        for server in servers {
            let server_type = server.server_type();
            if by_type.insert(server_type, server).is_some() {
                tracing::warn!("Media server {} registered twice, keeping the last", server_type);
            }
        }

        let stats = by_type
            .iter()
            .map(|(server_type, server)| {
                let service = LibraryStatsService::new(Arc::clone(server), stats_ttl)
                    .with_fanout_limit(fanout_limit);
                (*server_type, Arc::new(service))
            })
            .collect();

        tracing::info!(
            "Media server manager ready with {:?}",
            by_type.keys().map(MediaServerType::as_str).collect::<Vec<_>>()
        );

        Ok(Self {
            servers: by_type,
            stats,
            fanout_limit,
        })
    }

    pub fn get_server(&self, server_type: MediaServerType) -> Result<Arc<dyn MediaServer>> {
        self.servers
            .get(&server_type)
            .cloned()
            .ok_or(MediaServerError::NotConfigured(server_type))
    }

    pub fn get_all_servers(&self) -> Vec<Arc<dyn MediaServer>> {
        self.servers.values().cloned().collect()
    }

    /// Configured backend types, sorted
    pub fn get_server_types(&self) -> Vec<MediaServerType> {
        self.servers.keys().copied().collect()
    }

    /// Statistics cache of one backend
    pub fn library_stats(&self, server_type: MediaServerType) -> Result<Arc<LibraryStatsService>> {
        self.stats
            .get(&server_type)
            .cloned()
            .ok_or(MediaServerError::NotConfigured(server_type))
    }

    pub async fn search_across_servers(
        &self,
        query: &str,
    ) -> BTreeMap<MediaServerType, Vec<SearchResult>> {
        self.search_selected(&self.get_server_types(), query).await
    }

    /// Search only the backends in `targets`; unconfigured types are skipped
    pub async fn search_selected(
        &self,
        targets: &[MediaServerType],
        query: &str,
    ) -> BTreeMap<MediaServerType, Vec<SearchResult>> {
        self.fan_out("search", targets, |server| server.search(query))
            .await
    }

    pub async fn get_server_info_across_servers(&self) -> BTreeMap<MediaServerType, ServerInfo> {
        self.get_server_info_selected(&self.get_server_types())
            .await
    }

    pub async fn get_server_info_selected(
        &self,
        targets: &[MediaServerType],
    ) -> BTreeMap<MediaServerType, ServerInfo> {
        self.fan_out("server info", targets, |server| server.get_server_info())
            .await
    }

    pub async fn get_libraries_across_servers(
        &self,
    ) -> BTreeMap<MediaServerType, Vec<LibraryInfo>> {
        let targets = self.get_server_types();
        self.fan_out("library listing", &targets, |server| server.get_libraries())
            .await
    }

    /// Call every backend in `targets` with at most `fanout_limit` calls in
    /// flight and wait for all of them.
    async fn fan_out<'a, T, F, Fut>(
        &'a self,
        operation: &str,
        targets: &[MediaServerType],
        call: F,
    ) -> BTreeMap<MediaServerType, T>
    where
        F: Fn(&'a dyn MediaServer) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let call = &call;
        let selected = self
            .servers
            .iter()
            .filter(|(server_type, _)| targets.contains(server_type));
        let outcomes = fanout::bounded(
            selected,
            self.fanout_limit,
            |(server_type, server)| async move { (*server_type, call(&**server).await) },
        )
        .await;

        let mut results = BTreeMap::new();
        for (server_type, outcome) in outcomes {
            match outcome {
                Ok(value) => {
                    results.insert(server_type, value);
                }
                Err(e) => {
                    tracing::warn!("{} failed on {}: {}", operation, server_type, e);
                }
            }
        }
        results
    }
}
