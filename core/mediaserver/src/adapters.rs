//! MediaServer implementations for each backend

mod audiobookshelf_adapter;
mod emby_adapter;

use std::sync::Arc;

use audiobookshelf::AbsClient;
use emby::EmbyClient;

pub use audiobookshelf_adapter::AudiobookshelfAdapter;
pub use emby_adapter::EmbyAdapter;

use crate::{MediaServer, MediaServersConfig, Result};

/// Build one adapter per enabled backend, sharing a single HTTP client.
///
/// Returns an empty list when nothing is configured.
pub fn build_adapters(config: &MediaServersConfig) -> Result<Vec<Arc<dyn MediaServer>>> {
    let http_client = config.http_client()?;
    let mut servers: Vec<Arc<dyn MediaServer>> = Vec::new();

    if let Some(backend) = &config.audiobookshelf {
        let client = AbsClient::with_client(http_client.clone(), &backend.url, &backend.token);
        tracing::info!("Audiobookshelf enabled at {}", client.base_url());
        let adapter = AudiobookshelfAdapter::new(Arc::new(client))
            .with_library_cache_ttl(config.library_name_ttl)
            .with_search_concurrency(config.fanout_limit);
        servers.push(Arc::new(adapter));
    }

    if let Some(backend) = &config.emby {
        let client = EmbyClient::with_client(http_client, &backend.url, &backend.token);
        tracing::info!("Emby enabled at {}", client.base_url());
        let adapter =
            EmbyAdapter::new(Arc::new(client)).with_library_cache_ttl(config.library_name_ttl);
        servers.push(Arc::new(adapter));
    }

    Ok(servers)
}

/// Milliseconds since epoch from an RFC 3339 timestamp, 0 when unparsable.
///
/// Timestamps without an offset are read as UTC.
pub(crate) fn timestamp_millis(raw: &str) -> i64 {
    if let Ok(parsed) = chrono::DateTime::parse_from_rfc3339(raw) {
        return parsed.timestamp_millis();
    }
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc().timestamp_millis())
        .unwrap_or(0)
}
