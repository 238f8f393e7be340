//! Connection settings for the media server backends

use std::time::Duration;

use crate::error::{MediaServerError, Result};
use crate::fanout::DEFAULT_FANOUT_LIMIT;
use crate::MediaServerType;

pub const DEFAULT_AUDIOBOOKSHELF_PORT: u16 = 13378;
pub const DEFAULT_EMBY_PORT: u16 = 8096;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_LIBRARY_NAME_TTL: Duration = Duration::from_secs(30 * 60);
/// TTL of the aggregated library statistics snapshot
pub const DEFAULT_LIBRARY_STATS_TTL: Duration = Duration::from_secs(5 * 60);

/// Base URL and credential for one backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub token: String,
}

/// Settings for every backend plus the shared HTTP and cache tuning.
///
/// A backend is enabled exactly when its entry is `Some`.
#[derive(Debug, Clone)]
pub struct MediaServersConfig {
    pub audiobookshelf: Option<BackendConfig>,
    pub emby: Option<BackendConfig>,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub fanout_limit: usize,
    pub library_name_ttl: Duration,
    pub library_stats_ttl: Duration,
}

impl Default for MediaServersConfig {
    fn default() -> Self {
        Self {
            audiobookshelf: None,
            emby: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            fanout_limit: DEFAULT_FANOUT_LIMIT,
            library_name_ttl: DEFAULT_LIBRARY_NAME_TTL,
            library_stats_ttl: DEFAULT_LIBRARY_STATS_TTL,
        }
    }
}

impl MediaServersConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn audiobookshelf(mut self, url: impl Into<String>, token: impl Into<String>) -> Self {
        self.audiobookshelf = Some(BackendConfig {
            url: url.into(),
            token: token.into(),
        });
        self
    }

    pub fn emby(mut self, url: impl Into<String>, token: impl Into<String>) -> Self {
        self.emby = Some(BackendConfig {
            url: url.into(),
            token: token.into(),
        });
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn fanout_limit(mut self, limit: usize) -> Self {
        self.fanout_limit = limit;
        self
    }

    pub fn library_name_ttl(mut self, ttl: Duration) -> Self {
        self.library_name_ttl = ttl;
        self
    }

    pub fn library_stats_ttl(mut self, ttl: Duration) -> Self {
        self.library_stats_ttl = ttl;
        self
    }

    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup.
    ///
    /// | Key | Meaning |
    /// |-----|---------|
    /// | `AUDIOBOOKSHELF_URL`, `_PORT`, `_TOKEN` | Audiobookshelf backend |
    /// | `EMBY_URL`, `EMBY_PORT`, `EMBY_TOKEN` | Emby backend |
    /// | `MEDIA_REQUEST_TIMEOUT_SECS` | per-request timeout |
    /// | `MEDIA_FANOUT_LIMIT` | concurrent calls per fan-out |
    /// | `LIBRARY_NAME_CACHE_TTL_SECS` | library name cache TTL |
    /// | `LIBRARY_STATS_CACHE_TTL_SECS` | library statistics TTL |
    ///
    /// A backend without a token is disabled. A missing URL becomes
    /// `http://localhost:{port}`. Unparsable numbers fall back to their
    /// defaults; an unparsable URL is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let secs = |key: &str, default: Duration| {
            parse_number::<u64>(&lookup, key)
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(default)
        };

        Ok(Self {
            audiobookshelf: backend_from_lookup(
                &lookup,
                "AUDIOBOOKSHELF",
                DEFAULT_AUDIOBOOKSHELF_PORT,
            )?,
            emby: backend_from_lookup(&lookup, "EMBY", DEFAULT_EMBY_PORT)?,
            request_timeout: secs("MEDIA_REQUEST_TIMEOUT_SECS", defaults.request_timeout),
            connect_timeout: defaults.connect_timeout,
            fanout_limit: parse_number::<usize>(&lookup, "MEDIA_FANOUT_LIMIT")
                .filter(|limit| *limit > 0)
                .unwrap_or(defaults.fanout_limit),
            library_name_ttl: secs("LIBRARY_NAME_CACHE_TTL_SECS", defaults.library_name_ttl),
            library_stats_ttl: secs("LIBRARY_STATS_CACHE_TTL_SECS", defaults.library_stats_ttl),
        })
    }

    /// Enabled backends in key order
    pub fn configured_types(&self) -> Vec<MediaServerType> {
        let mut types = Vec::new();
        if self.audiobookshelf.is_some() {
            types.push(MediaServerType::Audiobookshelf);
        }
        if self.emby.is_some() {
            types.push(MediaServerType::Emby);
        }
        types
    }

    pub fn is_empty(&self) -> bool {
        self.audiobookshelf.is_none() && self.emby.is_none()
    }

    /// Shared HTTP client carrying the configured timeouts
    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .build()
            .map_err(|e| MediaServerError::Config(format!("Failed to build HTTP client: {}", e)))
    }
}

fn backend_from_lookup<F>(
    lookup: &F,
    prefix: &str,
    default_port: u16,
) -> Result<Option<BackendConfig>>
where
    F: Fn(&str) -> Option<String>,
{
    let token = lookup(&format!("{}_TOKEN", prefix)).unwrap_or_default();
    let token = token.trim();
    if token.is_empty() {
        return Ok(None);
    }

    let url = match lookup(&format!("{}_URL", prefix)).filter(|u| !u.trim().is_empty()) {
        Some(url) => url.trim().to_string(),
        None => {
            let port = parse_number::<u16>(lookup, &format!("{}_PORT", prefix))
                .filter(|port| *port > 0)
                .unwrap_or(default_port);
            format!("http://localhost:{}", port)
        }
    };

    let parsed = url::Url::parse(&url)
        .map_err(|e| MediaServerError::Config(format!("Invalid {}_URL '{}': {}", prefix, url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(MediaServerError::Config(format!(
            "Invalid {}_URL '{}': expected an http or https URL",
            prefix, url
        )));
    }

    Ok(Some(BackendConfig {
        url,
        token: token.to_string(),
    }))
}

fn parse_number<N: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<N> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {} value '{}'", key, raw);
            None
        }
    }
}
