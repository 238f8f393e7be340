use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Backend product a [`MediaServer`](crate::MediaServer) talks to.
///
/// Used as the key of every per-backend result map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaServerType {
    Audiobookshelf,
    Emby,
}

impl MediaServerType {
    pub const ALL: [MediaServerType; 2] = [MediaServerType::Audiobookshelf, MediaServerType::Emby];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Audiobookshelf => "audiobookshelf",
            Self::Emby => "emby",
        }
    }

    /// Human readable product name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Audiobookshelf => "Audiobookshelf",
            Self::Emby => "Emby",
        }
    }
}

impl fmt::Display for MediaServerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaServerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "audiobookshelf" | "abs" => Ok(Self::Audiobookshelf),
            "emby" => Ok(Self::Emby),
            other => Err(format!("unknown media server type: {}", other)),
        }
    }
}

/// Server status snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub id: String,
    pub name: String,
    pub version: String,
    pub server_version: String,
    pub api_version: String,
    pub language: String,
    pub os: String,
    pub arch: String,
    pub local_address: String,
    pub wan_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    /// Backend specific label, e.g. "root", "Admin", "EmbyUser"
    #[serde(rename = "type")]
    pub user_type: String,
    pub is_active: bool,
    /// Milliseconds since epoch, 0 when unknown
    pub last_seen: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryInfo {
    pub id: String,
    pub name: String,
    pub item_count: u64,
    pub media_type: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub last_scan: i64,
}

/// One search hit.
///
/// Fields a backend cannot fill stay at their zero value and mean
/// "unknown".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Unique within one backend's result set
    pub id: String,
    pub title: String,
    pub author: String,
    pub size: i64,
    pub added_at: i64,
    pub library_id: String,
    /// Library display name, or the raw library id when it could not be resolved
    pub library: String,
    /// "book", "podcast", "movie", "series", ...
    #[serde(rename = "type")]
    pub item_type: String,
    pub path: String,
    pub rel_path: String,
    pub overview: String,
    pub genres: Vec<String>,
    pub year: i32,
    /// Milliseconds
    pub run_time: i64,
    pub media_type: String,
}

/// A library together with its resolved item count
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryWithStats {
    pub library: LibraryInfo,
    pub item_count: u64,
}

/// Listening/watching statistics, passed through as the backend reports them
pub type ListeningStats = serde_json::Map<String, serde_json::Value>;
