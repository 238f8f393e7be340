use serde::{Deserialize, Serialize};

/// Response of `GET /System/Info`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SystemInfo {
    pub id: String,
    pub server_name: String,
    pub version: String,
    pub operating_system: String,
    pub architecture: String,
    pub has_https: bool,
    pub local_address: String,
    pub wan_address: String,
    pub is_shutting_down: bool,
    pub supports_https: bool,
    pub https_port_number: i32,
    pub web_socket_port_number: i32,
    pub can_self_restart: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserPolicy {
    pub is_administrator: bool,
    pub is_hidden: bool,
    pub is_disabled: bool,
    pub enable_all_folders: bool,
    pub enabled_folders: Vec<String>,
    pub enable_media_playback: bool,
    pub enable_content_deletion: bool,
    pub enable_content_downloading: bool,
    pub max_active_sessions: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct User {
    pub id: String,
    pub name: String,
    /// RFC 3339 timestamp, absent for users who never logged in
    pub last_activity_date: Option<String>,
    pub last_login_date: Option<String>,
    pub has_configured_password: bool,
    pub policy: UserPolicy,
}

/// One entry of `GET /Library/MediaFolders`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MediaFolder {
    pub id: String,
    pub name: String,
    /// "movies", "tvshows", "music", "books", ...; empty for mixed folders
    pub collection_type: String,
    pub location_type: String,
    pub refresh_status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct MediaFoldersResponse {
    pub items: Vec<MediaFolder>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderIds {
    #[serde(rename = "Tmdb")]
    pub tmdb: Option<String>,
    #[serde(rename = "Imdb")]
    pub imdb: Option<String>,
    #[serde(rename = "Tvdb")]
    pub tvdb: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(rename = "Type")]
    pub item_type: String,
    pub is_folder: bool,
    pub size: Option<i64>,
    pub date_created: Option<String>,
    pub parent_id: Option<String>,
    pub path: Option<String>,
    pub production_year: Option<i32>,
    pub premiere_date: Option<String>,
    pub overview: Option<String>,
    pub genres: Vec<String>,
    pub media_type: Option<String>,
    /// Duration in 100-nanosecond ticks
    pub run_time_ticks: Option<i64>,
    pub provider_ids: ProviderIds,
}

/// Response of `GET /Items`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ItemsResponse {
    pub items: Vec<Item>,
    pub total_record_count: u64,
}
