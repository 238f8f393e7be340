use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of `GET /status`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerStatus {
    pub success: bool,
    pub app: String,
    pub server_version: String,
    pub api_version: String,
    pub user_id: String,
    pub username: String,
    pub language: String,
    pub is_init: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LibraryFolder {
    pub id: String,
    #[serde(alias = "fullPath")]
    pub path: String,
}

/// A library as listed by `GET /api/libraries`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Library {
    pub id: String,
    pub name: String,
    pub folders: Vec<LibraryFolder>,
    pub display_order: i64,
    pub icon: String,
    /// "book" or "podcast"
    pub media_type: String,
    pub provider: String,
    pub last_scan: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    pub settings: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct LibrariesResponse {
    #[serde(default)]
    pub libraries: Vec<Library>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct LibraryItemsResponse {
    #[serde(default)]
    pub total: u64,
}

/// Metadata block nested under `libraryItem.media.metadata`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaMetadata {
    pub title: Option<String>,
    pub author_name: Option<String>,
    pub description: Option<String>,
    pub genres: Vec<String>,
    pub published_year: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Media {
    pub metadata: Option<MediaMetadata>,
}

/// One item from a library search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LibraryItem {
    pub id: String,
    pub library_id: String,
    pub path: String,
    pub rel_path: String,
    pub size: i64,
    pub added_at: i64,
    pub media_type: String,
    pub media: Option<Media>,
}

impl LibraryItem {
    pub fn metadata(&self) -> Option<&MediaMetadata> {
        self.media.as_ref().and_then(|m| m.metadata.as_ref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchHit {
    pub library_item: LibraryItem,
}

/// Response of `GET /api/libraries/{id}/search`
///
/// Book libraries fill `book`, podcast libraries fill `podcast`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SearchResponse {
    pub book: Vec<SearchHit>,
    pub podcast: Vec<SearchHit>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: String,
    pub username: String,
    /// "root", "admin", "user" or "guest"
    #[serde(rename = "type")]
    pub user_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub is_active: bool,
    pub last_seen: Option<i64>,
    pub media_progress: Vec<Value>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct UsersResponse {
    #[serde(default)]
    pub users: Vec<User>,
}
