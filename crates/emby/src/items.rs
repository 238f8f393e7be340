use crate::client::EmbyClient;
use crate::models::{ItemsResponse, MediaFolder, MediaFoldersResponse};

/// Item types requested by a search
const SEARCH_ITEM_TYPES: &[&str] = &[
    "Movie",
    "Series",
    "MusicAlbum",
    "MusicArtist",
    "Playlist",
    "Audio",
    "Book",
    "Folder",
    "Photo",
    "PhotoAlbum",
];

/// Extra fields requested by a search so results carry full media info
const SEARCH_FIELDS: &[&str] = &[
    "Path",
    "DateCreated",
    "Size",
    "Overview",
    "ProviderIds",
    "Genres",
    "Studios",
    "Taglines",
    "LocalTrailerCount",
    "OfficialRating",
    "CumulativeRunTimeTicks",
    "ItemCounts",
    "DisplayPreferencesId",
    "ChildCount",
    "RecursiveChildCount",
    "ProductionLocations",
    "CriticRating",
    "ShortOverview",
    "MediaSourceCount",
    "PrimaryImageAspectRatio",
];

/// Query parameters for `GET /Items`
#[derive(Debug, Clone, Default)]
pub struct ItemsQuery {
    pub parent_id: Option<String>,
    pub user_id: Option<String>,
    pub search_term: Option<String>,
    pub include_item_types: Vec<String>,
    pub exclude_item_types: Vec<String>,
    pub fields: Vec<String>,
    pub limit: Option<u32>,
    pub recursive: bool,
    pub enable_total_record_count: Option<bool>,
    flags: Vec<&'static str>,
}

impl ItemsQuery {
    pub fn new() -> Self {
        Self {
            recursive: true,
            ..Default::default()
        }
    }

    /// Count-only query: no items in the body, just `TotalRecordCount`
    pub fn count(parent_id: impl Into<String>) -> Self {
        Self::new()
            .parent_id(parent_id)
            .total_record_count(true)
            .limit(0)
    }

    pub fn parent_id(mut self, id: impl Into<String>) -> Self {
        self.parent_id = Some(id.into());
        self
    }

    pub fn user_id(mut self, id: impl Into<String>) -> Self {
        self.user_id = Some(id.into());
        self
    }

    pub fn search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn include_types(mut self, types: &[&str]) -> Self {
        self.include_item_types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn exclude_types(mut self, types: &[&str]) -> Self {
        self.exclude_item_types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn total_record_count(mut self, enabled: bool) -> Self {
        self.enable_total_record_count = Some(enabled);
        self
    }

    /// Set a boolean `true` flag such as `IncludePeople`
    pub fn flag(mut self, name: &'static str) -> Self {
        self.flags.push(name);
        self
    }

    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(id) = &self.parent_id {
            pairs.push(("ParentId", id.clone()));
        }
        if let Some(id) = &self.user_id {
            pairs.push(("UserId", id.clone()));
        }
        if let Some(term) = &self.search_term {
            pairs.push(("SearchTerm", term.clone()));
        }
        if !self.include_item_types.is_empty() {
            pairs.push(("IncludeItemTypes", self.include_item_types.join(",")));
        }
        if !self.exclude_item_types.is_empty() {
            pairs.push(("ExcludeItemTypes", self.exclude_item_types.join(",")));
        }
        if !self.fields.is_empty() {
            pairs.push(("Fields", self.fields.join(",")));
        }
        for flag in &self.flags {
            pairs.push((*flag, "true".to_string()));
        }
        if self.recursive {
            pairs.push(("Recursive", "true".to_string()));
        }
        if let Some(enabled) = self.enable_total_record_count {
            pairs.push(("EnableTotalRecordCount", enabled.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("Limit", limit.to_string()));
        }

        pairs
    }
}

impl EmbyClient {
    /// List libraries (media folders)
    /// GET /Library/MediaFolders
    pub async fn get_media_folders(&self) -> crate::Result<Vec<MediaFolder>> {
        let response: MediaFoldersResponse = self.get_json("/Library/MediaFolders", &[]).await?;
        Ok(response.items)
    }

    /// Query items
    /// GET /Items
    pub async fn get_items(&self, query: &ItemsQuery) -> crate::Result<ItemsResponse> {
        self.get_json("/Items", &query.to_pairs()).await
    }

    /// Total number of items below a library
    pub async fn get_library_items_count(&self, library_id: &str) -> crate::Result<u64> {
        let query = ItemsQuery::count(library_id);
        Ok(self.get_items(&query).await?.total_record_count)
    }

    /// Search every library for `term`, episodes excluded.
    ///
    /// A `limit` of 0 means no limit.
    pub async fn search_items(&self, term: &str, limit: u32) -> crate::Result<ItemsResponse> {
        let mut query = ItemsQuery::new()
            .search_term(term)
            .include_types(SEARCH_ITEM_TYPES)
            .exclude_types(&["Episode"])
            .fields(SEARCH_FIELDS)
            .flag("IncludePeople")
            .flag("IncludeGenres")
            .flag("IncludeStudios")
            .flag("IncludeArtists")
            .total_record_count(false);

        if limit > 0 {
            query = query.limit(limit);
        }

        self.get_items(&query).await
    }
}
