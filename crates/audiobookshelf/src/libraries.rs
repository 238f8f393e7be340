use crate::client::AbsClient;
use crate::models::{
    LibrariesResponse, Library, LibraryItem, LibraryItemsResponse, SearchResponse,
};

impl AbsClient {
    /// List all libraries
    /// GET /api/libraries
    pub async fn get_libraries(&self) -> crate::Result<Vec<Library>> {
        let response: LibrariesResponse = self.get_json("/api/libraries", &[]).await?;
        Ok(response.libraries)
    }

    /// Number of items in a library
    /// GET /api/libraries/{id}/items
    pub async fn get_library_items_count(&self, library_id: &str) -> crate::Result<u64> {
        let path = format!("/api/libraries/{}/items", library_id);
        let response: LibraryItemsResponse = self.get_json(&path, &[]).await?;
        Ok(response.total)
    }

    /// Search a single library
    /// GET /api/libraries/{id}/search?q={term}
    ///
    /// Book and podcast hits are returned together, books first.
    pub async fn search_library(
        &self,
        library_id: &str,
        term: &str,
    ) -> crate::Result<Vec<LibraryItem>> {
        let path = format!("/api/libraries/{}/search", library_id);
        let response: SearchResponse = self.get_json(&path, &[("q", term)]).await?;

        Ok(response
            .book
            .into_iter()
            .chain(response.podcast)
            .map(|hit| hit.library_item)
            .collect())
    }
}
