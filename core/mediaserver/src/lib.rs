//! Canonical media server model and backend adapters
//!
//! Every supported backend is exposed through the [`MediaServer`] trait and
//! produces the same backend-agnostic structs.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               MediaServer trait              │
//! │  get_server_info / get_libraries / search …  │
//! └──────────────────────────────────────────────┘
//!              △                      △
//!              │                      │
//!  ┌───────────┴───────────┐  ┌───────┴───────┐
//!  │ AudiobookshelfAdapter │  │  EmbyAdapter  │
//!  └───────────┬───────────┘  └───────┬───────┘
//!              │                      │
//!         AbsClient              EmbyClient
//! ```

mod adapters;
pub mod cache;
mod config;
mod error;
pub mod fanout;
mod models;
mod traits;

pub use adapters::{build_adapters, AudiobookshelfAdapter, EmbyAdapter};
pub use cache::TtlCache;
pub use config::{
    BackendConfig, MediaServersConfig, DEFAULT_AUDIOBOOKSHELF_PORT, DEFAULT_EMBY_PORT,
    DEFAULT_LIBRARY_STATS_TTL,
};
pub use error::{ErrorKind, MediaServerError, Result};
pub use models::{
    LibraryInfo, LibraryWithStats, ListeningStats, MediaServerType, SearchResult, ServerInfo,
    UserInfo,
};
pub use traits::MediaServer;
