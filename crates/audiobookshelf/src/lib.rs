//! Audiobookshelf REST API client
//!
//! Thin wrapper over the Audiobookshelf HTTP API. Every call is
//! authenticated with a static bearer token and returns either the raw
//! response body or a typed decode of the native JSON shape.

mod client;
mod error;
mod libraries;
pub mod models;
mod server;
mod users;

pub use client::AbsClient;
pub use error::AbsError;
pub use models::{
    Library, LibraryFolder, LibraryItem, MediaMetadata, SearchHit, ServerStatus, User,
};

pub type Result<T> = std::result::Result<T, AbsError>;
