//! Emby REST API client
//!
//! Requests are authenticated with the static `X-Emby-Token` API key.

mod client;
mod error;
mod items;
pub mod models;
mod system;
mod users;

pub use client::EmbyClient;
pub use error::EmbyError;
pub use items::ItemsQuery;
pub use models::{Item, ItemsResponse, MediaFolder, SystemInfo, User, UserPolicy};

pub type Result<T> = std::result::Result<T, EmbyError>;
