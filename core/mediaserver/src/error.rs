//! Error types for media server operations

use crate::MediaServerType;

/// Coarse classification of a [`MediaServerError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure, timeout or non-2xx status
    Transport,
    /// Response body did not match the expected shape
    Decode,
    /// A lookup found no match after a refresh
    NotFound,
    /// Missing or invalid configuration
    Configuration,
    /// Rejected caller input
    InvalidInput,
}

#[derive(Debug, thiserror::Error)]
pub enum MediaServerError {
    #[error("Audiobookshelf error: {0}")]
    Audiobookshelf(#[from] audiobookshelf::AbsError),

    #[error("Emby error: {0}")]
    Emby(#[from] emby::EmbyError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Media server '{0}' is not configured")]
    NotConfigured(MediaServerType),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl MediaServerError {
    pub fn kind(&self) -> ErrorKind {
        use audiobookshelf::AbsError;
        use emby::EmbyError;

        match self {
            Self::Audiobookshelf(AbsError::Json { .. } | AbsError::Serialize(_))
            | Self::Emby(EmbyError::Json { .. } | EmbyError::Serialize(_)) => ErrorKind::Decode,
            Self::Audiobookshelf(_) | Self::Emby(_) => ErrorKind::Transport,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::NotConfigured(_) | Self::Config(_) => ErrorKind::Configuration,
            Self::InvalidQuery(_) => ErrorKind::InvalidInput,
        }
    }

    /// Upstream HTTP status, when one was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Audiobookshelf(e) => e.status_code(),
            Self::Emby(e) => e.status_code(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MediaServerError>;
