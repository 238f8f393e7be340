use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbyError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status_code} - {message}")]
    Api { status_code: u16, message: String },

    #[error("Failed to decode response at '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl EmbyError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            EmbyError::Api { status_code, .. } => Some(*status_code),
            EmbyError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
