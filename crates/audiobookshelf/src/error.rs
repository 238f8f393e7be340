use thiserror::Error;

#[derive(Debug, Error)]
pub enum AbsError {
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

impl AbsError {
    /// HTTP status reported by the server, if the request got that far.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AbsError::Api { status_code, .. } => Some(*status_code),
            AbsError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
