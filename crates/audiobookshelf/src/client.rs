use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;

use crate::error::AbsError;

pub struct AbsClient {
    client: Client,
    base_url: Arc<str>,
    token: String,
}

impl AbsClient {
    /// Create a client sharing an existing reqwest client.
    ///
    /// The reqwest client carries the per-request timeout; this client
    /// only adds the base URL and the bearer token.
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/');
        Self {
            client,
            base_url: Arc::from(base_url),
            token: token.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Perform one authenticated request and return the raw body.
    ///
    /// Any non-2xx status is turned into [`AbsError::Api`] carrying the
    /// status code and the response body.
    pub async fn request_raw(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> crate::Result<Bytes> {
        self.send(method, path, &[], body).await
    }

    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&serde_json::Value>,
    ) -> crate::Result<Bytes> {
        let url = self.url(path);
        tracing::debug!("Audiobookshelf request: {} {}", method, path);

        let mut request = self
            .client
            .request(method, &url)
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(body) = body {
            let payload = serde_json::to_vec(body).map_err(AbsError::Serialize)?;
            request = request.body(payload);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(AbsError::Api {
                status_code: status.as_u16(),
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> crate::Result<T> {
        let body = self.send(Method::GET, path, query, None).await?;
        decode(&body)
    }
}

/// Decode a response body, reporting the JSON path of the first mismatch.
pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> crate::Result<T> {
    let deserializer = &mut serde_json::Deserializer::from_slice(body);
    serde_path_to_error::deserialize(deserializer).map_err(|e| AbsError::Json {
        path: e.path().to_string(),
        source: e.into_inner(),
    })
}
