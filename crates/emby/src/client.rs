use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;

use crate::error::EmbyError;

/// Header carrying the Emby API key
const TOKEN_HEADER: &str = "X-Emby-Token";

pub struct EmbyClient {
    client: Client,
    base_url: Arc<str>,
    api_key: String,
}

impl EmbyClient {
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/');
        Self {
            client,
            base_url: Arc::from(base_url),
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Perform one authenticated request and return the raw body.
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
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> crate::Result<Bytes> {
        let url = self.url(path);
        tracing::debug!("Emby request: {} {}", method, path);

        let mut request = self
            .client
            .request(method, &url)
            .header(TOKEN_HEADER, &self.api_key)
            .header(CONTENT_TYPE, "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(body) = body {
            let payload = serde_json::to_vec(body).map_err(EmbyError::Serialize)?;
            request = request.body(payload);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(EmbyError::Api {
                status_code: status.as_u16(),
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> crate::Result<T> {
        let body = self.send(Method::GET, path, query, None).await?;
        let deserializer = &mut serde_json::Deserializer::from_slice(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|e| EmbyError::Json {
            path: e.path().to_string(),
            source: e.into_inner(),
        })
    }
}
