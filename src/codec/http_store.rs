//! Remote share store over HTTP.
//!
//! Talks to a store exposing `POST {base}/share` → `{id}` and
//! `GET {base}/share/{id}` → body, with `{error}` bodies on failure.

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::StoreError;

use super::share_id::ShareId;
use super::store::ShareStore;

#[derive(Debug, Deserialize)]
struct CreatedBody {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// A share store reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpShareStore {
    client: Client,
    base_url: String,
}

impl HttpShareStore {
    /// Creates a store client for `base_url` (trailing slashes are ignored).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a store client reusing an existing HTTP client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// The store's base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn share_url(&self) -> String {
        format!("{}/share", self.base_url)
    }

    fn fetch_url(&self, id: &ShareId) -> String {
        format!("{}/share/{}", self.base_url, urlencoding::encode(id.as_str()))
    }
}

impl ShareStore for HttpShareStore {
    async fn create(&self, body: Value) -> Result<ShareId, StoreError> {
        let url = self.share_url();
        debug!(url = %url, "Publishing share");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(unreachable)?;

        if !response.status().is_success() {
            return Err(rejection(response, None).await);
        }

        let created: CreatedBody = response.json().await.map_err(malformed)?;
        let id = created.id.ok_or_else(|| StoreError::MalformedBody {
            message: "response has no id".to_string(),
        })?;
        ShareId::parse(&id)
    }

    async fn fetch(&self, id: &ShareId) -> Result<Value, StoreError> {
        let url = self.fetch_url(id);
        debug!(url = %url, "Resolving share");

        let response = self.client.get(&url).send().await.map_err(unreachable)?;

        if !response.status().is_success() {
            return Err(rejection(response, Some(id)).await);
        }

        response.json().await.map_err(malformed)
    }
}

fn unreachable(error: reqwest::Error) -> StoreError {
    warn!(error = %error, "Share store unreachable");
    StoreError::Unreachable {
        message: error.to_string(),
    }
}

fn malformed(error: reqwest::Error) -> StoreError {
    StoreError::MalformedBody {
        message: error.to_string(),
    }
}

/// Maps a non-success response to a store error, reading its `{error}` body
/// when there is one.
async fn rejection(response: Response, id: Option<&ShareId>) -> StoreError {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        if let Some(id) = id {
            return StoreError::NotFound { id: id.to_string() };
        }
    }
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error)
        .unwrap_or_else(|| format!("HTTP {}: request failed", status.as_u16()));
    StoreError::Rejected {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let store = HttpShareStore::new("https://share.example.com/");
        assert_eq!(store.base_url(), "https://share.example.com");
        assert_eq!(store.share_url(), "https://share.example.com/share");
    }

    #[test]
    fn test_fetch_url_includes_id() {
        let store = HttpShareStore::new("https://share.example.com");
        let id = ShareId::parse("abc-123").unwrap();
        assert_eq!(store.fetch_url(&id), "https://share.example.com/share/abc-123");
    }

    #[tokio::test]
    async fn test_unreachable_store_reports_unreachable() {
        // Port 9 (discard) on localhost is closed in test environments.
        let store = HttpShareStore::new("http://127.0.0.1:9");
        let id = ShareId::parse("abc").unwrap();
        assert!(matches!(
            store.fetch(&id).await,
            Err(StoreError::Unreachable { .. })
        ));
    }
}
