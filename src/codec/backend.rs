//! Share store selected from configuration.

use serde_json::Value;
use tracing::info;

use crate::config::StoreConfig;
use crate::error::StoreError;

use super::http_store::HttpShareStore;
use super::memory_store::MemoryShareStore;
use super::share_id::ShareId;
use super::store::ShareStore;

/// The store behind the server's `/share` endpoints.
///
/// Shares live in process memory unless `store.base_url` names a remote
/// store, in which case every request is forwarded there.
#[derive(Debug)]
pub enum ShareBackend {
    Memory(MemoryShareStore),
    Remote(HttpShareStore),
}

impl ShareBackend {
    /// Builds the backend named by the store configuration.
    ///
    /// A blank `base_url` counts as unset.
    pub fn from_config(config: &StoreConfig) -> Self {
        match config.base_url.as_deref().map(str::trim) {
            Some(base_url) if !base_url.is_empty() => {
                info!(base_url = %base_url, "Forwarding shares to remote store");
                Self::Remote(HttpShareStore::new(base_url))
            }
            _ => Self::Memory(
                MemoryShareStore::with_ttl_hours(config.share_ttl_hours)
                    .with_max_entries(config.max_shares),
            ),
        }
    }

    /// True if shares are forwarded to a remote store.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl ShareStore for ShareBackend {
    async fn create(&self, body: Value) -> Result<ShareId, StoreError> {
        match self {
            Self::Memory(store) => store.create(body).await,
            Self::Remote(store) => store.create(body).await,
        }
    }

    async fn fetch(&self, id: &ShareId) -> Result<Value, StoreError> {
        match self {
            Self::Memory(store) => store.fetch(id).await,
            Self::Remote(store) => store.fetch(id).await,
        }
    }
}
