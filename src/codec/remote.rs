//! Store-backed sharing.
//!
//! [`ShareCodec`] publishes a [`ShareInput`] to a [`ShareStore`] and
//! resolves ids back into inputs, checking that the stored body really is a
//! share state.

use serde_json::Value;
use tracing::{info, warn};

use crate::error::StoreError;
use crate::models::ShareInput;

use super::legacy::{build_legacy_url, build_share_url};
use super::share_id::ShareId;
use super::store::ShareStore;

/// Which form a share link took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// `?id=…` link backed by the store.
    Short,
    /// Self-contained legacy link.
    Legacy,
}

/// A shareable link and how it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    /// The full URL.
    pub url: String,
    /// The link form.
    pub kind: LinkKind,
    /// The store id, for short links.
    pub id: Option<ShareId>,
    /// Why the store was not used, for legacy links.
    pub store_error: Option<StoreError>,
}

/// Publishes and resolves share state through a store.
#[derive(Debug, Clone)]
pub struct ShareCodec<S> {
    store: S,
}

impl<S: ShareStore> ShareCodec<S> {
    /// Wraps a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stores an input and returns its id.
    ///
    /// Every call creates a new share; identical inputs are not
    /// deduplicated.
    pub async fn publish(&self, input: &ShareInput) -> Result<ShareId, StoreError> {
        let body = serde_json::to_value(input).map_err(|e| StoreError::MalformedBody {
            message: e.to_string(),
        })?;
        let id = self.store.create(body).await?;
        info!(share_id = %id, expenses = input.expenses.len(), "Share published");
        Ok(id)
    }

    /// Fetches and decodes the input stored under `id`.
    pub async fn resolve(&self, id: &ShareId) -> Result<ShareInput, StoreError> {
        let body = self.store.fetch(id).await?;
        decode_body(body)
    }

    /// Publishes an input and returns a short link on `page_url`, falling
    /// back to a legacy link if the store fails.
    pub async fn share_link(&self, page_url: &str, input: &ShareInput) -> ShareLink {
        match self.publish(input).await {
            Ok(id) => ShareLink {
                url: build_share_url(page_url, &id),
                kind: LinkKind::Short,
                id: Some(id),
                store_error: None,
            },
            Err(error) => {
                warn!(error = %error, "Share store failed, falling back to legacy link");
                ShareLink {
                    url: build_legacy_url(page_url, input),
                    kind: LinkKind::Legacy,
                    id: None,
                    store_error: Some(error),
                }
            }
        }
    }
}

/// Decodes a stored body, reporting missing or mistyped fields as
/// `MalformedBody`.
pub fn decode_body(body: Value) -> Result<ShareInput, StoreError> {
    if !body.is_object() {
        return Err(StoreError::MalformedBody {
            message: "share body is not a JSON object".to_string(),
        });
    }
    serde_json::from_value(body).map_err(|e| StoreError::MalformedBody {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::MemoryShareStore;
    use crate::models::ExpenseEntry;
    use serde_json::json;
    use std::future::Future;

    /// A store that is never reachable.
    struct OfflineStore;

    impl ShareStore for OfflineStore {
        fn create(&self, _body: Value) -> impl Future<Output = Result<ShareId, StoreError>> + Send {
            async {
                Err(StoreError::Unreachable {
                    message: "offline".to_string(),
                })
            }
        }

        fn fetch(&self, _id: &ShareId) -> impl Future<Output = Result<Value, StoreError>> + Send {
            async {
                Err(StoreError::Unreachable {
                    message: "offline".to_string(),
                })
            }
        }
    }

    fn sample_input() -> ShareInput {
        ShareInput::new("50000", "30000", vec![ExpenseEntry::new("1000", "Rent")])
    }

    #[tokio::test]
    async fn test_publish_then_resolve_round_trips() {
        let codec = ShareCodec::new(MemoryShareStore::default());
        let id = codec.publish(&sample_input()).await.unwrap();
        assert_eq!(codec.resolve(&id).await.unwrap(), sample_input());
    }

    #[tokio::test]
    async fn test_publish_twice_gives_distinct_ids() {
        let codec = ShareCodec::new(MemoryShareStore::default());
        let first = codec.publish(&sample_input()).await.unwrap();
        let second = codec.publish(&sample_input()).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_resolve_unknown_id_is_not_found() {
        let codec = ShareCodec::new(MemoryShareStore::default());
        let id = ShareId::parse("nope").unwrap();
        assert!(matches!(
            codec.resolve(&id).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_resolve_body_missing_fields_is_malformed() {
        let store = MemoryShareStore::default();
        let id = store.create(json!({"salary1": "1"})).await.unwrap();
        let codec = ShareCodec::new(store);
        match codec.resolve(&id).await {
            Err(StoreError::MalformedBody { message }) => assert!(message.contains("salary2")),
            other => panic!("expected malformed body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_store_is_reported() {
        let codec = ShareCodec::new(OfflineStore);
        assert!(matches!(
            codec.publish(&sample_input()).await,
            Err(StoreError::Unreachable { .. })
        ));
    }

    #[tokio::test]
    async fn test_share_link_is_short_when_store_works() {
        let codec = ShareCodec::new(MemoryShareStore::default());
        let link = codec
            .share_link("https://fairshare.example.com/", &sample_input())
            .await;
        assert_eq!(link.kind, LinkKind::Short);
        let id = link.id.unwrap();
        assert_eq!(link.url, format!("https://fairshare.example.com/?id={}", id));
    }

    #[tokio::test]
    async fn test_share_link_falls_back_to_legacy() {
        let codec = ShareCodec::new(OfflineStore);
        let link = codec
            .share_link("https://fairshare.example.com/", &sample_input())
            .await;
        assert_eq!(link.kind, LinkKind::Legacy);
        assert!(link.url.starts_with("https://fairshare.example.com/?salary1=50000"));
        assert!(matches!(link.store_error, Some(StoreError::Unreachable { .. })));
    }

    #[test]
    fn test_decode_body_rejects_non_object() {
        assert!(matches!(
            decode_body(json!("text")),
            Err(StoreError::MalformedBody { .. })
        ));
    }
}
