//! The opaque share store seam.
//!
//! A store turns a JSON state body into a short id and back. It knows
//! nothing about the calculator; decoding the body is the codec's job.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use crate::error::StoreError;

use super::share_id::ShareId;

/// Key-value storage for share bodies.
///
/// Implementations report each failure mode as its own [`StoreError`]
/// variant; none is reported as an empty body.
pub trait ShareStore: Send + Sync {
    /// Stores a body and returns the id the store assigned to it.
    fn create(&self, body: Value) -> impl Future<Output = Result<ShareId, StoreError>> + Send;

    /// Fetches the body stored under `id`.
    fn fetch(&self, id: &ShareId) -> impl Future<Output = Result<Value, StoreError>> + Send;
}

impl<S: ShareStore> ShareStore for Arc<S> {
    fn create(&self, body: Value) -> impl Future<Output = Result<ShareId, StoreError>> + Send {
        (**self).create(body)
    }

    fn fetch(&self, id: &ShareId) -> impl Future<Output = Result<Value, StoreError>> + Send {
        (**self).fetch(id)
    }
}
