//! In-process share store.
//!
//! [`MemoryShareStore`] keeps share bodies in memory for a fixed time to
//! live. It backs the `/share` endpoints served by this crate and stands in
//! for a remote store in tests.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, TimeDelta, Utc};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::StoreError;

use super::share_id::ShareId;
use super::store::ShareStore;

#[derive(Debug, Clone)]
struct StoredShare {
    body: Value,
    expires_at: DateTime<Utc>,
}

/// A share store held in process memory.
///
/// Ids are random UUIDs in simple (hex) form. Expired entries read as not
/// found and are dropped on access and on every insert. A store at capacity
/// rejects new shares with status 503.
#[derive(Debug)]
pub struct MemoryShareStore {
    shares: RwLock<HashMap<String, StoredShare>>,
    ttl: TimeDelta,
    max_entries: usize,
}

/// Default capacity of a [`MemoryShareStore`].
pub const DEFAULT_MAX_SHARES: usize = 100_000;

impl MemoryShareStore {
    /// Creates an empty store whose entries live for `ttl`.
    pub fn new(ttl: TimeDelta) -> Self {
        Self {
            shares: RwLock::new(HashMap::new()),
            ttl,
            max_entries: DEFAULT_MAX_SHARES,
        }
    }

    /// Sets how many live shares the store holds at once.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Creates a store with a time to live in hours. Non-positive values
    /// fall back to one hour.
    pub fn with_ttl_hours(hours: i64) -> Self {
        Self::new(TimeDelta::try_hours(hours.max(1)).unwrap_or(TimeDelta::MAX))
    }

    /// Number of stored entries, expired ones included until next access.
    pub fn len(&self) -> usize {
        self.shares.read().map(|shares| shares.len()).unwrap_or(0)
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now())
    }

    fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let Ok(mut shares) = self.shares.write() else {
            return 0;
        };
        let before = shares.len();
        shares.retain(|_, share| share.expires_at > now);
        before - shares.len()
    }

    fn insert_at(&self, body: Value, now: DateTime<Utc>) -> Result<ShareId, StoreError> {
        if !body.is_object() {
            return Err(StoreError::Rejected {
                status: 400,
                message: "Share body must be a JSON object".to_string(),
            });
        }
        let id = ShareId::parse(&Uuid::new_v4().simple().to_string())?;
        let expires_at = now.checked_add_signed(self.ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);
        let mut shares = self.shares.write().map_err(|_| lock_poisoned())?;
        if shares.len() >= self.max_entries {
            let before = shares.len();
            shares.retain(|_, share| share.expires_at > now);
            debug!(purged = before - shares.len(), "Expired shares purged");
        }
        if shares.len() >= self.max_entries {
            warn!(max_entries = self.max_entries, "Share store is full");
            return Err(StoreError::Rejected {
                status: 503,
                message: "Share store is full".to_string(),
            });
        }
        shares.insert(id.as_str().to_string(), StoredShare { body, expires_at });
        debug!(share_id = %id, "Share stored");
        Ok(id)
    }

    fn get_at(&self, id: &ShareId, now: DateTime<Utc>) -> Result<Value, StoreError> {
        let found = {
            let shares = self.shares.read().map_err(|_| lock_poisoned())?;
            shares.get(id.as_str()).cloned()
        };
        match found {
            Some(share) if share.expires_at > now => Ok(share.body),
            Some(_) => {
                if let Ok(mut shares) = self.shares.write() {
                    shares.remove(id.as_str());
                }
                debug!(share_id = %id, "Share expired");
                Err(not_found(id))
            }
            None => Err(not_found(id)),
        }
    }
}

impl Default for MemoryShareStore {
    fn default() -> Self {
        Self::with_ttl_hours(24 * 30)
    }
}

impl ShareStore for MemoryShareStore {
    async fn create(&self, body: Value) -> Result<ShareId, StoreError> {
        self.insert_at(body, Utc::now())
    }

    async fn fetch(&self, id: &ShareId) -> Result<Value, StoreError> {
        self.get_at(id, Utc::now())
    }
}

fn not_found(id: &ShareId) -> StoreError {
    StoreError::NotFound {
        id: id.to_string(),
    }
}

fn lock_poisoned() -> StoreError {
    StoreError::Unreachable {
        message: "share store lock poisoned".to_string(),
    }
}
