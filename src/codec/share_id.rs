//! Share identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Longest accepted share id.
pub const MAX_SHARE_ID_LEN: usize = 100;

/// An opaque identifier issued by the share store.
///
/// Ids are 1 to 100 characters of ASCII letters, digits, `-` and `_`.
///
/// # Example
///
/// ```
/// use fair_share::codec::ShareId;
///
/// assert!(ShareId::parse("test-share-id-123").is_ok());
/// assert!(ShareId::parse("../etc/passwd").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShareId(String);

impl ShareId {
    /// Validates and wraps an id.
    pub fn parse(id: &str) -> Result<Self, StoreError> {
        let well_formed = !id.is_empty()
            && id.len() <= MAX_SHARE_ID_LEN
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if well_formed {
            Ok(Self(id.to_string()))
        } else {
            Err(StoreError::InvalidId {
                id: id.chars().take(MAX_SHARE_ID_LEN).collect(),
            })
        }
    }

    /// The id text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ShareId {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ShareId> for String {
    fn from(id: ShareId) -> Self {
        id.0
    }
}
