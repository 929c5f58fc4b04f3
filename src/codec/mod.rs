//! State serialization for the Fair Share Calculator.
//!
//! Calculator state travels in two forms: a short id issued by an opaque
//! share store, and a self-contained legacy query string. This module
//! provides both codecs, the store implementations, the local form cache,
//! and the startup selection policy that chooses between them.

mod backend;
mod cache;
mod http_store;
mod legacy;
mod memory_store;
mod remote;
mod restore;
mod share_id;
mod store;

pub use backend::ShareBackend;
pub use cache::{
    EXPENSE_COUNT_KEY, EXPENSES_KEY, FormCache, INCOME_A_KEY, INCOME_B_KEY, KeyValueCache,
    MemoryCache,
};
pub use http_store::HttpShareStore;
pub use legacy::{
    EXPENSES_PARAM, INCOME_A_PARAM, INCOME_B_PARAM, SHARE_ID_PARAM, build_legacy_url,
    build_share_url, check_input_limits, decode_legacy, decode_legacy_or_default,
    decode_legacy_with_limits, encode_legacy,
};
pub use memory_store::{DEFAULT_MAX_SHARES, MemoryShareStore};
pub use remote::{LinkKind, ShareCodec, ShareLink, decode_body};
pub use restore::{RestoredState, StateSource, restore_state};
pub use share_id::{MAX_SHARE_ID_LEN, ShareId};
pub use store::ShareStore;
