//! Startup state selection.
//!
//! When a page opens, its state comes from the first source that works:
//!
//! 1. an `id` parameter resolved through the share store;
//! 2. a legacy `salary1`/`salary2`/`expenses` query;
//! 3. the local form cache;
//! 4. the default empty state.
//!
//! A store failure moves on to the legacy query. A legacy decode failure
//! yields the default state. Every failure is logged and reported in the
//! [`RestoredState`]; none is raised to the caller.

use serde::Serialize;
use tracing::{debug, warn};

use crate::calculation::has_computable_values;
use crate::config::LimitsConfig;
use crate::error::{DecodeError, StoreError};
use crate::models::ShareInput;

use super::cache::{FormCache, KeyValueCache};
use super::legacy::{SHARE_ID_PARAM, decode_legacy_with_limits, parse_query};
use super::remote::ShareCodec;
use super::share_id::ShareId;
use super::store::ShareStore;

/// Where restored state came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateSource {
    /// Resolved from the share store.
    Remote,
    /// Decoded from a legacy query string.
    Legacy,
    /// Loaded from the local form cache.
    Cache,
    /// Nothing usable; the empty state.
    Default,
}

/// The outcome of restoring state for a page reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoredState {
    /// The restored input.
    pub input: ShareInput,
    /// Which source it came from.
    pub source: StateSource,
    /// True if the input can be computed as-is, so a results view can be
    /// shown straight away.
    pub computable: bool,
    /// The store failure, if an id was present but could not be resolved.
    pub store_error: Option<StoreError>,
    /// The legacy decode failure, if a legacy query was present but invalid.
    pub decode_error: Option<DecodeError>,
}

/// Restores state for a page reference (a URL or query string).
///
/// Pass `None` for `cache` when no local cache is available.
pub async fn restore_state<S, C>(
    reference: &str,
    codec: &ShareCodec<S>,
    cache: Option<&mut FormCache<C>>,
    limits: &LimitsConfig,
) -> RestoredState
where
    S: ShareStore,
    C: KeyValueCache,
{
    let params = parse_query(reference);
    let mut store_error = None;

    if let Some(raw_id) = params.get(SHARE_ID_PARAM).filter(|id| !id.is_empty()) {
        let resolved = match ShareId::parse(raw_id) {
            Ok(id) => codec.resolve(&id).await,
            Err(error) => Err(error),
        };
        match resolved {
            Ok(input) => return finish(input, StateSource::Remote, limits, None, None),
            Err(error) => {
                warn!(error = %error, "Failed to resolve share id, trying legacy link");
                store_error = Some(error);
            }
        }
    }

    match decode_legacy_with_limits(reference, limits) {
        Ok(Some(input)) => return finish(input, StateSource::Legacy, limits, store_error, None),
        Ok(None) => {}
        Err(error) => {
            warn!(error = %error, "Failed to decode legacy link, using default state");
            return finish(
                ShareInput::default(),
                StateSource::Default,
                limits,
                store_error,
                Some(error),
            );
        }
    }

    if let Some(input) = cache.and_then(|cache| cache.load()) {
        return finish(input, StateSource::Cache, limits, store_error, None);
    }

    finish(
        ShareInput::default(),
        StateSource::Default,
        limits,
        store_error,
        None,
    )
}

fn finish(
    input: ShareInput,
    source: StateSource,
    limits: &LimitsConfig,
    store_error: Option<StoreError>,
    decode_error: Option<DecodeError>,
) -> RestoredState {
    let computable = has_computable_values(&input, limits);
    debug!(source = ?source, computable, "State restored");
    RestoredState {
        input,
        source,
        computable,
        store_error,
        decode_error,
    }
}
