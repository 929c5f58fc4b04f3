//! Application state for the Fair Share API.

use std::sync::Arc;

use crate::calculation::Calculator;
use crate::codec::{ShareBackend, ShareCodec};
use crate::config::AppConfig;

/// Shared application state.
///
/// Holds the configuration, the rate-limited calculator and the share
/// store behind the `/share` endpoints.
#[derive(Clone)]
pub struct AppState {
    config: Arc<AppConfig>,
    calculator: Arc<Calculator>,
    codec: Arc<ShareCodec<ShareBackend>>,
}

impl AppState {
    /// Creates application state from a configuration.
    pub fn new(config: AppConfig) -> Self {
        let calculator = Calculator::new(&config);
        let store = ShareBackend::from_config(&config.store);
        Self {
            config: Arc::new(config),
            calculator: Arc::new(calculator),
            codec: Arc::new(ShareCodec::new(store)),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the calculator.
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Returns the share codec backed by the configured store.
    pub fn codec(&self) -> &ShareCodec<ShareBackend> {
        &self.codec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_one_store() {
        let state = AppState::new(AppConfig::default());
        let other = state.clone();
        assert!(std::ptr::eq(state.codec().store(), other.codec().store()));
    }

    #[test]
    fn test_base_url_routes_shares_to_remote_store() {
        let mut config = AppConfig::default();
        config.store.base_url = Some("http://127.0.0.1:9/".to_string());
        let state = AppState::new(config);
        assert!(state.codec().store().is_remote());
    }
}
