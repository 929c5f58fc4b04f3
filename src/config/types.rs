//! Configuration types for the Fair Share Calculator.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section has
//! defaults, so a partial file (or none at all) is valid.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Bounds applied when parsing user-entered and linked state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest accepted income or expense amount.
    pub max_amount: Decimal,
    /// Labels longer than this are truncated.
    pub max_label_chars: usize,
    /// Longest accepted income text in a legacy link.
    pub max_income_chars: usize,
    /// Largest expense array accepted from a legacy link or the cache.
    pub max_expenses: usize,
    /// Longest accepted JSON expenses payload in a legacy link or the cache.
    pub max_expenses_payload_chars: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_amount: Decimal::new(1_000_000_000, 0),
            max_label_chars: 1000,
            max_income_chars: 1000,
            max_expenses: 50,
            max_expenses_payload_chars: 10_000,
        }
    }
}

/// Rapid-fire calculation guard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Minimum milliseconds between two accepted calculations from the
    /// same caller; 0 disables.
    pub min_interval_ms: u64,
    /// Most callers whose windows the server tracks at once.
    pub max_tracked_callers: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: 100,
            max_tracked_callers: 10_000,
        }
    }
}

/// Share store settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL of a remote share store. When set, the `/share` endpoints
    /// forward to it instead of keeping shares in memory.
    pub base_url: Option<String>,
    /// How long the in-memory store keeps a share, in hours.
    pub share_ttl_hours: i64,
    /// Most shares the in-memory store holds at once.
    pub max_shares: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            share_ttl_hours: 24 * 30,
            max_shares: 100_000,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind.
    pub bind: String,
    /// Public page URL that share links are built on.
    pub public_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            public_url: "http://127.0.0.1:8080/".to_string(),
        }
    }
}

/// The complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Parsing bounds.
    pub limits: LimitsConfig,
    /// Calculation rate limit.
    pub rate_limit: RateLimitConfig,
    /// Share store settings.
    pub store: StoreConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
}
