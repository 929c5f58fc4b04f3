//! Configuration loading and management for the Fair Share Calculator.
//!
//! This module provides functionality to load the application configuration
//! from a YAML file: parsing limits, the calculation rate limit, share store
//! settings, and server settings.
//!
//! # Example
//!
//! ```no_run
//! use fair_share::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./fair-share.yaml").unwrap();
//! println!("Binding to {}", config.config().server.bind);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, LimitsConfig, RateLimitConfig, ServerConfig, StoreConfig};
