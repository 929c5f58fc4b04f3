//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the
//! application configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{FairShareError, FairShareResult};

use super::types::AppConfig;

/// Loads and provides access to the application configuration.
///
/// # File Format
///
/// ```yaml
/// limits:
///   max_amount: "1000000000"
///   max_expenses: 50
/// rate_limit:
///   min_interval_ms: 100
///   max_tracked_callers: 10000
/// store:
///   base_url: "https://share.example.com"
///   max_shares: 100000
/// server:
///   bind: "0.0.0.0:8080"
///   public_url: "https://fairshare.example.com/"
/// ```
///
/// Any omitted section or key takes its default.
///
/// # Example
///
/// ```no_run
/// use fair_share::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./fair-share.yaml")?;
/// println!("Max expenses: {}", loader.config().limits.max_expenses);
/// # Ok::<(), fair_share::error::FairShareError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// Returns `ConfigNotFound` if the file cannot be read and
    /// `ConfigParseError` if it is not valid configuration YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> FairShareResult<Self> {
        let config = Self::load_yaml::<AppConfig>(path.as_ref())?;
        Ok(Self { config })
    }

    /// Parses configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> FairShareResult<Self> {
        let config = Self::parse_yaml(content, "<inline>")?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> FairShareResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| FairShareError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse_yaml(&content, &path_str)
    }

    fn parse_yaml<T: serde::de::DeserializeOwned>(content: &str, path: &str) -> FairShareResult<T> {
        serde_yaml::from_str(content).map_err(|e| FairShareError::ConfigParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::Write;

    #[test]
    fn test_load_missing_file_returns_config_not_found() {
        let result = ConfigLoader::load("/nonexistent/fair-share.yaml");
        assert!(matches!(
            result,
            Err(FairShareError::ConfigNotFound { path }) if path.contains("fair-share.yaml")
        ));
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let loader = ConfigLoader::from_yaml_str("{}").unwrap();
        assert_eq!(loader.config(), &AppConfig::default());
        assert_eq!(loader.config().limits.max_expenses, 50);
        assert_eq!(loader.config().rate_limit.min_interval_ms, 100);
    }

    #[test]
    fn test_partial_document_overrides_only_given_keys() {
        let yaml = r#"
limits:
  max_amount: "5000"
rate_limit:
  min_interval_ms: 0
store:
  base_url: "https://share.example.com"
"#;
        let config = ConfigLoader::from_yaml_str(yaml).unwrap().into_config();
        assert_eq!(config.limits.max_amount, Decimal::new(5000, 0));
        assert_eq!(config.limits.max_label_chars, 1000);
        assert_eq!(config.rate_limit.min_interval_ms, 0);
        assert_eq!(
            config.store.base_url.as_deref(),
            Some("https://share.example.com")
        );
        assert_eq!(config.server.bind, "127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let result = ConfigLoader::from_yaml_str("limits: [unclosed");
        assert!(matches!(
            result,
            Err(FairShareError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_wrong_type_returns_parse_error() {
        let result = ConfigLoader::from_yaml_str("rate_limit:\n  min_interval_ms: soon\n");
        assert!(matches!(
            result,
            Err(FairShareError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_bundled_config_matches_defaults() {
        let loader = ConfigLoader::load("./fair-share.yaml").unwrap();
        assert_eq!(loader.config(), &AppConfig::default());
    }

    #[test]
    fn test_load_reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "fair-share-config-{}.yaml",
            uuid::Uuid::new_v4()
        ));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "server:\n  bind: \"0.0.0.0:9000\"").unwrap();

        let loader = ConfigLoader::load(&path).unwrap();
        assert_eq!(loader.config().server.bind, "0.0.0.0:9000");

        fs::remove_file(&path).unwrap();
    }
}
