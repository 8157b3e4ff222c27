//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CREDIT_DASHBOARD` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use credit_dashboard::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Scoring API at {}", config.api.base_url);
//! ```

mod api;
mod cache;
mod error;
mod logging;

pub use api::ApiConfig;
pub use cache::CacheConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment loads.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Scoring API endpoint and timeouts
    #[serde(default)]
    pub api: ApiConfig,

    /// Cache lifetimes per family
    #[serde(default)]
    pub cache: CacheConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CREDIT_DASHBOARD` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CREDIT_DASHBOARD__API__BASE_URL=...` -> `api.base_url = ...`
    /// - `CREDIT_DASHBOARD__CACHE__POPULATION_TTL_SECS=600` -> `cache.population_ttl_secs = 600`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CREDIT_DASHBOARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a non-http(s) base URL, a zero timeout,
    /// a zero TTL or a malformed log filter.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate()?;
        self.cache.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 4] = [
        "CREDIT_DASHBOARD__API__BASE_URL",
        "CREDIT_DASHBOARD__API__PREDICTION_TIMEOUT_SECS",
        "CREDIT_DASHBOARD__CACHE__POPULATION_TTL_SECS",
        "CREDIT_DASHBOARD__LOGGING__JSON",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.api.health_timeout_secs, 10);
        assert_eq!(config.cache.stats_ttl_secs, 300);
        assert!(!config.logging.json);
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CREDIT_DASHBOARD__API__BASE_URL", "http://localhost:8000");
        env::set_var("CREDIT_DASHBOARD__API__PREDICTION_TIMEOUT_SECS", "45");
        env::set_var("CREDIT_DASHBOARD__CACHE__POPULATION_TTL_SECS", "600");
        env::set_var("CREDIT_DASHBOARD__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.prediction_timeout_secs, 45);
        assert_eq!(config.cache.population_ttl_secs, 600);
        assert!(config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CREDIT_DASHBOARD__API__BASE_URL", "scoring.local");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(config.validate(), Err(ValidationError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }
}
