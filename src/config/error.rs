//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid scoring API URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Timeout must be positive: {0}")]
    InvalidTimeout(&'static str),

    #[error("Cache TTL must be positive: {0}")]
    InvalidTtl(&'static str),

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
