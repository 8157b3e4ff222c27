//! Scoring API configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Scoring API endpoint and per-endpoint timeouts
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the scoring service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_health_timeout")]
    pub health_timeout_secs: u64,

    #[serde(default = "default_prediction_timeout")]
    pub prediction_timeout_secs: u64,

    #[serde(default = "default_population_timeout")]
    pub population_timeout_secs: u64,

    /// Timeout for each fetch of a pair analysis
    #[serde(default = "default_pair_timeout")]
    pub pair_timeout_secs: u64,
}

impl ApiConfig {
    /// Validate API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let url = self.base_url.trim();
        let has_host = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .map(|rest| !rest.is_empty())
            .unwrap_or(false);
        if !has_host {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }

        let timeouts = [
            ("health_timeout_secs", self.health_timeout_secs),
            ("prediction_timeout_secs", self.prediction_timeout_secs),
            ("population_timeout_secs", self.population_timeout_secs),
            ("pair_timeout_secs", self.pair_timeout_secs),
        ];
        for (name, secs) in timeouts {
            if secs == 0 {
                return Err(ValidationError::InvalidTimeout(name));
            }
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            health_timeout_secs: default_health_timeout(),
            prediction_timeout_secs: default_prediction_timeout(),
            population_timeout_secs: default_population_timeout(),
            pair_timeout_secs: default_pair_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://dashboard-credit-scoring-production.up.railway.app".to_string()
}

fn default_health_timeout() -> u64 {
    10
}

fn default_prediction_timeout() -> u64 {
    30
}

fn default_population_timeout() -> u64 {
    15
}

fn default_pair_timeout() -> u64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ApiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.prediction_timeout_secs, 30);
    }

    #[test]
    fn rejects_non_http_url() {
        let config = ApiConfig {
            base_url: "ftp://scoring.example.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidBaseUrl(_))));
    }

    #[test]
    fn rejects_scheme_without_host() {
        let config = ApiConfig {
            base_url: "http://".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = ApiConfig {
            health_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidTimeout("health_timeout_secs"))
        );
    }
}
