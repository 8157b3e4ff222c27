//! Cache lifetime configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Time-to-live per cache family, in seconds
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    #[serde(default = "default_health_ttl")]
    pub health_ttl_secs: u64,

    #[serde(default = "default_population_ttl")]
    pub population_ttl_secs: u64,

    #[serde(default = "default_pair_ttl")]
    pub pair_ttl_secs: u64,

    #[serde(default = "default_stats_ttl")]
    pub stats_ttl_secs: u64,
}

impl CacheConfig {
    /// Validate cache configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let ttls = [
            ("health_ttl_secs", self.health_ttl_secs),
            ("population_ttl_secs", self.population_ttl_secs),
            ("pair_ttl_secs", self.pair_ttl_secs),
            ("stats_ttl_secs", self.stats_ttl_secs),
        ];
        for (name, secs) in ttls {
            if secs == 0 {
                return Err(ValidationError::InvalidTtl(name));
            }
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            health_ttl_secs: default_health_ttl(),
            population_ttl_secs: default_population_ttl(),
            pair_ttl_secs: default_pair_ttl(),
            stats_ttl_secs: default_stats_ttl(),
        }
    }
}

fn default_health_ttl() -> u64 {
    300
}

fn default_population_ttl() -> u64 {
    3600
}

fn default_pair_ttl() -> u64 {
    3600
}

fn default_stats_ttl() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_lifetimes() {
        let config = CacheConfig::default();
        assert_eq!(config.health_ttl_secs, 300);
        assert_eq!(config.population_ttl_secs, 3600);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_ttl() {
        let config = CacheConfig {
            pair_ttl_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTtl("pair_ttl_secs")));
    }
}
