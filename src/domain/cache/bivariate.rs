//! BivariateCacheKeyer - keys and staleness checks for pair analyses.

use super::{CacheKey, CacheScope, CacheStore};
use crate::domain::client::{ClientRecordCodec, Feature};
use crate::domain::population::{PairAnalysis, PopulationDistribution};

/// Payloads that may hold a pair analysis.
pub trait PairPayload {
    fn as_pair(&self) -> Option<&PairAnalysis>;
}

impl PairPayload for PairAnalysis {
    fn as_pair(&self) -> Option<&PairAnalysis> {
        Some(self)
    }
}

/// Builds and validates pair-analysis cache keys.
pub struct BivariateCacheKeyer;

impl BivariateCacheKeyer {
    /// `bivariate_{var1}_{var2}`; argument order is significant.
    pub fn key(var1: Feature, var2: Feature) -> CacheKey {
        CacheKey::new(format!(
            "{}{}_{}",
            CacheScope::Pair.prefix(),
            var1.api_name(),
            var2.api_name()
        ))
    }

    /// A cached payload is valid only for the exact pair it was built for.
    pub fn is_valid_for<T: PairPayload>(payload: &T, var1: Feature, var2: Feature) -> bool {
        payload
            .as_pair()
            .map(|pair| pair.matches(var1, var2))
            .unwrap_or(false)
    }

    /// Returns the cached analysis for `(var1, var2)`.
    ///
    /// A live entry whose stored pair does not match is deleted and
    /// reported as a miss.
    pub fn lookup<T: PairPayload>(
        store: &mut CacheStore<T>,
        var1: Feature,
        var2: Feature,
    ) -> Option<PairAnalysis> {
        let key = Self::key(var1, var2);
        let valid = store
            .get(&key)
            .map(|entry| Self::is_valid_for(&entry.payload, var1, var2))?;

        if !valid {
            tracing::warn!(key = %key, "Discarding pair analysis cached for another pair");
            store.remove(&key);
            return None;
        }

        store
            .get(&key)
            .and_then(|entry| entry.payload.as_pair())
            .cloned()
    }

    /// Zips two independent population samples into an index-aligned pair.
    ///
    /// Both samples are truncated to the shorter length. Values with no
    /// numeric position stay in place as `None`.
    pub fn combine(x: &PopulationDistribution, y: &PopulationDistribution) -> PairAnalysis {
        let n = x.values.len().min(y.values.len());
        if x.values.len() != y.values.len() {
            tracing::debug!(
                var1 = %x.feature,
                var2 = %y.feature,
                len1 = x.values.len(),
                len2 = y.values.len(),
                "Truncating population samples to common length"
            );
        }

        let axis = |sample: &PopulationDistribution| -> Vec<Option<f64>> {
            sample.values[..n]
                .iter()
                .map(|v| ClientRecordCodec::axis_value(v, sample.feature))
                .collect()
        };
        let (x_data, y_data) = (axis(x), axis(y));

        PairAnalysis {
            var1: x.feature,
            var2: y.feature,
            x_data,
            y_data,
        }
    }
}
