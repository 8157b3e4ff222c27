//! Population samples returned by the scoring API.

use serde::{Deserialize, Serialize};

use crate::domain::client::{ClientRecordCodec, Feature, FeatureValue};

/// Full population sample for one feature, in API-native values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationDistribution {
    pub feature: Feature,
    pub values: Vec<FeatureValue>,
}

impl PopulationDistribution {
    pub fn new(feature: Feature, values: Vec<FeatureValue>) -> Self {
        Self { feature, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values converted for display, e.g. boolean education as 0/1.
    pub fn display_values(&self) -> Vec<FeatureValue> {
        ClientRecordCodec::from_api_values(&self.values, self.feature)
    }

    /// Numeric positions for binning; values without one are skipped.
    pub fn axis_values(&self) -> Vec<f64> {
        self.values
            .iter()
            .filter_map(|v| ClientRecordCodec::axis_value(v, self.feature))
            .collect()
    }

    /// Histogram bin count for this feature.
    pub fn histogram_bins(&self) -> usize {
        self.feature.histogram_bins()
    }
}

/// Aggregate population statistics, passed through as returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PopulationStats(pub serde_json::Value);

impl PopulationStats {
    /// Looks up a top-level statistic.
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.get(name)
    }
}
