//! Paired-variable analysis built from two population samples.

use serde::{Deserialize, Serialize};

use super::{pearson_correlation, percentile_of};
use crate::domain::client::Feature;

/// Two index-aligned samples for a scatter of `var1` against `var2`.
///
/// `None` marks a value with no numeric position; it keeps its index.
///
/// # Invariants
///
/// - `x_data.len() == y_data.len()`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairAnalysis {
    pub var1: Feature,
    pub var2: Feature,
    pub x_data: Vec<Option<f64>>,
    pub y_data: Vec<Option<f64>>,
}

/// Where the client sits within a pair analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairSummary {
    pub correlation: f64,
    pub client_x: f64,
    pub client_y: f64,
    pub percentile_x: f64,
    pub percentile_y: f64,
}

impl PairAnalysis {
    /// Whether this analysis was computed for exactly `(var1, var2)`.
    pub fn matches(&self, var1: Feature, var2: Feature) -> bool {
        self.var1 == var1 && self.var2 == var2
    }

    pub fn len(&self) -> usize {
        self.x_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x_data.is_empty()
    }

    /// Index pairs where both sides are numeric.
    pub fn complete_pairs(&self) -> (Vec<f64>, Vec<f64>) {
        self.x_data
            .iter()
            .zip(&self.y_data)
            .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
            .unzip()
    }

    /// Pearson correlation over complete pairs only.
    pub fn correlation(&self) -> f64 {
        let (x, y) = self.complete_pairs();
        pearson_correlation(&x, &y)
    }

    /// Summarizes the client's position given its axis values.
    ///
    /// Each percentile is taken over that axis' numeric values.
    pub fn summarize(&self, client_x: f64, client_y: f64) -> PairSummary {
        PairSummary {
            correlation: self.correlation(),
            client_x,
            client_y,
            percentile_x: percentile_of(&numeric(&self.x_data), client_x),
            percentile_y: percentile_of(&numeric(&self.y_data), client_y),
        }
    }
}

fn numeric(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().flatten().copied().collect()
}
