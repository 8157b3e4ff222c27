//! Prediction module - scoring results and their explanation.
//!
//! - `PredictionResult` - probability, decision and threshold
//! - `ThresholdGap` / `RiskBand` - readings relative to the threshold
//! - `FeatureExplanationBuilder` - the complete, ordered feature table

mod explanation;
mod result;

pub use explanation::{
    format_value, FeatureAttribution, FeatureExplanationBuilder, FeatureRow, FeatureTable,
    ImpactDirection, RiskSummary, NEUTRAL_IMPACT_THRESHOLD,
};
pub use result::{
    Decision, GapClass, PredictionResult, RiskBand, ThresholdGap, DEFAULT_THRESHOLD,
};
