//! AnalysisView - everything the results panel renders for one analysis.

use serde::Serialize;

use crate::domain::client::ClientRecord;
use crate::domain::prediction::{
    FeatureExplanationBuilder, FeatureTable, GapClass, PredictionResult, RiskBand, RiskSummary,
    ThresholdGap,
};

/// Prediction plus its derived readings and the complete feature table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisView {
    pub prediction: PredictionResult,
    pub gap: ThresholdGap,
    pub gap_class: GapClass,
    pub risk_band: RiskBand,
    pub features: FeatureTable,
    pub risk_summary: RiskSummary,
}

impl AnalysisView {
    pub fn build(record: &ClientRecord, prediction: &PredictionResult) -> Self {
        let features = FeatureExplanationBuilder::build(prediction.attributions(), record);
        let gap = prediction.gap();
        Self {
            prediction: prediction.clone(),
            gap,
            gap_class: gap.classification(),
            risk_band: prediction.risk_band(),
            risk_summary: features.risk_summary(),
            features,
        }
    }
}
