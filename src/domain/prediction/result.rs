//! PredictionResult and its threshold interpretation.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::FeatureAttribution;
use crate::domain::foundation::ValidationError;

/// Threshold used when the scoring API omits one.
pub const DEFAULT_THRESHOLD: f64 = 0.10;

/// Credit decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Approve,
    Refuse,
}

impl Decision {
    /// Derives the decision from probability and threshold:
    /// REFUSE strictly above the threshold.
    pub fn from_probability(probability: f64, threshold: f64) -> Self {
        if probability > threshold {
            Decision::Refuse
        } else {
            Decision::Approve
        }
    }

    /// Parses the API decision string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "APPROVE" => Some(Decision::Approve),
            "REFUSE" => Some(Decision::Refuse),
            _ => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Decision::Approve => "APPROVE",
            Decision::Refuse => "REFUSE",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of one successful analysis.
///
/// # Invariants
///
/// - `probability` and `threshold` are in [0, 1]
/// - Replaced as a whole on each analysis, never patched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    probability: f64,
    decision: Decision,
    decision_label: String,
    risk_level: String,
    threshold: f64,
    /// Ranked attributions as returned by the scoring API.
    attributions: Vec<FeatureAttribution>,
}

impl PredictionResult {
    /// Creates a validated prediction result.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if probability or threshold is outside [0, 1]
    pub fn new(
        probability: f64,
        decision: Decision,
        decision_label: impl Into<String>,
        risk_level: impl Into<String>,
        threshold: f64,
        attributions: Vec<FeatureAttribution>,
    ) -> Result<Self, ValidationError> {
        ValidationError::check_range("probability", 0.0, 1.0, probability)?;
        ValidationError::check_range("threshold", 0.0, 1.0, threshold)?;

        Ok(Self {
            probability,
            decision,
            decision_label: decision_label.into(),
            risk_level: risk_level.into(),
            threshold,
            attributions,
        })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }

    pub fn decision_label(&self) -> &str {
        &self.decision_label
    }

    pub fn risk_level(&self) -> &str {
        &self.risk_level
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Ranked attributions (at most the API's top-k).
    pub fn attributions(&self) -> &[FeatureAttribution] {
        &self.attributions
    }

    /// Distance from the threshold in percentage points.
    pub fn gap(&self) -> ThresholdGap {
        ThresholdGap::between(self.probability, self.threshold)
    }

    /// Gauge band the probability falls into.
    pub fn risk_band(&self) -> RiskBand {
        RiskBand::classify(self.probability, self.threshold)
    }
}

/// Signed distance between probability and threshold, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdGap {
    /// `(probability - threshold) * 100`; negative means below threshold.
    pub points: f64,
}

/// Qualitative reading of a [`ThresholdGap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GapClass {
    /// Within one point of the threshold; the decision is sensitive.
    NearThreshold,
    /// More than five points below.
    WellBelow,
    Below,
    Above,
    /// More than five points above.
    WellAbove,
}

impl ThresholdGap {
    pub fn between(probability: f64, threshold: f64) -> Self {
        Self {
            points: probability * 100.0 - threshold * 100.0,
        }
    }

    /// Absolute distance in points.
    pub fn magnitude(&self) -> f64 {
        self.points.abs()
    }

    pub fn is_below(&self) -> bool {
        self.points < 0.0
    }

    pub fn classification(&self) -> GapClass {
        if self.points.abs() < 1.0 {
            GapClass::NearThreshold
        } else if self.points < -5.0 {
            GapClass::WellBelow
        } else if self.points > 5.0 {
            GapClass::WellAbove
        } else if self.points < 0.0 {
            GapClass::Below
        } else {
            GapClass::Above
        }
    }
}

impl fmt::Display for ThresholdGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+.2} points", self.points)
    }
}

impl GapClass {
    pub fn description(&self) -> &'static str {
        match self {
            GapClass::NearThreshold => "close to threshold",
            GapClass::WellBelow => "well below threshold",
            GapClass::Below => "below threshold",
            GapClass::Above => "above threshold",
            GapClass::WellAbove => "well above threshold",
        }
    }
}

/// Gauge band relative to the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    /// Below the threshold.
    Acceptable,
    /// Up to 2.5x the threshold.
    Moderate,
    /// Up to 5x the threshold.
    High,
    VeryHigh,
}

impl RiskBand {
    pub fn classify(probability: f64, threshold: f64) -> Self {
        let p = probability * 100.0;
        let t = threshold * 100.0;
        if p < t {
            RiskBand::Acceptable
        } else if p < (t * 2.5).min(100.0) {
            RiskBand::Moderate
        } else if p < (t * 5.0).min(100.0) {
            RiskBand::High
        } else {
            RiskBand::VeryHigh
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(probability: f64, threshold: f64) -> PredictionResult {
        PredictionResult::new(
            probability,
            Decision::from_probability(probability, threshold),
            "",
            "Low",
            threshold,
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn low_probability_is_approved_seven_points_below() {
        let r = result(0.03, 0.10);
        let gap = r.gap();

        assert_eq!(r.decision(), Decision::Approve);
        assert!(gap.is_below());
        assert!((gap.magnitude() - 7.0).abs() < 1e-9);
        assert_eq!(gap.classification(), GapClass::WellBelow);
    }

    #[test]
    fn high_probability_is_refused_well_above() {
        let r = result(0.35, 0.10);

        assert_eq!(r.decision(), Decision::Refuse);
        assert!((r.gap().points - 25.0).abs() < 1e-9);
        assert_eq!(r.gap().classification(), GapClass::WellAbove);
    }

    #[test]
    fn gap_classification_boundaries() {
        assert_eq!(ThresholdGap { points: 0.5 }.classification(), GapClass::NearThreshold);
        assert_eq!(ThresholdGap { points: -0.99 }.classification(), GapClass::NearThreshold);
        assert_eq!(ThresholdGap { points: -3.0 }.classification(), GapClass::Below);
        assert_eq!(ThresholdGap { points: 3.0 }.classification(), GapClass::Above);
        assert_eq!(ThresholdGap { points: 5.0 }.classification(), GapClass::Above);
        assert_eq!(ThresholdGap { points: -5.01 }.classification(), GapClass::WellBelow);
    }

    #[test]
    fn probability_equal_to_threshold_is_approved() {
        assert_eq!(Decision::from_probability(0.1, 0.1), Decision::Approve);
    }

    #[test]
    fn new_rejects_probability_out_of_range() {
        let err = PredictionResult::new(1.2, Decision::Refuse, "", "", 0.1, vec![]).unwrap_err();
        assert_eq!(err, ValidationError::out_of_range("probability", 0.0, 1.0, 1.2));
    }

    #[test]
    fn risk_bands_scale_with_threshold() {
        assert_eq!(RiskBand::classify(0.05, 0.10), RiskBand::Acceptable);
        assert_eq!(RiskBand::classify(0.20, 0.10), RiskBand::Moderate);
        assert_eq!(RiskBand::classify(0.40, 0.10), RiskBand::High);
        assert_eq!(RiskBand::classify(0.60, 0.10), RiskBand::VeryHigh);
    }

    #[test]
    fn decision_serializes_in_api_casing() {
        assert_eq!(serde_json::to_string(&Decision::Refuse).unwrap(), "\"REFUSE\"");
        assert_eq!(Decision::parse("APPROVE"), Some(Decision::Approve));
        assert_eq!(Decision::parse("MAYBE"), None);
    }

    #[test]
    fn gap_displays_signed_points() {
        assert_eq!(ThresholdGap { points: -7.0 }.to_string(), "-7.00 points");
        assert_eq!(ThresholdGap { points: 25.0 }.to_string(), "+25.00 points");
    }
}
