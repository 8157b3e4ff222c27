//! FeatureExplanationBuilder - merges ranked attributions into a complete
//! feature table.
//!
//! The scoring API ranks only its top-k features. The dashboard always
//! shows all ten, so absent features are synthesized as neutral rows.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::domain::client::{
    ApiPayload, ClientRecord, ClientRecordCodec, Feature, FeatureFamily, FeatureValue, Gender,
    FEATURE_COUNT,
};

/// Impacts with a magnitude at or below this are neutral.
pub const NEUTRAL_IMPACT_THRESHOLD: f64 = 1e-3;

/// Number of features named on each side of the risk summary.
const SUMMARY_SIZE: usize = 3;

/// Signed contribution of one feature to the prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureAttribution {
    pub feature_name: String,
    /// Positive pushes towards refusal, negative towards approval.
    pub impact: f64,
    /// Whether the scoring API ranked this feature.
    pub in_top_k: bool,
}

impl FeatureAttribution {
    /// An attribution ranked by the scoring API.
    pub fn ranked(feature_name: impl Into<String>, impact: f64) -> Self {
        Self {
            feature_name: feature_name.into(),
            impact,
            in_top_k: true,
        }
    }

    /// A zero-impact attribution for an unranked feature.
    pub fn neutral(feature: Feature) -> Self {
        Self {
            feature_name: feature.api_name().to_string(),
            impact: 0.0,
            in_top_k: false,
        }
    }

    pub fn direction(&self) -> ImpactDirection {
        ImpactDirection::classify(self.impact)
    }
}

/// Direction in which a feature moves the risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImpactDirection {
    IncreasesRisk,
    DecreasesRisk,
    Neutral,
}

impl ImpactDirection {
    pub fn classify(impact: f64) -> Self {
        if impact > NEUTRAL_IMPACT_THRESHOLD {
            ImpactDirection::IncreasesRisk
        } else if impact < -NEUTRAL_IMPACT_THRESHOLD {
            ImpactDirection::DecreasesRisk
        } else {
            ImpactDirection::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImpactDirection::IncreasesRisk => "Increases risk",
            ImpactDirection::DecreasesRisk => "Decreases risk",
            ImpactDirection::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for ImpactDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One display row of the feature table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    pub feature: Feature,
    pub label: &'static str,
    pub impact: f64,
    pub direction: ImpactDirection,
    pub in_top_k: bool,
    /// Client value formatted for its feature family.
    pub client_value: String,
}

/// Exactly one row per canonical feature, ascending by |impact|.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureTable {
    rows: Vec<FeatureRow>,
}

/// Text alternative to the impact chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskSummary {
    pub increasing: Vec<&'static str>,
    pub decreasing: Vec<&'static str>,
}

impl FeatureTable {
    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, feature: Feature) -> Option<&FeatureRow> {
        self.rows.iter().find(|r| r.feature == feature)
    }

    /// Names the most impactful features on each side, at most three each.
    pub fn risk_summary(&self) -> RiskSummary {
        let by_magnitude = || self.rows.iter().rev();
        RiskSummary {
            increasing: by_magnitude()
                .filter(|r| r.direction == ImpactDirection::IncreasesRisk)
                .take(SUMMARY_SIZE)
                .map(|r| r.label)
                .collect(),
            decreasing: by_magnitude()
                .filter(|r| r.direction == ImpactDirection::DecreasesRisk)
                .take(SUMMARY_SIZE)
                .map(|r| r.label)
                .collect(),
        }
    }
}

/// Builds the complete feature table.
pub struct FeatureExplanationBuilder;

impl FeatureExplanationBuilder {
    /// Merges ranked attributions with synthesized neutral ones.
    ///
    /// Ranked entries win over synthesized ones; for duplicate ranked
    /// entries the first wins. Names outside the canonical set are
    /// dropped. Rows are stably sorted ascending by absolute impact.
    pub fn build(ranked: &[FeatureAttribution], record: &ClientRecord) -> FeatureTable {
        let payload = ClientRecordCodec::to_api(record);
        let mut seen = HashSet::with_capacity(FEATURE_COUNT);
        let mut merged: Vec<(Feature, FeatureAttribution)> = Vec::with_capacity(FEATURE_COUNT);

        for attribution in ranked {
            let Ok(feature) = attribution.feature_name.parse::<Feature>() else {
                tracing::warn!(feature = %attribution.feature_name, "Ignoring attribution for unknown feature");
                continue;
            };
            if !seen.insert(feature) {
                tracing::debug!(feature = %feature, "Ignoring duplicate ranked attribution");
                continue;
            }
            merged.push((feature, attribution.clone()));
        }

        for feature in Feature::all() {
            if seen.insert(*feature) {
                merged.push((*feature, FeatureAttribution::neutral(*feature)));
            }
        }

        let mut rows: Vec<FeatureRow> = merged
            .into_iter()
            .map(|(feature, attribution)| FeatureRow {
                feature,
                label: feature.label(),
                impact: attribution.impact,
                direction: attribution.direction(),
                in_top_k: attribution.in_top_k,
                client_value: client_value(&payload, feature),
            })
            .collect();

        // slice::sort_by is stable
        rows.sort_by(|a, b| a.impact.abs().total_cmp(&b.impact.abs()));

        FeatureTable { rows }
    }
}

fn client_value(payload: &ApiPayload, feature: Feature) -> String {
    payload
        .get(feature)
        .map(|v| format_value(feature, v))
        .unwrap_or_else(|| "N/A".to_string())
}

/// Formats an API-native value for display.
pub fn format_value(feature: Feature, value: &FeatureValue) -> String {
    match feature.family() {
        FeatureFamily::Gender => match value.as_label() {
            Some(code) => Gender::from_api_code(code).label().to_string(),
            None => value.to_string(),
        },
        FeatureFamily::Education => {
            if value.is_truthy() {
                "Yes".to_string()
            } else {
                "No".to_string()
            }
        }
        FeatureFamily::DayCount => match value.as_f64() {
            Some(days) => format!("{} days", days.abs().round() as i64),
            None => value.to_string(),
        },
        FeatureFamily::Monetary => match value.as_f64() {
            Some(amount) => format!("{} €", group_thousands(amount.round() as i64)),
            None => value.to_string(),
        },
        FeatureFamily::Score => match value.as_f64() {
            Some(n) => format!("{:.4}", n),
            None => value.to_string(),
        },
        FeatureFamily::Delay => match value.as_f64() {
            Some(n) => format!("{:.1}", n),
            None => value.to_string(),
        },
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if n < 0 {
        format!("-{}", out)
    } else {
        out
    }
}
