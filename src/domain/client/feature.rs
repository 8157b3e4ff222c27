//! Feature enum representing the 10 canonical dashboard variables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The 10 variables the dashboard always displays, in dashboard order.
///
/// Serialized with the scoring API's column names. The derived `Ord`
/// follows declaration order, which is the canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Feature {
    #[serde(rename = "EXT_SOURCE_2")]
    ExtSource2,
    #[serde(rename = "EXT_SOURCE_3")]
    ExtSource3,
    #[serde(rename = "EXT_SOURCE_1")]
    ExtSource1,
    #[serde(rename = "DAYS_EMPLOYED")]
    DaysEmployed,
    #[serde(rename = "CODE_GENDER")]
    CodeGender,
    #[serde(rename = "INSTAL_DPD_MEAN")]
    InstalDpdMean,
    #[serde(rename = "PAYMENT_RATE")]
    PaymentRate,
    #[serde(rename = "NAME_EDUCATION_TYPE_Higher_education")]
    HigherEducation,
    #[serde(rename = "AMT_ANNUITY")]
    AmtAnnuity,
    #[serde(rename = "INSTAL_AMT_PAYMENT_SUM")]
    InstalAmtPaymentSum,
}

/// Value family of a feature; drives conversion and display formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureFamily {
    /// Continuous score or ratio in [0, 1].
    Score,
    /// Signed day count (negative = days before application).
    DayCount,
    /// Two-valued gender category.
    Gender,
    /// Yes/no education flag.
    Education,
    /// Amount of money.
    Monetary,
    /// Average payment delay in days.
    Delay,
}

/// Number of canonical features.
pub const FEATURE_COUNT: usize = 10;

impl Feature {
    /// Returns all features in canonical dashboard order.
    pub fn all() -> &'static [Feature; FEATURE_COUNT] {
        &[
            Feature::ExtSource2,
            Feature::ExtSource3,
            Feature::ExtSource1,
            Feature::DaysEmployed,
            Feature::CodeGender,
            Feature::InstalDpdMean,
            Feature::PaymentRate,
            Feature::HigherEducation,
            Feature::AmtAnnuity,
            Feature::InstalAmtPaymentSum,
        ]
    }

    /// Returns the column name used by the scoring API.
    pub fn api_name(&self) -> &'static str {
        match self {
            Feature::ExtSource2 => "EXT_SOURCE_2",
            Feature::ExtSource3 => "EXT_SOURCE_3",
            Feature::ExtSource1 => "EXT_SOURCE_1",
            Feature::DaysEmployed => "DAYS_EMPLOYED",
            Feature::CodeGender => "CODE_GENDER",
            Feature::InstalDpdMean => "INSTAL_DPD_MEAN",
            Feature::PaymentRate => "PAYMENT_RATE",
            Feature::HigherEducation => "NAME_EDUCATION_TYPE_Higher_education",
            Feature::AmtAnnuity => "AMT_ANNUITY",
            Feature::InstalAmtPaymentSum => "INSTAL_AMT_PAYMENT_SUM",
        }
    }

    /// Returns the human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Feature::ExtSource2 => "External score 2",
            Feature::ExtSource3 => "External score 3",
            Feature::ExtSource1 => "External score 1",
            Feature::DaysEmployed => "Employment tenure",
            Feature::CodeGender => "Gender",
            Feature::InstalDpdMean => "Average payment delay",
            Feature::PaymentRate => "Debt ratio",
            Feature::HigherEducation => "Higher education",
            Feature::AmtAnnuity => "Monthly annuity",
            Feature::InstalAmtPaymentSum => "Payment history",
        }
    }

    /// Returns the one-sentence explanation shown next to the input.
    pub fn explanation(&self) -> &'static str {
        match self {
            Feature::ExtSource2 => "A high external score 2 lowers the default risk",
            Feature::ExtSource3 => "A high external score 3 lowers the default risk",
            Feature::ExtSource1 => "A high external score 1 lowers the default risk",
            Feature::DaysEmployed => "A long tenure in the current job lowers the default risk",
            Feature::CodeGender => {
                "A male client slightly raises the default risk compared with a female client"
            }
            Feature::InstalDpdMean => {
                "High average delays on previous payments raise the default risk"
            }
            Feature::PaymentRate => "A low debt ratio lowers the default risk",
            Feature::HigherEducation => "Higher education slightly raises the default risk",
            Feature::AmtAnnuity => "A high monthly annuity raises the default risk",
            Feature::InstalAmtPaymentSum => "A large payment history lowers the default risk",
        }
    }

    /// Returns the value family.
    pub fn family(&self) -> FeatureFamily {
        match self {
            Feature::ExtSource1 | Feature::ExtSource2 | Feature::ExtSource3 => {
                FeatureFamily::Score
            }
            Feature::PaymentRate => FeatureFamily::Score,
            Feature::DaysEmployed => FeatureFamily::DayCount,
            Feature::CodeGender => FeatureFamily::Gender,
            Feature::HigherEducation => FeatureFamily::Education,
            Feature::AmtAnnuity | Feature::InstalAmtPaymentSum => FeatureFamily::Monetary,
            Feature::InstalDpdMean => FeatureFamily::Delay,
        }
    }

    /// Returns true for two-valued categorical features.
    pub fn is_categorical(&self) -> bool {
        matches!(
            self.family(),
            FeatureFamily::Gender | FeatureFamily::Education
        )
    }

    /// Histogram bin count used when plotting the population.
    pub fn histogram_bins(&self) -> usize {
        if self.is_categorical() {
            10
        } else {
            30
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_name())
    }
}

impl FromStr for Feature {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::all()
            .iter()
            .copied()
            .find(|f| f.api_name() == s)
            .ok_or_else(|| ValidationError::invalid_format("feature", format!("unknown feature '{}'", s)))
    }
}
