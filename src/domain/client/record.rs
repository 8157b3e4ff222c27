//! ClientRecord - the analyst-facing description of one applicant.
//!
//! Values are UI-native: tenure in years, gender as a two-valued label,
//! education as yes/no. The API-native form is produced by the codec.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{Feature, FeatureValue};
use crate::domain::foundation::ValidationError;

/// Days per year used for tenure conversion.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Two-valued gender category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Female,
    Male,
}

impl Gender {
    /// Returns the API code ("M"/"F").
    pub fn api_code(&self) -> &'static str {
        match self {
            Gender::Female => "F",
            Gender::Male => "M",
        }
    }

    /// Parses an API code; anything but "M" is female.
    pub fn from_api_code(code: &str) -> Self {
        if code == "M" {
            Gender::Male
        } else {
            Gender::Female
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }

    /// Parses a display label or an API code.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Female" | "F" => Some(Gender::Female),
            "Male" | "M" => Some(Gender::Male),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Applicant record as entered in the form.
///
/// # Invariants
///
/// - Every canonical feature has a value (enforced by the struct shape)
/// - Immutable once submitted; the session stores a copy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub ext_source_2: f64,
    pub ext_source_3: f64,
    pub ext_source_1: f64,
    /// Tenure in the current job, in years (two decimals in the form).
    pub employment_years: f64,
    pub gender: Gender,
    /// Average days past due on previous instalments.
    pub dpd_mean: f64,
    pub payment_rate: f64,
    pub higher_education: bool,
    pub annuity: f64,
    pub payment_sum: f64,
}

impl Default for ClientRecord {
    fn default() -> Self {
        Self {
            ext_source_2: 0.6,
            ext_source_3: 0.5,
            ext_source_1: 0.4,
            employment_years: 1825.0 / DAYS_PER_YEAR,
            gender: Gender::Female,
            dpd_mean: 0.5,
            payment_rate: 0.15,
            higher_education: false,
            annuity: 18_000.0,
            payment_sum: 120_000.0,
        }
    }
}

impl ClientRecord {
    /// Checks every field against the form bounds.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` naming the first offending feature
    pub fn validate(&self) -> Result<(), ValidationError> {
        let checks = [
            (Feature::ExtSource2, self.ext_source_2, 0.0, 1.0),
            (Feature::ExtSource3, self.ext_source_3, 0.0, 1.0),
            (Feature::ExtSource1, self.ext_source_1, 0.0, 1.0),
            (Feature::DaysEmployed, self.employment_years, 0.0, 40.0),
            (Feature::InstalDpdMean, self.dpd_mean, 0.0, 30.0),
            (Feature::PaymentRate, self.payment_rate, 0.0, 1.0),
            (Feature::AmtAnnuity, self.annuity, 5_000.0, 100_000.0),
            (Feature::InstalAmtPaymentSum, self.payment_sum, 10_000.0, 1_000_000.0),
        ];

        for (feature, value, min, max) in checks {
            ValidationError::check_range(feature.api_name(), min, max, value)?;
        }
        Ok(())
    }

    /// Returns the UI-native value of one feature.
    pub fn ui_value(&self, feature: Feature) -> FeatureValue {
        match feature {
            Feature::ExtSource2 => self.ext_source_2.into(),
            Feature::ExtSource3 => self.ext_source_3.into(),
            Feature::ExtSource1 => self.ext_source_1.into(),
            Feature::DaysEmployed => self.employment_years.into(),
            Feature::CodeGender => self.gender.label().into(),
            Feature::InstalDpdMean => self.dpd_mean.into(),
            Feature::PaymentRate => self.payment_rate.into(),
            Feature::HigherEducation => self.higher_education.into(),
            Feature::AmtAnnuity => self.annuity.into(),
            Feature::InstalAmtPaymentSum => self.payment_sum.into(),
        }
    }

    /// Rebuilds a record from UI-native values keyed by feature.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if a canonical feature is absent
    /// - `InvalidFormat` if a value has the wrong shape
    pub fn from_ui_values(values: &BTreeMap<Feature, FeatureValue>) -> Result<Self, ValidationError> {
        let number = |feature: Feature| -> Result<f64, ValidationError> {
            let value = values
                .get(&feature)
                .ok_or_else(|| ValidationError::empty_field(feature.api_name()))?;
            value.as_f64().ok_or_else(|| {
                ValidationError::invalid_format(feature.api_name(), format!("expected a number, got {}", value))
            })
        };

        let gender_value = values
            .get(&Feature::CodeGender)
            .ok_or_else(|| ValidationError::empty_field(Feature::CodeGender.api_name()))?;
        let gender = gender_value
            .as_label()
            .and_then(Gender::from_label)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    Feature::CodeGender.api_name(),
                    format!("expected Female or Male, got {}", gender_value),
                )
            })?;

        let higher_education = values
            .get(&Feature::HigherEducation)
            .ok_or_else(|| ValidationError::empty_field(Feature::HigherEducation.api_name()))?
            .is_truthy();

        Ok(Self {
            ext_source_2: number(Feature::ExtSource2)?,
            ext_source_3: number(Feature::ExtSource3)?,
            ext_source_1: number(Feature::ExtSource1)?,
            employment_years: number(Feature::DaysEmployed)?,
            gender,
            dpd_mean: number(Feature::InstalDpdMean)?,
            payment_rate: number(Feature::PaymentRate)?,
            higher_education,
            annuity: number(Feature::AmtAnnuity)?,
            payment_sum: number(Feature::InstalAmtPaymentSum)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_valid() {
        assert!(ClientRecord::default().validate().is_ok());
    }

    #[test]
    fn default_tenure_is_five_years_of_days() {
        let record = ClientRecord::default();
        assert!((record.employment_years * DAYS_PER_YEAR - 1825.0).abs() < 1e-9);
    }

    #[test]
    fn validate_rejects_score_above_one() {
        let record = ClientRecord {
            ext_source_2: 1.2,
            ..Default::default()
        };
        let err = record.validate().unwrap_err();
        assert_eq!(err, ValidationError::out_of_range("EXT_SOURCE_2", 0.0, 1.0, 1.2));
    }

    #[test]
    fn validate_rejects_annuity_below_form_minimum() {
        let record = ClientRecord {
            annuity: 1_000.0,
            ..Default::default()
        };
        assert!(record.validate().is_err());
    }

    #[test]
    fn ui_values_rebuild_the_same_record() {
        let record = ClientRecord {
            gender: Gender::Male,
            higher_education: true,
            ..Default::default()
        };
        let values: BTreeMap<_, _> = Feature::all()
            .iter()
            .map(|f| (*f, record.ui_value(*f)))
            .collect();

        assert_eq!(ClientRecord::from_ui_values(&values).unwrap(), record);
    }

    #[test]
    fn from_ui_values_reports_missing_feature() {
        let mut values: BTreeMap<_, _> = Feature::all()
            .iter()
            .map(|f| (*f, ClientRecord::default().ui_value(*f)))
            .collect();
        values.remove(&Feature::AmtAnnuity);

        let err = ClientRecord::from_ui_values(&values).unwrap_err();
        assert_eq!(err, ValidationError::empty_field("AMT_ANNUITY"));
    }

    #[test]
    fn gender_codes_follow_api_convention() {
        assert_eq!(Gender::Male.api_code(), "M");
        assert_eq!(Gender::from_api_code("M"), Gender::Male);
        assert_eq!(Gender::from_api_code("F"), Gender::Female);
        assert_eq!(Gender::from_api_code("XNA"), Gender::Female);
    }
}
