//! ClientRecordCodec - conversions between UI-native and API-native values.
//!
//! Every per-feature conversion lives in one lookup table keyed by
//! [`Feature`]. Features without an entry convert by identity.

use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};

use super::{ApiPayload, ClientRecord, Feature, FeatureValue, Gender, DAYS_PER_YEAR};
use crate::domain::foundation::ValidationError;

type Convert = fn(&FeatureValue) -> FeatureValue;

/// Conversion functions for one feature.
#[derive(Clone, Copy)]
pub struct FeatureConverter {
    /// UI-native to API-native.
    pub to_api: Convert,
    /// API-native back to UI-native.
    pub from_api: Convert,
    /// Raw population value to the value used for plotting.
    pub to_display: Convert,
}

static IDENTITY: FeatureConverter = FeatureConverter {
    to_api: identity,
    from_api: identity,
    to_display: identity,
};

static CONVERTERS: Lazy<HashMap<Feature, FeatureConverter>> = Lazy::new(|| {
    HashMap::from([
        (
            Feature::CodeGender,
            FeatureConverter {
                to_api: gender_to_api,
                from_api: gender_from_api,
                to_display: identity,
            },
        ),
        (
            Feature::HigherEducation,
            FeatureConverter {
                to_api: education_to_api,
                from_api: education_from_api,
                to_display: education_to_api,
            },
        ),
        (
            Feature::DaysEmployed,
            FeatureConverter {
                to_api: years_to_days,
                from_api: days_to_years,
                to_display: identity,
            },
        ),
    ])
});

fn identity(value: &FeatureValue) -> FeatureValue {
    value.clone()
}

fn gender_to_api(value: &FeatureValue) -> FeatureValue {
    match value.as_label().and_then(Gender::from_label) {
        Some(gender) => gender.api_code().into(),
        None => value.clone(),
    }
}

fn gender_from_api(value: &FeatureValue) -> FeatureValue {
    match value.as_label() {
        Some(code) => Gender::from_api_code(code).label().into(),
        None => value.clone(),
    }
}

fn education_to_api(value: &FeatureValue) -> FeatureValue {
    FeatureValue::Integer(i64::from(value.is_truthy()))
}

fn education_from_api(value: &FeatureValue) -> FeatureValue {
    FeatureValue::Flag(value.is_truthy())
}

fn years_to_days(value: &FeatureValue) -> FeatureValue {
    match value.as_f64() {
        Some(years) => FeatureValue::Integer(-((years * DAYS_PER_YEAR).round() as i64)),
        None => value.clone(),
    }
}

fn days_to_years(value: &FeatureValue) -> FeatureValue {
    match value.as_f64() {
        Some(days) => FeatureValue::Number(days.abs() / DAYS_PER_YEAR),
        None => value.clone(),
    }
}

/// Stateless converter between [`ClientRecord`] and [`ApiPayload`].
pub struct ClientRecordCodec;

impl ClientRecordCodec {
    /// Returns the converter for a feature (identity when not listed).
    pub fn converter(feature: Feature) -> &'static FeatureConverter {
        CONVERTERS.get(&feature).unwrap_or(&IDENTITY)
    }

    /// Converts a form record to the API schema.
    ///
    /// Gender becomes "M"/"F", education 0/1 and tenure a negative day
    /// count (`-round(years * 365.25)`).
    pub fn to_api(record: &ClientRecord) -> ApiPayload {
        let values: BTreeMap<Feature, FeatureValue> = Feature::all()
            .iter()
            .map(|feature| {
                let ui = record.ui_value(*feature);
                (*feature, (Self::converter(*feature).to_api)(&ui))
            })
            .collect();

        ApiPayload::from_complete(values)
    }

    /// Converts an API payload back into a form record.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if a value cannot be read back (e.g. a label
    ///   where a number is expected)
    pub fn from_api(payload: &ApiPayload) -> Result<ClientRecord, ValidationError> {
        let mut values = BTreeMap::new();
        for feature in Feature::all() {
            let api = payload.require(*feature)?;
            values.insert(*feature, (Self::converter(*feature).from_api)(api));
        }
        ClientRecord::from_ui_values(&values)
    }

    /// Converts one raw API value for display against a population sample.
    ///
    /// Boolean-like education values become 0/1; features not listed in the
    /// table pass through unchanged.
    pub fn from_api_value(value: &FeatureValue, feature: Feature) -> FeatureValue {
        (Self::converter(feature).to_display)(value)
    }

    /// Converts a whole population sample with [`Self::from_api_value`].
    pub fn from_api_values(values: &[FeatureValue], feature: Feature) -> Vec<FeatureValue> {
        values
            .iter()
            .map(|v| Self::from_api_value(v, feature))
            .collect()
    }

    /// Numeric axis position of a raw API value.
    ///
    /// Gender codes map to 1 (M) / 0 (anything else). Returns `None` for
    /// values with no numeric reading.
    pub fn axis_value(value: &FeatureValue, feature: Feature) -> Option<f64> {
        let display = Self::from_api_value(value, feature);
        match (feature, display.as_label()) {
            (Feature::CodeGender, Some(code)) => Some(match Gender::from_api_code(code) {
                Gender::Male => 1.0,
                Gender::Female => 0.0,
            }),
            _ => display.as_f64(),
        }
    }

    /// Numeric axis position of the client's own value for a feature.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the client has no value for the feature
    /// - `InvalidFormat` if the value has no numeric reading
    pub fn client_axis_value(payload: &ApiPayload, feature: Feature) -> Result<f64, ValidationError> {
        let value = payload.require(feature)?;
        Self::axis_value(value, feature).ok_or_else(|| {
            ValidationError::invalid_format(feature.api_name(), format!("no numeric position for {}", value))
        })
    }
}
