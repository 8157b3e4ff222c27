//! ApiPayload - the scoring API's canonical view of a client.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Feature, FeatureValue};
use crate::domain::foundation::ValidationError;

/// API-native client record, serialized as a flat JSON object keyed by
/// the API column names.
///
/// # Invariants
///
/// - Holds exactly the 10 canonical features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, FeatureValue>",
    into = "BTreeMap<String, FeatureValue>"
)]
pub struct ApiPayload {
    values: BTreeMap<Feature, FeatureValue>,
}

impl ApiPayload {
    /// Builds a payload, requiring every canonical feature.
    ///
    /// # Errors
    ///
    /// - `EmptyField` naming the first missing feature
    pub fn from_values(values: BTreeMap<Feature, FeatureValue>) -> Result<Self, ValidationError> {
        if let Some(missing) = Feature::all().iter().find(|f| !values.contains_key(f)) {
            return Err(ValidationError::empty_field(missing.api_name()));
        }
        Ok(Self { values })
    }

    /// Wraps a map the caller built from `Feature::all()`.
    pub(super) fn from_complete(values: BTreeMap<Feature, FeatureValue>) -> Self {
        debug_assert_eq!(values.len(), Feature::all().len());
        Self { values }
    }

    /// Returns the API-native value of a feature.
    pub fn get(&self, feature: Feature) -> Option<&FeatureValue> {
        self.values.get(&feature)
    }

    /// Returns the value or a validation error naming the feature.
    pub fn require(&self, feature: Feature) -> Result<&FeatureValue, ValidationError> {
        self.get(feature)
            .ok_or_else(|| ValidationError::empty_field(feature.api_name()))
    }

    /// Iterates values in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&Feature, &FeatureValue)> {
        self.values.iter()
    }
}

impl TryFrom<BTreeMap<String, FeatureValue>> for ApiPayload {
    type Error = ValidationError;

    fn try_from(raw: BTreeMap<String, FeatureValue>) -> Result<Self, Self::Error> {
        let mut values = BTreeMap::new();
        for (name, value) in raw {
            // Extra columns from the API are not part of the dashboard.
            if let Ok(feature) = name.parse::<Feature>() {
                values.insert(feature, value);
            }
        }
        Self::from_values(values)
    }
}

impl From<ApiPayload> for BTreeMap<String, FeatureValue> {
    fn from(payload: ApiPayload) -> Self {
        payload
            .values
            .into_iter()
            .map(|(feature, value)| (feature.api_name().to_string(), value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_values() -> BTreeMap<Feature, FeatureValue> {
        Feature::all()
            .iter()
            .map(|f| (*f, FeatureValue::Number(0.5)))
            .collect()
    }

    #[test]
    fn from_values_requires_all_features() {
        let mut values = full_values();
        values.remove(&Feature::PaymentRate);

        let err = ApiPayload::from_values(values).unwrap_err();
        assert_eq!(err, ValidationError::empty_field("PAYMENT_RATE"));
    }

    #[test]
    fn serializes_as_flat_object_with_api_names() {
        let payload = ApiPayload::from_values(full_values()).unwrap();
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["NAME_EDUCATION_TYPE_Higher_education"], 0.5);
        assert_eq!(json.as_object().unwrap().len(), 10);
    }

    #[test]
    fn deserialization_ignores_unknown_columns() {
        let mut json = serde_json::to_value(ApiPayload::from_values(full_values()).unwrap()).unwrap();
        json["AMT_CREDIT"] = serde_json::json!(250000);

        let payload: ApiPayload = serde_json::from_value(json).unwrap();
        assert_eq!(payload.iter().count(), 10);
    }

    #[test]
    fn deserialization_fails_on_missing_column() {
        let json = serde_json::json!({ "EXT_SOURCE_2": 0.5 });
        assert!(serde_json::from_value::<ApiPayload>(json).is_err());
    }
}
