//! Loosely-typed feature value as exchanged with the scoring API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One feature value.
///
/// Population arrays mix numbers, booleans and category labels, so the
/// value is untagged on the wire. Variant order matters for
/// deserialization: `1` becomes `Integer`, `0.5` becomes `Number`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Flag(bool),
    Integer(i64),
    Number(f64),
    Label(String),
    /// JSON `null` inside a population sample.
    Missing,
}

impl FeatureValue {
    /// Numeric view of the value; flags map to 0/1, labels have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Flag(b) => Some(if *b { 1.0 } else { 0.0 }),
            FeatureValue::Integer(i) => Some(*i as f64),
            FeatureValue::Number(n) => Some(*n),
            FeatureValue::Label(_) | FeatureValue::Missing => None,
        }
    }

    /// Returns the label if this is a categorical string.
    pub fn as_label(&self) -> Option<&str> {
        match self {
            FeatureValue::Label(s) => Some(s),
            _ => None,
        }
    }

    /// Truthiness used for boolean-like columns: non-zero numbers,
    /// `true` and non-empty labels are truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            FeatureValue::Flag(b) => *b,
            FeatureValue::Integer(i) => *i != 0,
            FeatureValue::Number(n) => *n != 0.0 && !n.is_nan(),
            FeatureValue::Label(s) => !s.is_empty(),
            FeatureValue::Missing => false,
        }
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Number(value)
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        FeatureValue::Integer(value)
    }
}

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        FeatureValue::Flag(value)
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::Label(value.to_string())
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Flag(b) => write!(f, "{}", b),
            FeatureValue::Integer(i) => write!(f, "{}", i),
            FeatureValue::Number(n) => write!(f, "{}", n),
            FeatureValue::Label(s) => write!(f, "{}", s),
            FeatureValue::Missing => write!(f, "-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_mixed_population_array() {
        let values: Vec<FeatureValue> =
            serde_json::from_str(r#"[true, 3, 0.5, "M", null]"#).unwrap();

        assert_eq!(
            values,
            vec![
                FeatureValue::Flag(true),
                FeatureValue::Integer(3),
                FeatureValue::Number(0.5),
                FeatureValue::Label("M".to_string()),
                FeatureValue::Missing,
            ]
        );
    }

    #[test]
    fn serializes_without_tags() {
        let json = serde_json::to_string(&vec![
            FeatureValue::Integer(-1826),
            FeatureValue::Label("F".to_string()),
        ])
        .unwrap();
        assert_eq!(json, r#"[-1826,"F"]"#);
    }

    #[test]
    fn as_f64_maps_flags_to_zero_or_one() {
        assert_eq!(FeatureValue::Flag(true).as_f64(), Some(1.0));
        assert_eq!(FeatureValue::Flag(false).as_f64(), Some(0.0));
        assert_eq!(FeatureValue::from("M").as_f64(), None);
    }

    #[test]
    fn truthiness_follows_boolean_like_columns() {
        assert!(FeatureValue::Integer(1).is_truthy());
        assert!(!FeatureValue::Integer(0).is_truthy());
        assert!(!FeatureValue::Number(0.0).is_truthy());
        assert!(!FeatureValue::Missing.is_truthy());
    }
}
