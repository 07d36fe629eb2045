//! Tri-state values.
//!
//! A metric on a row is either a number, an explicit "not applicable"
//! marker, or absent altogether (the row has no such field). The first two
//! states are [`Metric`]; absence is modelled by `Option::None` at lookup
//! time (see [`crate::rows::Row::field`]). None of the three ever collapses
//! into zero.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Marker used for "not applicable" in dataset sources.
pub const NOT_APPLICABLE_MARKER: &str = "n/a";

// ---------------------------------------------------------------------------
// Metric
// ---------------------------------------------------------------------------

/// A metric value that is present on a row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Value(f64),
    NotApplicable,
}

impl Metric {
    #[must_use]
    pub const fn as_f64(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::NotApplicable => None,
        }
    }

    #[must_use]
    pub const fn is_not_applicable(self) -> bool {
        matches!(self, Self::NotApplicable)
    }
}

impl From<f64> for Metric {
    fn from(value: f64) -> Self {
        Self::Value(value)
    }
}

impl From<Option<f64>> for Metric {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::NotApplicable, Self::Value)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::NotApplicable => f.write_str(NOT_APPLICABLE_MARKER),
        }
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => serializer.serialize_f64(*v),
            Self::NotApplicable => serializer.serialize_str(NOT_APPLICABLE_MARKER),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMetric {
    Int(i64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Metric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawMetric::deserialize(deserializer)? {
            #[allow(clippy::cast_precision_loss)]
            RawMetric::Int(v) => Ok(Self::Value(v as f64)),
            RawMetric::Float(v) => Ok(Self::Value(v)),
            RawMetric::Text(text) if text.eq_ignore_ascii_case(NOT_APPLICABLE_MARKER) => {
                Ok(Self::NotApplicable)
            }
            RawMetric::Text(text) => Err(serde::de::Error::custom(format!(
                "expected a number or \"{NOT_APPLICABLE_MARKER}\", got \"{text}\""
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// One field of a projected record, as handed to a renderer.
///
/// Serialized externally tagged so that a renderer can never confuse
/// `not_applicable` with a number or an empty string:
/// `{"text": "Shift Up"}`, `{"number": 65.6}`, `"not_applicable"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    Text(String),
    Number(f64),
    NotApplicable,
}

impl Cell {
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(_) | Self::NotApplicable => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            Self::Number(_) | Self::NotApplicable => None,
        }
    }

    #[must_use]
    pub const fn is_not_applicable(&self) -> bool {
        matches!(self, Self::NotApplicable)
    }
}

impl From<Metric> for Cell {
    fn from(metric: Metric) -> Self {
        match metric {
            Metric::Value(v) => Self::Number(v),
            Metric::NotApplicable => Self::NotApplicable,
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Holder {
        value: Metric,
    }

    #[test]
    fn integer_and_float_sources_become_values() {
        let int: Holder = serde_json::from_str(r#"{"value": 755}"#).unwrap();
        let float: Holder = serde_json::from_str(r#"{"value": 65.6}"#).unwrap();
        assert_eq!(int.value, Metric::Value(755.0));
        assert_eq!(float.value, Metric::Value(65.6));
    }

    #[test]
    fn marker_becomes_not_applicable_not_zero() {
        let holder: Holder = serde_json::from_str(r#"{"value": "n/a"}"#).unwrap();
        assert_eq!(holder.value, Metric::NotApplicable);
        assert_eq!(holder.value.as_f64(), None);
    }

    #[test]
    fn other_strings_are_rejected() {
        let parsed = serde_json::from_str::<Holder>(r#"{"value": ""}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn not_applicable_cell_is_distinct_on_the_wire() {
        let json = serde_json::to_string(&Cell::from(Metric::NotApplicable)).unwrap();
        assert_eq!(json, r#""not_applicable""#);
        let json = serde_json::to_string(&Cell::Number(0.0)).unwrap();
        assert_eq!(json, r#"{"number":0.0}"#);
    }
}
