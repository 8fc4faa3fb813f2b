//! Attribute values attached to variables and datasets.

use serde::{Deserialize, Serialize};

/// A single attribute value.
///
/// Attribute comparison is exact, never tolerance-based, so `PartialEq`
/// is the whole equality story (including floats).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl core::fmt::Display for AttrValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AttrValue::Int(v) => write!(f, "{}", v),
            AttrValue::Float(v) => write!(f, "{}", v),
            AttrValue::Str(v) => write!(f, "\"{}\"", v),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Str(v.to_owned())
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_parse() {
        let v: AttrValue = serde_json::from_str("3").unwrap();
        assert_eq!(v, AttrValue::Int(3));
        let v: AttrValue = serde_json::from_str("3.5").unwrap();
        assert_eq!(v, AttrValue::Float(3.5));
        let v: AttrValue = serde_json::from_str("\"psu\"").unwrap();
        assert_eq!(v, AttrValue::from("psu"));
    }

    #[test]
    fn test_exact_equality_is_case_sensitive() {
        assert_ne!(AttrValue::from("psu"), AttrValue::from("PSU"));
    }

    #[test]
    fn test_display() {
        assert_eq!(AttrValue::Int(42).to_string(), "42");
        assert_eq!(AttrValue::from("psu").to_string(), "\"psu\"");
    }
}
