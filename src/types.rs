//! Common types used throughout the adapter framework
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used by both the wire model and the adapter model.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Attribute Type
// ============================================================================

/// Semantic type of an attribute
///
/// `Unspecified` is the zero value of the wire enumeration and is never a
/// valid declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeType {
    #[default]
    #[serde(alias = "ATTRIBUTE_TYPE_UNSPECIFIED")]
    Unspecified,
    #[serde(alias = "ATTRIBUTE_TYPE_BOOL")]
    Bool,
    #[serde(alias = "ATTRIBUTE_TYPE_DATE_TIME")]
    DateTime,
    #[serde(alias = "ATTRIBUTE_TYPE_DOUBLE")]
    Double,
    #[serde(alias = "ATTRIBUTE_TYPE_DURATION")]
    Duration,
    #[serde(alias = "ATTRIBUTE_TYPE_INT64")]
    Int64,
    #[serde(alias = "ATTRIBUTE_TYPE_STRING")]
    String,
}

impl AttributeType {
    /// Whether this is a recognized, non-zero type
    pub fn is_specified(self) -> bool {
        self != AttributeType::Unspecified
    }

    /// Wire name of the type
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeType::Unspecified => "UNSPECIFIED",
            AttributeType::Bool => "BOOL",
            AttributeType::DateTime => "DATE_TIME",
            AttributeType::Double => "DOUBLE",
            AttributeType::Duration => "DURATION",
            AttributeType::Int64 => "INT64",
            AttributeType::String => "STRING",
        }
    }
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Duration
// ============================================================================

/// Four-field duration
///
/// `seconds` and `nanos` carry an exact span and share the same sign;
/// `months` and `days` carry calendar units that have no fixed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Duration {
    pub seconds: i64,
    pub nanos: i32,
    pub months: i64,
    pub days: i64,
}

const NANOS_PER_SECOND: i128 = 1_000_000_000;

impl Duration {
    /// Create a duration from whole seconds and nanoseconds
    pub fn new(seconds: i64, nanos: i32) -> Self {
        Self {
            seconds,
            nanos,
            ..Default::default()
        }
    }

    /// Create a calendar duration
    pub fn calendar(months: i64, days: i64) -> Self {
        Self {
            months,
            days,
            ..Default::default()
        }
    }

    /// Create a duration from a total number of nanoseconds
    ///
    /// Returns `None` if the seconds part does not fit in an `i64`.
    pub fn from_total_nanos(total: i128) -> Option<Self> {
        let seconds = i64::try_from(total / NANOS_PER_SECOND).ok()?;
        let nanos = (total % NANOS_PER_SECOND) as i32;
        Some(Self::new(seconds, nanos))
    }

    /// Create a duration from a (possibly fractional) number of seconds
    ///
    /// Returns `None` for non-finite values or values out of range.
    pub fn from_seconds_f64(seconds: f64) -> Option<Self> {
        if !seconds.is_finite() || seconds.abs() >= i64::MAX as f64 {
            return None;
        }
        let total = (seconds * 1e9).round();
        if total.abs() < i128::MAX as f64 {
            Self::from_total_nanos(total as i128)
        } else {
            None
        }
    }
}

impl From<std::time::Duration> for Duration {
    fn from(duration: std::time::Duration) -> Self {
        Self::new(
            i64::try_from(duration.as_secs()).unwrap_or(i64::MAX),
            duration.subsec_nanos() as i32,
        )
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_type_serde() {
        let t: AttributeType = serde_json::from_str("\"DATE_TIME\"").unwrap();
        assert_eq!(t, AttributeType::DateTime);

        let t: AttributeType = serde_json::from_str("\"ATTRIBUTE_TYPE_INT64\"").unwrap();
        assert_eq!(t, AttributeType::Int64);

        let json = serde_json::to_string(&AttributeType::String).unwrap();
        assert_eq!(json, "\"STRING\"");
    }

    #[test]
    fn test_attribute_type_specified() {
        assert!(!AttributeType::default().is_specified());
        assert!(AttributeType::Bool.is_specified());
        assert_eq!(AttributeType::Duration.to_string(), "DURATION");
    }

    #[test]
    fn test_duration_from_seconds() {
        assert_eq!(
            Duration::from_seconds_f64(12.345),
            Some(Duration::new(12, 345_000_000))
        );
        assert_eq!(
            Duration::from_seconds_f64(-1.5),
            Some(Duration::new(-1, -500_000_000))
        );
        assert_eq!(Duration::from_seconds_f64(f64::NAN), None);
        assert_eq!(Duration::from_seconds_f64(1e300), None);
    }

    #[test]
    fn test_duration_from_std() {
        let d: Duration = std::time::Duration::from_millis(1500).into();
        assert_eq!(d, Duration::new(1, 500_000_000));
    }

    #[test]
    fn test_option_string_none_if_empty() {
        assert_eq!(
            Some("test".to_string()).none_if_empty(),
            Some("test".to_string())
        );
        assert_eq!(Some(String::new()).none_if_empty(), None);
        assert_eq!(None::<String>.none_if_empty(), None);
        assert_eq!("test".to_string().none_if_empty(), Some("test".to_string()));
        assert_eq!(String::new().none_if_empty(), None);
    }
}
