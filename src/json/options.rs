//! JSON conversion options

use serde::{Deserialize, Serialize};

/// First character of an external identifier that is a JSONPath query
pub const JSON_PATH_ANCHOR: char = '$';

/// An accepted date-time string format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeFormat {
    /// chrono format string, e.g. `%Y-%m-%d %H:%M:%S`
    pub format: String,
    /// Whether strings in this format carry their own UTC offset
    pub has_timezone: bool,
}

impl DateTimeFormat {
    /// A format that carries its own offset
    pub fn with_timezone(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            has_timezone: true,
        }
    }

    /// A format parsed in the configured local offset
    pub fn local(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            has_timezone: false,
        }
    }
}

/// Default accepted date-time formats, tried in order
pub fn default_date_time_formats() -> Vec<DateTimeFormat> {
    vec![
        // RFC 3339, with or without fractional seconds, `Z` or numeric offset
        DateTimeFormat::with_timezone("%+"),
        DateTimeFormat::with_timezone("%Y-%m-%dT%H:%M:%S%.f%z"),
        // RFC 2822 / RFC 1123 with numeric offset
        DateTimeFormat::with_timezone("%a, %d %b %Y %H:%M:%S %z"),
        DateTimeFormat::local("%Y-%m-%dT%H:%M:%S%.f"),
        DateTimeFormat::local("%Y-%m-%d %H:%M:%S%.f"),
        DateTimeFormat::local("%Y-%m-%d"),
        DateTimeFormat::local("%Y/%m/%d"),
    ]
}

/// Options controlling how JSON is converted into objects
///
/// Options are immutable once built and passed explicitly to every
/// conversion call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonOptions {
    /// Delimiter enabling flattened addressing of nested objects
    pub complex_attribute_name_delimiter: Option<String>,
    /// Accepted date-time formats, first match wins
    pub date_time_formats: Vec<DateTimeFormat>,
    /// Treat external identifiers starting with `$` as JSONPath queries
    pub enable_json_path: bool,
    /// Offset east of UTC, in seconds, applied to formats without a zone
    pub local_time_zone_offset: i32,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            complex_attribute_name_delimiter: None,
            date_time_formats: default_date_time_formats(),
            enable_json_path: false,
            local_time_zone_offset: 0,
        }
    }
}

impl JsonOptions {
    /// Create options with the default date-time formats
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable delimiter addressing
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.complex_attribute_name_delimiter = Some(delimiter.into());
        self
    }

    /// Enable JSONPath addressing
    #[must_use]
    pub fn with_json_path(mut self) -> Self {
        self.enable_json_path = true;
        self
    }

    /// Replace the accepted date-time formats
    #[must_use]
    pub fn with_date_time_formats(mut self, formats: Vec<DateTimeFormat>) -> Self {
        self.date_time_formats = formats;
        self
    }

    /// Set the offset applied to formats without a zone
    #[must_use]
    pub fn with_local_time_zone_offset(mut self, seconds: i32) -> Self {
        self.local_time_zone_offset = seconds;
        self
    }

    /// The delimiter, if delimiter addressing applies
    pub(crate) fn delimiter(&self) -> Option<&str> {
        if self.enable_json_path {
            return None;
        }
        self.complex_attribute_name_delimiter
            .as_deref()
            .filter(|d| !d.is_empty())
    }

    /// Whether an external identifier is a JSONPath query
    pub(crate) fn is_json_path(&self, external_id: &str) -> bool {
        self.enable_json_path && external_id.starts_with(JSON_PATH_ANCHOR)
    }
}
