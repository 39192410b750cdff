//! Per-type parsing of raw JSON values

use super::options::JsonOptions;
use crate::error::{Error, Result};
use crate::framework::{AttributeConfig, Value};
use crate::types::{AttributeType, Duration, JsonValue};
use chrono::format::ParseErrorKind;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use regex::Regex;
use serde_json::Number;
use std::sync::LazyLock;

/// Largest integer a JSON number (an IEEE 754 double) represents exactly
const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

static DURATION_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:\d+(?:\.\d*)?|\.\d+)(?:ns|us|µs|μs|ms|s|m|h))+$").unwrap()
});

static DURATION_COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d*)(?:\.(\d*))?(ns|us|µs|μs|ms|s|m|h)").unwrap()
});

/// Parse the raw JSON value of an attribute
///
/// Returns `Ok(None)` when the value is null (or an empty date-time string).
/// List attributes require a JSON array; null elements are dropped.
pub(crate) fn parse_attribute_value(
    attribute: &AttributeConfig,
    raw: &JsonValue,
    options: &JsonOptions,
) -> Result<Option<Value>> {
    if !attribute.list {
        return parse_scalar(attribute, raw, options);
    }

    match raw {
        JsonValue::Null => Ok(None),
        JsonValue::Array(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                if let Some(value) = parse_scalar(attribute, item, options)? {
                    values.push(value);
                }
            }
            Ok(Some(Value::List(values)))
        }
        other => Err(Error::json_conversion(format!(
            "Attribute {} is a list, but its JSON value is {}.",
            attribute.external_id,
            json_type_name(other)
        ))),
    }
}

fn parse_scalar(
    attribute: &AttributeConfig,
    raw: &JsonValue,
    options: &JsonOptions,
) -> Result<Option<Value>> {
    if raw.is_null() {
        return Ok(None);
    }

    let parsed = match (attribute.attribute_type, raw) {
        (AttributeType::Bool, _) => parse_bool(raw).map(Value::Bool),
        (AttributeType::DateTime, JsonValue::String(s)) => {
            return parse_date_time(s, options)
                .map(|dt| dt.map(Value::DateTime))
                .map_err(|e| with_attribute(attribute, e));
        }
        (AttributeType::Double, JsonValue::Number(n)) => n.as_f64().map(Value::Double),
        (AttributeType::Duration, JsonValue::Number(n)) => n
            .as_f64()
            .and_then(Duration::from_seconds_f64)
            .map(Value::Duration),
        (AttributeType::Duration, JsonValue::String(s)) => {
            return parse_duration_literal(s)
                .map(|d| Some(Value::Duration(d)))
                .map_err(|e| with_attribute(attribute, e));
        }
        (AttributeType::Int64, JsonValue::Number(n)) => {
            return int64_from_number(n)
                .map(|i| Some(Value::Int64(i)))
                .map_err(|e| with_attribute(attribute, e));
        }
        (AttributeType::Int64, JsonValue::String(s)) => s.parse::<i64>().ok().map(Value::Int64),
        (AttributeType::String, JsonValue::String(s)) => Some(Value::String(s.clone())),
        _ => None,
    };

    parsed.map(Some).ok_or_else(|| {
        Error::json_conversion(format!(
            "Attribute {} of type {} cannot be parsed from JSON {}: {raw}.",
            attribute.external_id,
            attribute.attribute_type,
            json_type_name(raw)
        ))
    })
}

fn with_attribute(attribute: &AttributeConfig, error: Error) -> Error {
    Error::json_conversion(format!(
        "Attribute {} of type {}: {}",
        attribute.external_id,
        attribute.attribute_type,
        error.message()
    ))
}

fn parse_bool(raw: &JsonValue) -> Option<bool> {
    match raw {
        JsonValue::Bool(b) => Some(*b),
        JsonValue::String(s) => {
            if s.eq_ignore_ascii_case("true") || s == "1" {
                Some(true)
            } else if s.eq_ignore_ascii_case("false") || s == "0" {
                Some(false)
            } else {
                None
            }
        }
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) if f == 0.0 => Some(false),
            Some(f) if f == 1.0 => Some(true),
            _ => None,
        },
        _ => None,
    }
}

/// Convert a JSON number into an `i64` without losing precision
///
/// JSON numbers are doubles, so integers beyond ±(2^53 - 1) cannot be
/// trusted; quote them as strings instead.
fn int64_from_number(number: &Number) -> Result<i64> {
    if let Some(i) = number.as_i64() {
        if (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&i) {
            return Ok(i);
        }
        return Err(precision_loss(number));
    }
    if number.is_u64() {
        return Err(precision_loss(number));
    }

    let f = number
        .as_f64()
        .ok_or_else(|| Error::json_conversion(format!("{number} is not a number.")))?;
    if f.fract() != 0.0 {
        return Err(Error::json_conversion(format!(
            "{number} has a fractional part and cannot be an integer."
        )));
    }
    if f.abs() > MAX_SAFE_INTEGER as f64 {
        return Err(precision_loss(number));
    }
    Ok(f as i64)
}

fn precision_loss(number: &Number) -> Error {
    Error::json_conversion(format!(
        "{number} is outside the range of integers a JSON number can represent without precision loss."
    ))
}

/// Parse a date-time string against the configured formats
///
/// An empty string is null. Formats are tried in order and the first match
/// wins; formats without a zone are read in the configured local offset.
pub fn parse_date_time(
    value: &str,
    options: &JsonOptions,
) -> Result<Option<DateTime<FixedOffset>>> {
    if value.is_empty() {
        return Ok(None);
    }

    let local_offset = FixedOffset::east_opt(options.local_time_zone_offset).ok_or_else(|| {
        Error::config(format!(
            "Invalid local time zone offset: {}s.",
            options.local_time_zone_offset
        ))
    })?;

    for format in &options.date_time_formats {
        if format.has_timezone {
            if let Ok(dt) = DateTime::parse_from_str(value, &format.format) {
                return Ok(Some(dt));
            }
            continue;
        }

        let naive = match NaiveDateTime::parse_from_str(value, &format.format) {
            Ok(naive) => Some(naive),
            Err(e) if e.kind() == ParseErrorKind::NotEnough => {
                NaiveDate::parse_from_str(value, &format.format)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            }
            Err(_) => None,
        };
        if let Some(dt) = naive.and_then(|n| local_offset.from_local_datetime(&n).single()) {
            return Ok(Some(dt));
        }
    }

    Err(Error::json_conversion(format!(
        "Date-time {value:?} does not match any of the accepted formats."
    )))
}

/// Parse a duration literal such as `12.345s`, `1h30m` or `-250ms`
///
/// Units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. The bare literal
/// `0` is accepted.
pub fn parse_duration_literal(literal: &str) -> Result<Duration> {
    let invalid = || Error::json_conversion(format!("Invalid duration literal: {literal:?}."));

    let (negative, body) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal.strip_prefix('+').unwrap_or(literal)),
    };
    if body == "0" {
        return Ok(Duration::default());
    }
    if !DURATION_LITERAL.is_match(body) {
        return Err(invalid());
    }

    let mut total: i128 = 0;
    for caps in DURATION_COMPONENT.captures_iter(body) {
        let whole = caps.get(1).map_or("", |m| m.as_str());
        let fraction = caps.get(2).map_or("", |m| m.as_str());
        let unit = unit_nanos(&caps[3]);

        let whole_nanos = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<i128>()
                .ok()
                .and_then(|w| w.checked_mul(unit))
                .ok_or_else(invalid)?
        };

        // Digits beyond nanosecond precision of the largest unit are dropped.
        let fraction = &fraction[..fraction.len().min(18)];
        let fraction_nanos = if fraction.is_empty() {
            0
        } else {
            let digits = fraction.parse::<i128>().map_err(|_| invalid())?;
            digits * unit / 10_i128.pow(fraction.len() as u32)
        };

        total = whole_nanos
            .checked_add(fraction_nanos)
            .and_then(|nanos| total.checked_add(nanos))
            .ok_or_else(invalid)?;
    }

    Duration::from_total_nanos(if negative { -total } else { total }).ok_or_else(invalid)
}

fn unit_nanos(unit: &str) -> i128 {
    match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60_000_000_000,
        _ => 3_600_000_000_000,
    }
}

/// Name of a JSON value's type, for error messages
pub(crate) fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
