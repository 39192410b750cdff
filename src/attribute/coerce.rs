//! Coercion of dynamic values into wire attribute values

use crate::error::{Error, Result};
use crate::framework::Value;
use crate::types::AttributeType;
use crate::wire::{AttributeValue, DateTimeValue};

/// Coerce a dynamic value into the wire values of an attribute
///
/// Returns `Ok(None)` for untyped null, meaning the attribute carries no
/// values and is omitted. A nullable wrapper holding nothing, and null list
/// elements, become [`AttributeValue::NullValue`]. An empty list yields an
/// empty set of values.
///
/// A list attribute only accepts a `List`, and a non-list attribute never
/// accepts one.
pub fn attribute_values(
    attribute_type: AttributeType,
    list: bool,
    value: &Value,
) -> Result<Option<Vec<AttributeValue>>> {
    match (value, list) {
        (Value::Null, _) => Ok(None),
        (Value::List(items), true) => items
            .iter()
            .map(|item| element_value(attribute_type, item))
            .collect::<Result<Vec<_>>>()
            .map(Some),
        (Value::List(_), false) | (_, true) => Err(Error::internal(format!(
            "Invalid type for attribute of type {}: {}.",
            declared_type(attribute_type, list),
            value.type_name()
        ))),
        (other, false) => element_value(attribute_type, other).map(|v| Some(vec![v])),
    }
}

/// Coerce one scalar, nullable scalar, or list element
fn element_value(attribute_type: AttributeType, value: &Value) -> Result<AttributeValue> {
    match value {
        Value::Null | Value::Optional(None) => Ok(AttributeValue::NullValue),
        Value::Optional(Some(inner)) => match inner.as_ref() {
            Value::Null | Value::Optional(_) | Value::List(_) | Value::Objects(_) => {
                Err(invalid_type(attribute_type, value))
            }
            scalar => {
                scalar_value(attribute_type, scalar).ok_or_else(|| invalid_type(attribute_type, value))
            }
        },
        scalar => {
            scalar_value(attribute_type, scalar).ok_or_else(|| invalid_type(attribute_type, value))
        }
    }
}

fn scalar_value(attribute_type: AttributeType, value: &Value) -> Option<AttributeValue> {
    let converted = match (attribute_type, value) {
        (AttributeType::Bool, Value::Bool(b)) => AttributeValue::BoolValue(*b),
        (AttributeType::DateTime, Value::DateTime(dt)) => {
            AttributeValue::DatetimeValue(DateTimeValue::from(dt))
        }
        (AttributeType::Double, Value::Double(d)) => AttributeValue::DoubleValue(*d),
        (AttributeType::Duration, Value::Duration(d)) => AttributeValue::DurationValue(*d),
        (AttributeType::Int64, Value::Int64(i)) => AttributeValue::Int64Value(*i),
        (AttributeType::String, Value::String(s)) => AttributeValue::StringValue(s.clone()),
        _ => return None,
    };
    Some(converted)
}

fn declared_type(attribute_type: AttributeType, list: bool) -> String {
    if list {
        format!("list of {attribute_type}")
    } else {
        attribute_type.to_string()
    }
}

fn invalid_type(attribute_type: AttributeType, value: &Value) -> Error {
    Error::internal(format!(
        "Invalid type for attribute of type {attribute_type}: {}.",
        value.type_name()
    ))
}
