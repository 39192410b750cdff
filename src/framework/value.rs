//! Dynamic object values
//!
//! Adapters build objects without knowing the wire schema, so values carry
//! their runtime type. The response assembler checks that type against the
//! declared attribute type; variants that no attribute type accepts
//! (`Int32`, `Uint64`, `Float32`, `Bytes`) exist so adapters can express
//! them and get a precise error instead of a silent conversion.

use crate::types::Duration;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::BTreeMap;

/// One entity instance: external identifier to value
pub type Object = BTreeMap<String, Value>;

/// A dynamically-typed attribute or child-object value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Untyped null, the attribute is omitted
    Null,
    Bool(bool),
    DateTime(DateTime<FixedOffset>),
    Double(f64),
    Duration(Duration),
    Int64(i64),
    String(String),
    Int32(i32),
    Uint64(u64),
    Float32(f32),
    Bytes(Vec<u8>),
    /// Nullable wrapper around a scalar
    Optional(Option<Box<Value>>),
    /// List attribute value
    List(Vec<Value>),
    /// Instances of a child entity
    Objects(Vec<Object>),
}

impl Value {
    /// Create a list value
    pub fn list<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Create a nullable value
    pub fn optional<T: Into<Value>>(value: Option<T>) -> Self {
        Self::Optional(value.map(|v| Box::new(v.into())))
    }

    /// Whether this is untyped null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Runtime type name, used in error messages
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::DateTime(_) => "DateTime".to_string(),
            Value::Double(_) => "f64".to_string(),
            Value::Duration(_) => "Duration".to_string(),
            Value::Int64(_) => "i64".to_string(),
            Value::String(_) => "String".to_string(),
            Value::Int32(_) => "i32".to_string(),
            Value::Uint64(_) => "u64".to_string(),
            Value::Float32(_) => "f32".to_string(),
            Value::Bytes(_) => "bytes".to_string(),
            Value::Optional(None) => "Option<_>".to_string(),
            Value::Optional(Some(inner)) => format!("Option<{}>", inner.type_name()),
            Value::List(items) => match items.first() {
                Some(first) => format!("Vec<{}>", first.type_name()),
                None => "Vec<_>".to_string(),
            },
            Value::Objects(_) => "Vec<Object>".to_string(),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Value::DateTime(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<Duration> for Value {
    fn from(value: Duration) -> Self {
        Value::Duration(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int32(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Uint64(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float32(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Object>> for Value {
    fn from(value: Vec<Object>) -> Self {
        Value::Objects(value)
    }
}
