//! Resolution of attribute and child-entity values inside a JSON object

use super::options::JsonOptions;
use super::parse::json_type_name;
use crate::error::{Error, Result};
use crate::framework::{AttributeConfig, EntityConfig};
use crate::types::{JsonObject, JsonValue};
use jsonpath_rust::JsonPath;
use std::borrow::Cow;

/// Find the raw JSON value of an attribute
///
/// Returns `Ok(None)` when nothing is found. In JSONPath mode a non-list
/// attribute must match at most one value; a list attribute collects all
/// matches, and a single array match is used as the list itself.
pub(crate) fn resolve_attribute<'a>(
    attribute: &AttributeConfig,
    root: &'a JsonValue,
    object: &'a JsonObject,
    options: &JsonOptions,
) -> Result<Option<Cow<'a, JsonValue>>> {
    if !options.is_json_path(&attribute.external_id) {
        return Ok(object.get(&attribute.external_id).map(Cow::Borrowed));
    }

    let mut matches = query(root, &attribute.external_id)?;

    if attribute.list {
        return Ok(match matches.len() {
            0 => None,
            1 if matches[0].is_array() => matches.pop().map(Cow::Owned),
            _ => Some(Cow::Owned(JsonValue::Array(matches))),
        });
    }

    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.pop().map(Cow::Owned)),
        n => Err(Error::json_conversion(format!(
            "JSONPath {} of non-list attribute matched {n} values.",
            attribute.external_id
        ))),
    }
}

/// Find the raw JSON objects of a child entity
///
/// The value must be an array of objects; a missing or null value means no
/// children. An indefinite JSONPath (such as `$.users[*]`) may instead match
/// the objects themselves.
pub(crate) fn resolve_child_objects<'a>(
    child: &EntityConfig,
    root: &'a JsonValue,
    object: &'a JsonObject,
    options: &JsonOptions,
) -> Result<Vec<Cow<'a, JsonValue>>> {
    let elements: Vec<Cow<'a, JsonValue>> = if options.is_json_path(&child.external_id) {
        let mut matches = query(root, &child.external_id)?;
        if matches.len() == 1 {
            match matches.pop() {
                None | Some(JsonValue::Null) => Vec::new(),
                Some(JsonValue::Array(items)) => items.into_iter().map(Cow::Owned).collect(),
                Some(other) if is_definite_path(&child.external_id) => {
                    return Err(Error::json_conversion(format!(
                        "JSONPath {} of child entity must resolve to an array of objects, found {}.",
                        child.external_id,
                        json_type_name(&other)
                    )))
                }
                Some(other) => vec![Cow::Owned(other)],
            }
        } else {
            matches.into_iter().map(Cow::Owned).collect()
        }
    } else {
        match object.get(&child.external_id) {
            None | Some(JsonValue::Null) => Vec::new(),
            Some(JsonValue::Array(items)) => items.iter().map(Cow::Borrowed).collect(),
            Some(other) => {
                return Err(Error::json_conversion(format!(
                    "Child entity {} must be an array of objects, found {}.",
                    child.external_id,
                    json_type_name(other)
                )))
            }
        }
    };

    if let Some(invalid) = elements.iter().find(|e| !e.is_object()) {
        return Err(Error::json_conversion(format!(
            "Child entity {} must be an array of objects, found an element that is {}.",
            child.external_id,
            json_type_name(invalid)
        )));
    }

    Ok(elements)
}

/// Whether a JSONPath can match at most one value
///
/// Wildcards, recursive descent and filters make a path indefinite, as do
/// slices and unions inside brackets.
pub(crate) fn is_definite_path(path: &str) -> bool {
    if path.contains('*') || path.contains("..") || path.contains("?(") {
        return false;
    }

    path.split('[').skip(1).all(|segment| {
        let selector = segment.split(']').next().unwrap_or_default().trim();
        selector.starts_with('\'')
            || selector.starts_with('"')
            || !(selector.contains(':') || selector.contains(','))
    })
}

/// Evaluate a JSONPath query, returning every matched value
pub(crate) fn query(root: &JsonValue, path: &str) -> Result<Vec<JsonValue>> {
    let jp = JsonPath::try_from(path).map_err(|e| Error::JsonPath {
        message: format!("Invalid JSONPath {path}: {e}"),
    })?;

    match jp.find(root) {
        JsonValue::Array(arr) => Ok(arr),
        JsonValue::Null => Ok(vec![]),
        other => Ok(vec![other]),
    }
}
