//! Recursive conversion of JSON objects into adapter objects

use super::options::JsonOptions;
use super::parse::{json_type_name, parse_attribute_value};
use super::path::{query, resolve_attribute, resolve_child_objects};
use crate::error::{Error, Result};
use crate::framework::{AttributeConfig, EntityConfig, Object, Value};
use crate::types::{JsonObject, JsonValue};
use std::collections::BTreeMap;

/// Convert one JSON object into an object of the given entity
///
/// The result may be empty when nothing in the JSON matched the schema.
pub fn convert_json_object(
    entity: &EntityConfig,
    value: &JsonValue,
    options: &JsonOptions,
) -> Result<Object> {
    let JsonValue::Object(object) = value else {
        return Err(Error::json_conversion(format!(
            "Entity {} expects a JSON object, found {}.",
            entity.external_id,
            json_type_name(value)
        )));
    };
    convert_entity(entity, value, object, options)
}

/// Convert a list of JSON objects into objects of the given entity
pub fn convert_json_object_list(
    entity: &EntityConfig,
    values: &[JsonValue],
    options: &JsonOptions,
) -> Result<Vec<Object>> {
    values
        .iter()
        .map(|value| convert_json_object(entity, value, options))
        .collect()
}

/// Parse a JSON response body and convert the objects it contains
///
/// Without a `record_path` the body must be an array of objects. With one,
/// the path (a JSONPath query) selects the objects inside the body.
pub fn convert_json_document(
    entity: &EntityConfig,
    body: &str,
    record_path: Option<&str>,
    options: &JsonOptions,
) -> Result<Vec<Object>> {
    let document: JsonValue = serde_json::from_str(body)
        .map_err(|e| Error::json_conversion(format!("Failed to parse JSON document: {e}")))?;

    let records = match record_path {
        Some(path) => {
            let mut matches = query(&document, path)?;
            if matches.len() == 1 && matches[0].is_array() {
                match matches.pop() {
                    Some(JsonValue::Array(items)) => items,
                    _ => Vec::new(),
                }
            } else {
                matches
            }
        }
        None => match document {
            JsonValue::Array(items) => items,
            other => {
                return Err(Error::json_conversion(format!(
                    "Expected a JSON array of objects, found {}.",
                    json_type_name(&other)
                )))
            }
        },
    };

    convert_json_object_list(entity, &records, options)
}

/// Convert one level of the entity tree
///
/// `root` is `object` as a [`JsonValue`], the document JSONPath queries run
/// against.
fn convert_entity(
    entity: &EntityConfig,
    root: &JsonValue,
    object: &JsonObject,
    options: &JsonOptions,
) -> Result<Object> {
    let mut result = Object::new();

    let (attributes, child_entities) = match options.delimiter() {
        Some(delimiter) => {
            let (direct, nested) = split_by_delimiter(entity, delimiter);
            for (key, pseudo_entity) in nested {
                convert_nested(&key, &pseudo_entity, object, delimiter, options, &mut result)?;
            }
            direct
        }
        None => (
            entity.attributes.iter().collect(),
            entity.child_entities.iter().collect(),
        ),
    };

    for attribute in attributes {
        let Some(raw) = resolve_attribute(attribute, root, object, options)? else {
            continue;
        };
        if let Some(value) = parse_attribute_value(attribute, &raw, options)? {
            result.insert(attribute.external_id.clone(), value);
        }
    }

    for child in child_entities {
        let elements = resolve_child_objects(child, root, object, options)?;
        if elements.is_empty() {
            continue;
        }

        let mut children = Vec::with_capacity(elements.len());
        for element in &elements {
            children.push(convert_json_object(child, element, options)?);
        }
        result.insert(child.external_id.clone(), Value::Objects(children));
    }

    Ok(result)
}

/// Attributes and child entities addressed directly at this level
type Direct<'a> = (Vec<&'a AttributeConfig>, Vec<&'a EntityConfig>);

/// Split an entity into directly addressed members and, per local key, a
/// pseudo-entity holding the members addressed through that key
fn split_by_delimiter<'a>(
    entity: &'a EntityConfig,
    delimiter: &str,
) -> (Direct<'a>, BTreeMap<String, EntityConfig>) {
    let mut direct: Direct<'a> = (Vec::new(), Vec::new());
    let mut nested: BTreeMap<String, EntityConfig> = BTreeMap::new();

    for attribute in &entity.attributes {
        match attribute.external_id.split_once(delimiter) {
            Some((key, rest)) => nested
                .entry(key.to_string())
                .or_insert_with(|| EntityConfig::new(key))
                .attributes
                .push(AttributeConfig {
                    external_id: rest.to_string(),
                    ..attribute.clone()
                }),
            None => direct.0.push(attribute),
        }
    }

    for child in &entity.child_entities {
        match child.external_id.split_once(delimiter) {
            Some((key, rest)) => nested
                .entry(key.to_string())
                .or_insert_with(|| EntityConfig::new(key))
                .child_entities
                .push(EntityConfig {
                    external_id: rest.to_string(),
                    ..child.clone()
                }),
            None => direct.1.push(child),
        }
    }

    (direct, nested)
}

/// Convert the nested object under `key` and merge its values back under
/// their full, delimited external identifiers
fn convert_nested(
    key: &str,
    pseudo_entity: &EntityConfig,
    object: &JsonObject,
    delimiter: &str,
    options: &JsonOptions,
    result: &mut Object,
) -> Result<()> {
    let nested = match object.get(key) {
        None | Some(JsonValue::Null) => return Ok(()),
        Some(nested @ JsonValue::Object(_)) => nested,
        Some(other) => {
            return Err(Error::json_conversion(format!(
                "Value of {key} must be a JSON object to resolve nested attributes, found {}.",
                json_type_name(other)
            )))
        }
    };

    for (external_id, value) in convert_json_object(pseudo_entity, nested, options)? {
        result.insert(format!("{key}{delimiter}{external_id}"), value);
    }
    Ok(())
}
