//! Wire encoding of adapter objects

use crate::attribute::attribute_values;
use crate::error::{Error, Result};
use crate::framework::{Object, Response, Value};
use crate::request::EntityReverseMapping;
use crate::wire::{self, Attribute, EntityObjects, ErrorCode, GetPageResponse, PageError};
use tracing::error;

const ADAPTER_BUG: &str = "This indicates a bug in the adapter.";

/// Build the wire response for an adapter response
///
/// An adapter error is passed through unchanged. A response with neither a
/// page nor an error is reported as an internal error.
pub fn build_get_page_response(
    mapping: &EntityReverseMapping,
    response: Response,
) -> GetPageResponse {
    if let Some(error) = response.error {
        return GetPageResponse::Error(PageError {
            message: error.message,
            code: error.code,
            retry_after: error.retry_after,
        });
    }

    let Some(page) = response.success else {
        return GetPageResponse::error(
            ErrorCode::Internal,
            format!("Adapter returned a response with neither a page nor an error. {ADAPTER_BUG}"),
        );
    };

    GetPageResponse::Success(wire::Page {
        objects: build_object_list(mapping, &page.objects),
        next_cursor: page.next_cursor.unwrap_or_default(),
    })
}

/// Encode a list of objects of one entity
///
/// Objects that fail to encode are logged and dropped.
pub fn build_object_list(mapping: &EntityReverseMapping, objects: &[Object]) -> Vec<wire::Object> {
    objects
        .iter()
        .enumerate()
        .filter_map(|(index, object)| match build_object(mapping, object) {
            Ok(encoded) => Some(encoded),
            Err(e) => {
                error!(
                    entity_id = %mapping.id,
                    entity_external_id = %mapping.external_id,
                    index,
                    error = %e,
                    "Dropping invalid object returned by adapter"
                );
                None
            }
        })
        .collect()
}

/// Encode a single object
///
/// Keys are visited in sorted order. Fails on the first key that does not
/// match the entity's schema, and when the object ends up with no attribute
/// values at all.
pub fn build_object(mapping: &EntityReverseMapping, object: &Object) -> Result<wire::Object> {
    let mut encoded = wire::Object::default();

    for (key, value) in object {
        match value {
            Value::Objects(children) => {
                let child_mapping = mapping.child_entity(key).ok_or_else(|| {
                    Error::internal(format!(
                        "Entity {} (id: {}) has no child entity with external id {key:?}. {ADAPTER_BUG}",
                        mapping.external_id, mapping.id
                    ))
                })?;
                if children.is_empty() {
                    continue;
                }

                let objects = build_object_list(child_mapping, children);
                if objects.is_empty() {
                    continue;
                }
                encoded.child_objects.push(EntityObjects {
                    entity_id: child_mapping.id.clone(),
                    objects,
                });
            }
            _ => {
                let attribute = mapping.attribute(key).ok_or_else(|| {
                    Error::internal(format!(
                        "Entity {} (id: {}) has no attribute with external id {key:?}. {ADAPTER_BUG}",
                        mapping.external_id, mapping.id
                    ))
                })?;

                let values = attribute_values(attribute.attribute_type, attribute.list, value)
                    .map_err(|e| {
                        Error::internal(format!(
                            "Attribute {key:?} (id: {}) of entity {} is declared as {}{} but has a value of type {}: {} {ADAPTER_BUG}",
                            attribute.id,
                            mapping.external_id,
                            if attribute.list { "a list of " } else { "" },
                            attribute.attribute_type,
                            value.type_name(),
                            e.message()
                        ))
                    })?;

                if let Some(values) = values {
                    encoded.attributes.push(Attribute {
                        id: attribute.id.clone(),
                        values,
                    });
                }
            }
        }
    }

    if encoded.attributes.is_empty() {
        return Err(Error::internal(format!(
            "Object of entity {} (id: {}) has no attribute values. {ADAPTER_BUG}",
            mapping.external_id, mapping.id
        )));
    }

    Ok(encoded)
}
