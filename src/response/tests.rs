//! Tests for response assembly

use super::*;
use crate::framework::{AdapterError, Object, Page, Response, Value};
use crate::request::{AttributeReverseMapping, EntityReverseMapping};
use crate::types::AttributeType;
use crate::wire::{self, AttributeValue, ErrorCode, GetPageResponse};
use pretty_assertions::assert_eq;
use std::time::Duration;

fn attribute(id: &str, attribute_type: AttributeType, list: bool) -> AttributeReverseMapping {
    AttributeReverseMapping {
        id: id.to_string(),
        attribute_type,
        list,
    }
}

fn groups_mapping() -> EntityReverseMapping {
    EntityReverseMapping {
        id: "E2".to_string(),
        external_id: "groups".to_string(),
        attributes: [("name".to_string(), attribute("G1", AttributeType::String, false))].into(),
        child_entities: Default::default(),
    }
}

fn users_mapping() -> EntityReverseMapping {
    EntityReverseMapping {
        id: "E1".to_string(),
        external_id: "users".to_string(),
        attributes: [
            ("name".to_string(), attribute("A1", AttributeType::String, false)),
            ("age".to_string(), attribute("A2", AttributeType::Int64, false)),
            ("emails".to_string(), attribute("A3", AttributeType::String, true)),
        ]
        .into(),
        child_entities: [("groups".to_string(), groups_mapping())].into(),
    }
}

fn object(entries: Vec<(&str, Value)>) -> Object {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn string_attribute(id: &str, value: &str) -> wire::Attribute {
    wire::Attribute {
        id: id.to_string(),
        values: vec![AttributeValue::StringValue(value.to_string())],
    }
}

// ============================================================================
// Response Envelope
// ============================================================================

#[test]
fn test_success_page() {
    let response = Response::success(
        vec![object(vec![("name", Value::from("Alice"))])],
        Some("next".to_string()),
    );

    let wire = build_get_page_response(&users_mapping(), response);

    assert_eq!(
        wire,
        GetPageResponse::Success(wire::Page {
            objects: vec![wire::Object {
                attributes: vec![string_attribute("A1", "Alice")],
                child_objects: vec![],
            }],
            next_cursor: "next".to_string(),
        })
    );
}

#[test]
fn test_last_page_has_empty_cursor() {
    let response = Response::success(vec![], None);
    let wire = build_get_page_response(&users_mapping(), response);
    assert_eq!(wire.success().unwrap().next_cursor, "");
}

#[test]
fn test_adapter_error_passes_through() {
    let response = Response::error(
        AdapterError::new(ErrorCode::DatasourceRateLimited, "Too many requests.")
            .with_retry_after(Duration::from_secs(60)),
    );

    let wire = build_get_page_response(&users_mapping(), response);
    let error = wire.as_error().unwrap();
    assert_eq!(error.code, ErrorCode::DatasourceRateLimited);
    assert_eq!(error.message, "Too many requests.");
    assert_eq!(error.retry_after, Some(Duration::from_secs(60)));
}

#[test]
fn test_empty_response_is_internal_error() {
    let wire = build_get_page_response(&users_mapping(), Response::default());
    let error = wire.as_error().unwrap();
    assert_eq!(error.code, ErrorCode::Internal);
    assert!(error.message.contains("bug in the adapter"));
}

#[test]
fn test_error_wins_over_success() {
    let response = Response {
        success: Some(Page::default()),
        error: Some(AdapterError::new(ErrorCode::DatasourceFailed, "boom")),
    };
    let wire = build_get_page_response(&users_mapping(), response);
    assert_eq!(wire.as_error().unwrap().code, ErrorCode::DatasourceFailed);
}

// ============================================================================
// Objects
// ============================================================================

#[test]
fn test_keys_encoded_in_sorted_order() {
    let encoded = build_object(
        &users_mapping(),
        &object(vec![
            ("name", Value::from("Alice")),
            ("age", Value::Int64(30)),
            ("emails", Value::list(["a@x.com", "b@x.com"])),
        ]),
    )
    .unwrap();

    let ids: Vec<&str> = encoded.attributes.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["A2", "A3", "A1"]);
    assert_eq!(encoded.attribute("A3").unwrap().values.len(), 2);
}

#[test]
fn test_null_attribute_is_omitted() {
    let encoded = build_object(
        &users_mapping(),
        &object(vec![("name", Value::from("Alice")), ("age", Value::Null)]),
    )
    .unwrap();
    assert_eq!(encoded.attributes, vec![string_attribute("A1", "Alice")]);
}

#[test]
fn test_optional_none_is_wire_null() {
    let encoded = build_object(
        &users_mapping(),
        &object(vec![("age", Value::optional(None::<i64>))]),
    )
    .unwrap();
    assert_eq!(
        encoded.attributes[0].values,
        vec![AttributeValue::NullValue]
    );
}

#[test]
fn test_unknown_attribute_is_error() {
    let err = build_object(
        &users_mapping(),
        &object(vec![("name", Value::from("Alice")), ("nickname", Value::from("Al"))]),
    )
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Internal);
    assert!(err.message().contains("\"nickname\""));
    assert!(err.message().contains("users"));
}

#[test]
fn test_unknown_child_entity_is_error() {
    let err = build_object(
        &users_mapping(),
        &object(vec![("name", Value::from("Alice")), ("roles", Value::Objects(vec![]))]),
    )
    .unwrap_err();
    assert!(err.message().contains("no child entity"));
}

#[test]
fn test_type_mismatch_names_declared_and_actual_types() {
    let err = build_object(&users_mapping(), &object(vec![("age", Value::from("thirty"))]))
        .unwrap_err();
    let message = err.message();
    assert!(message.contains("\"age\""), "{message}");
    assert!(message.contains("INT64"), "{message}");
    assert!(message.contains("String"), "{message}");

    let err = build_object(&users_mapping(), &object(vec![("age", Value::Int32(30))])).unwrap_err();
    assert!(err.message().contains("i32"));
}

#[test]
fn test_list_value_on_non_list_attribute_is_error() {
    let err = build_object(
        &users_mapping(),
        &object(vec![("name", Value::list(["Alice", "Bob"]))]),
    )
    .unwrap_err();
    let message = err.message();
    assert_eq!(err.code(), ErrorCode::Internal);
    assert!(message.contains("\"name\""), "{message}");
    assert!(message.contains("declared as STRING"), "{message}");
    assert!(message.contains("Vec<String>"), "{message}");
}

#[test]
fn test_scalar_value_on_list_attribute_is_error() {
    let err = build_object(
        &users_mapping(),
        &object(vec![("name", Value::from("Alice")), ("emails", Value::from("a@x.com"))]),
    )
    .unwrap_err();
    let message = err.message();
    assert_eq!(err.code(), ErrorCode::Internal);
    assert!(message.contains("\"emails\""), "{message}");
    assert!(message.contains("declared as a list of STRING"), "{message}");
    assert!(message.contains("type String"), "{message}");
}

#[test]
fn test_object_without_attributes_is_error() {
    let err = build_object(&users_mapping(), &object(vec![("name", Value::Null)])).unwrap_err();
    assert_eq!(err.code(), ErrorCode::Internal);
    assert!(err.message().contains("no attribute values"));

    assert!(build_object(&users_mapping(), &Object::new()).is_err());
}

#[test]
fn test_child_objects() {
    let encoded = build_object(
        &users_mapping(),
        &object(vec![
            ("name", Value::from("Alice")),
            (
                "groups",
                Value::Objects(vec![
                    object(vec![("name", Value::from("admins"))]),
                    object(vec![("name", Value::from("users"))]),
                ]),
            ),
        ]),
    )
    .unwrap();

    let groups = encoded.children("E2").unwrap();
    assert_eq!(groups.objects.len(), 2);
    assert_eq!(
        groups.objects[1].attributes,
        vec![string_attribute("G1", "users")]
    );
}

#[test]
fn test_empty_child_list_is_skipped() {
    let encoded = build_object(
        &users_mapping(),
        &object(vec![("name", Value::from("Alice")), ("groups", Value::Objects(vec![]))]),
    )
    .unwrap();
    assert!(encoded.child_objects.is_empty());
}

#[test]
fn test_invalid_child_is_dropped() {
    let encoded = build_object(
        &users_mapping(),
        &object(vec![
            ("name", Value::from("Alice")),
            (
                "groups",
                Value::Objects(vec![
                    object(vec![("name", Value::Null)]),
                    object(vec![("name", Value::from("admins"))]),
                ]),
            ),
        ]),
    )
    .unwrap();

    let groups = encoded.children("E2").unwrap();
    assert_eq!(groups.objects.len(), 1);
}

#[test]
fn test_all_children_dropped_is_not_encoded() {
    let encoded = build_object(
        &users_mapping(),
        &object(vec![
            ("name", Value::from("Alice")),
            ("groups", Value::Objects(vec![object(vec![("bogus", Value::Bool(true))])])),
        ]),
    )
    .unwrap();
    assert!(encoded.child_objects.is_empty());
}

#[test]
fn test_children_alone_do_not_make_an_object_valid() {
    let err = build_object(
        &users_mapping(),
        &object(vec![(
            "groups",
            Value::Objects(vec![object(vec![("name", Value::from("admins"))])]),
        )]),
    )
    .unwrap_err();
    assert!(err.message().contains("no attribute values"));
}

#[test]
fn test_invalid_object_dropped_from_page() {
    let response = Response::success(
        vec![
            object(vec![("name", Value::from("Alice"))]),
            object(vec![("name", Value::Null)]),
            object(vec![("name", Value::from("Bob"))]),
        ],
        None,
    );

    let wire = build_get_page_response(&users_mapping(), response);
    let page = wire.success().unwrap();
    assert_eq!(page.objects.len(), 2);
    assert_eq!(page.objects[1].attributes, vec![string_attribute("A1", "Bob")]);
}
