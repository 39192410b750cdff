//! Tests for the wire messages

use super::*;
use crate::types::{AttributeType, Duration};
use chrono::DateTime;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_request_from_json() {
    let request: GetPageRequest = serde_json::from_value(json!({
        "datasource": {
            "id": "ds1",
            "config": "eyJrIjogInYifQ==",
            "address": "api.example.com",
            "auth": {"basic": {"username": "u", "password": "p"}},
            "type": "rest"
        },
        "entity": {
            "id": "1",
            "external_id": "users",
            "attributes": [
                {"id": "a1", "external_id": "name", "type": "STRING"},
                {"id": "a2", "external_id": "tags", "type": "ATTRIBUTE_TYPE_STRING", "list": true}
            ]
        },
        "page_size": 100
    }))
    .unwrap();

    let datasource = request.datasource.unwrap();
    assert_eq!(datasource.config, br#"{"k": "v"}"#.to_vec());
    assert_eq!(datasource.datasource_type, "rest");
    assert_eq!(
        datasource.auth,
        Some(DatasourceAuthCredentials::Basic(BasicAuth {
            username: "u".to_string(),
            password: "p".to_string(),
        }))
    );
    assert!(datasource.connector_info.is_none());

    let entity = request.entity.unwrap();
    assert_eq!(entity.attributes.len(), 2);
    assert_eq!(entity.attributes[1].attribute_type, AttributeType::String);
    assert!(entity.attributes[1].list);
    assert!(entity.child_entities.is_empty());

    assert_eq!(request.page_size, 100);
    assert_eq!(request.cursor, "");
}

#[test]
fn test_missing_fields_default() {
    let request: GetPageRequest = serde_json::from_str("{}").unwrap();
    assert_eq!(request, GetPageRequest::default());

    let datasource: DatasourceConfig = serde_json::from_value(json!({"config": null})).unwrap();
    assert!(datasource.config.is_empty());
}

#[test]
fn test_invalid_base64_config() {
    let result = serde_json::from_value::<DatasourceConfig>(json!({"config": "%%%"}));
    assert!(result.is_err());
}

#[test]
fn test_empty_config_is_not_serialized() {
    let json = serde_json::to_value(DatasourceConfig::default()).unwrap();
    assert!(json.get("config").is_none());

    let datasource = DatasourceConfig {
        config: b"{}".to_vec(),
        ..Default::default()
    };
    let json = serde_json::to_value(datasource).unwrap();
    assert_eq!(json["config"], "e30=");
}

#[test]
fn test_attribute_value_shape() {
    let values = vec![
        AttributeValue::NullValue,
        AttributeValue::StringValue("x".to_string()),
        AttributeValue::Int64Value(7),
        AttributeValue::DurationValue(Duration::new(1, 5)),
    ];
    let json = serde_json::to_value(&values).unwrap();
    assert_eq!(
        json,
        json!([
            "null_value",
            {"string_value": "x"},
            {"int64_value": 7},
            {"duration_value": {"seconds": 1, "nanos": 5, "months": 0, "days": 0}}
        ])
    );
}

#[test]
fn test_date_time_value_keeps_offset() {
    let dt = DateTime::parse_from_rfc3339("2024-01-15T10:30:00+02:00").unwrap();
    let value = DateTimeValue::from(&dt);
    assert_eq!(value.timezone_offset, 7200);
    assert_eq!(value.timestamp.to_rfc3339(), "2024-01-15T08:30:00+00:00");
}

#[test]
fn test_response_accessors() {
    let response = GetPageResponse::error(ErrorCode::InvalidEntityConfig, "bad");
    assert!(response.success().is_none());
    assert_eq!(response.as_error().unwrap().message, "bad");

    let response = GetPageResponse::Success(Page::default());
    assert!(response.success().is_some());
    assert!(response.as_error().is_none());
}

#[test]
fn test_response_json_shape() {
    let response = GetPageResponse::Success(Page {
        objects: vec![Object {
            attributes: vec![Attribute {
                id: "1".to_string(),
                values: vec![AttributeValue::StringValue("Alice".to_string())],
            }],
            child_objects: vec![],
        }],
        next_cursor: String::new(),
    });

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(
        json,
        json!({
            "success": {
                "objects": [{
                    "attributes": [{"id": "1", "values": [{"string_value": "Alice"}]}],
                    "child_objects": []
                }],
                "next_cursor": ""
            }
        })
    );

    let json = serde_json::to_value(GetPageResponse::error(ErrorCode::DatasourceTimeout, "slow"))
        .unwrap();
    assert_eq!(
        json,
        json!({"error": {"message": "slow", "code": "DATASOURCE_TIMEOUT"}})
    );
}

#[test]
fn test_object_lookup() {
    let object = Object {
        attributes: vec![Attribute {
            id: "a".to_string(),
            values: vec![],
        }],
        child_objects: vec![EntityObjects {
            entity_id: "e".to_string(),
            objects: vec![],
        }],
    };
    assert!(object.attribute("a").is_some());
    assert!(object.attribute("b").is_none());
    assert!(object.children("e").is_some());
}

#[test]
fn test_retryable_codes() {
    assert!(ErrorCode::DatasourceUnreachable.is_retryable());
    assert!(ErrorCode::DatasourceRateLimited.is_retryable());
    assert!(ErrorCode::DatasourceTimeout.is_retryable());
    assert!(!ErrorCode::DatasourceFailed.is_retryable());
    assert!(!ErrorCode::InvalidEntityConfig.is_retryable());
    assert!(!ErrorCode::Internal.is_retryable());
}
