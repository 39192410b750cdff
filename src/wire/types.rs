//! Wire message types
//!
//! Request and response messages of the `GetPage` call.

use crate::types::{AttributeType, Duration};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Request
// ============================================================================

/// A request for one page of objects of a single entity
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GetPageRequest {
    /// Datasource to read from
    pub datasource: Option<DatasourceConfig>,
    /// Entity (and child entities) to read
    pub entity: Option<EntityConfig>,
    /// Maximum number of objects to return
    pub page_size: i64,
    /// Cursor returned with the previous page, empty for the first page
    pub cursor: String,
}

/// Datasource configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasourceConfig {
    /// Internal identifier of the datasource
    pub id: String,
    /// Adapter-specific configuration, a JSON document
    #[serde(with = "super::base64_bytes", skip_serializing_if = "Vec::is_empty")]
    pub config: Vec<u8>,
    /// Address of the datasource (host name, URL, ...)
    pub address: String,
    /// Credentials used to access the datasource
    pub auth: Option<DatasourceAuthCredentials>,
    /// Datasource type name
    #[serde(rename = "type")]
    pub datasource_type: String,
    /// Connector routing information
    pub connector_info: Option<ConnectorInfo>,
}

/// Credentials used to access a datasource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasourceAuthCredentials {
    /// Username and password
    Basic(BasicAuth),
    /// Full value of an HTTP `Authorization` header
    HttpAuthorization(String),
}

/// Username and password
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

/// Connector routing information
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorInfo {
    pub id: String,
    pub client_id: String,
}

/// Entity schema node
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityConfig {
    /// Internal identifier
    pub id: String,
    /// Adapter-facing identifier
    pub external_id: String,
    /// Whether objects must be returned in a stable order
    pub ordered: bool,
    /// Declared attributes
    pub attributes: Vec<AttributeConfig>,
    /// Declared child entities
    pub child_entities: Vec<EntityConfig>,
}

/// Attribute declaration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeConfig {
    /// Internal identifier
    pub id: String,
    /// Adapter-facing identifier
    pub external_id: String,
    /// Declared type
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    /// Whether the attribute holds a list of values
    pub list: bool,
    /// Whether the attribute uniquely identifies an object
    pub unique_id: bool,
}

// ============================================================================
// Response
// ============================================================================

/// Result of a `GetPage` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GetPageResponse {
    /// A page of objects
    Success(Page),
    /// The request failed
    Error(PageError),
}

impl GetPageResponse {
    /// Create an error response
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Error(PageError::new(code, message))
    }

    /// The page, if this is a successful response
    pub fn success(&self) -> Option<&Page> {
        match self {
            Self::Success(page) => Some(page),
            Self::Error(_) => None,
        }
    }

    /// The error, if this is a failed response
    pub fn as_error(&self) -> Option<&PageError> {
        match self {
            Self::Success(_) => None,
            Self::Error(error) => Some(error),
        }
    }
}

/// A page of objects
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    pub objects: Vec<Object>,
    /// Cursor of the next page, empty when this is the last page
    pub next_cursor: String,
}

/// One entity instance
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Object {
    pub attributes: Vec<Attribute>,
    pub child_objects: Vec<EntityObjects>,
}

impl Object {
    /// Find an attribute by internal identifier
    pub fn attribute(&self, id: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.id == id)
    }

    /// Find the child objects of an entity by internal identifier
    pub fn children(&self, entity_id: &str) -> Option<&EntityObjects> {
        self.child_objects.iter().find(|c| c.entity_id == entity_id)
    }
}

/// Instances of one child entity
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityObjects {
    pub entity_id: String,
    pub objects: Vec<Object>,
}

/// An attribute instance with its values
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Attribute {
    pub id: String,
    pub values: Vec<AttributeValue>,
}

/// A typed attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
    NullValue,
    BoolValue(bool),
    DatetimeValue(DateTimeValue),
    DoubleValue(f64),
    DurationValue(Duration),
    Int64Value(i64),
    StringValue(String),
}

/// A UTC instant together with the offset it was observed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeValue {
    pub timestamp: DateTime<Utc>,
    /// Offset east of UTC, in seconds
    pub timezone_offset: i32,
}

impl From<&DateTime<FixedOffset>> for DateTimeValue {
    fn from(value: &DateTime<FixedOffset>) -> Self {
        Self {
            timestamp: value.with_timezone(&Utc),
            timezone_offset: value.offset().local_minus_utc(),
        }
    }
}

/// Error returned instead of a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageError {
    pub message: String,
    pub code: ErrorCode,
    /// Hint for when the request may be retried
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<std::time::Duration>,
}

impl PageError {
    /// Create an error without a retry hint
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            retry_after: None,
        }
    }
}

/// Stable error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    #[default]
    Unspecified,
    /// The adapter returned data inconsistent with the request
    Internal,
    InvalidPageRequestConfig,
    InvalidDatasourceConfig,
    InvalidEntityConfig,
    DatasourceFailed,
    DatasourceUnreachable,
    DatasourceAuthenticationFailed,
    DatasourcePermissionDenied,
    DatasourceRateLimited,
    DatasourceTimeout,
    /// The caller presented no valid auth token
    Unauthenticated,
}

impl ErrorCode {
    /// Whether the caller may retry a request that failed with this code
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            ErrorCode::DatasourceUnreachable
                | ErrorCode::DatasourceRateLimited
                | ErrorCode::DatasourceTimeout
        )
    }
}
