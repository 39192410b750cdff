//! Adapter request and response types

use super::value::Object;
use crate::error::Error;
use crate::types::AttributeType;
use crate::wire::ErrorCode;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

// ============================================================================
// Request
// ============================================================================

/// A validated page request, as seen by an adapter
#[derive(Debug, Clone, PartialEq)]
pub struct Request<Config> {
    /// Internal identifier of the datasource
    pub datasource_id: String,
    /// Address of the datasource
    pub address: Option<String>,
    /// Credentials used to access the datasource
    pub auth: Option<DatasourceAuthCredentials>,
    /// Parsed adapter configuration, if the datasource carried one
    pub config: Option<Config>,
    /// Datasource type name
    pub datasource_type: String,
    /// Connector routing information
    pub connector_info: Option<ConnectorInfo>,
    /// Entity to read
    pub entity: EntityConfig,
    /// Whether objects must be returned in a stable order
    pub ordered: bool,
    /// Maximum number of objects to return
    pub page_size: i64,
    /// Cursor of the page to read, `None` for the first page
    pub cursor: Option<String>,
}

/// Entity schema, addressed by external identifiers
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityConfig {
    pub external_id: String,
    pub ordered: bool,
    pub attributes: Vec<AttributeConfig>,
    pub child_entities: Vec<EntityConfig>,
}

impl EntityConfig {
    /// Create an entity with no attributes
    pub fn new(external_id: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            ..Default::default()
        }
    }

    /// Add an attribute
    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeConfig) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Add a child entity
    #[must_use]
    pub fn with_child_entity(mut self, child: EntityConfig) -> Self {
        self.child_entities.push(child);
        self
    }
}

/// Attribute declaration, addressed by external identifier
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeConfig {
    pub external_id: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    pub list: bool,
    pub unique_id: bool,
}

impl AttributeConfig {
    /// Create a single-valued attribute
    pub fn new(external_id: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self {
            external_id: external_id.into(),
            attribute_type,
            ..Default::default()
        }
    }

    /// Create a list attribute
    pub fn list(external_id: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self {
            list: true,
            ..Self::new(external_id, attribute_type)
        }
    }

    /// Mark the attribute as the unique identifier of its entity
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique_id = true;
        self
    }
}

/// Credentials used to access a datasource
#[derive(Clone, PartialEq, Eq)]
pub enum DatasourceAuthCredentials {
    /// Username and password
    Basic { username: String, password: String },
    /// Full value of an HTTP `Authorization` header
    HttpAuthorization(String),
}

impl DatasourceAuthCredentials {
    /// Render the credentials as an HTTP `Authorization` header value
    pub fn authorization_header(&self) -> String {
        match self {
            Self::Basic { username, password } => {
                format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
            }
            Self::HttpAuthorization(value) => value.clone(),
        }
    }
}

impl std::fmt::Debug for DatasourceAuthCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::HttpAuthorization(_) => f
                .debug_tuple("HttpAuthorization")
                .field(&"<redacted>")
                .finish(),
        }
    }
}

/// Connector routing information
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectorInfo {
    pub id: String,
    pub client_id: String,
}

// ============================================================================
// Response
// ============================================================================

/// The outcome of an adapter's `get_page`
///
/// Exactly one of `success` or `error` is expected to be set. A response
/// with neither is an adapter bug and is reported as an internal error.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Response {
    pub success: Option<Page>,
    pub error: Option<AdapterError>,
}

impl Response {
    /// Create a successful response
    pub fn success(objects: Vec<Object>, next_cursor: Option<String>) -> Self {
        Self {
            success: Some(Page {
                objects,
                next_cursor,
            }),
            error: None,
        }
    }

    /// Create a failed response
    pub fn error(error: AdapterError) -> Self {
        Self {
            success: None,
            error: Some(error),
        }
    }
}

/// A page of objects
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub objects: Vec<Object>,
    /// Cursor of the next page, `None` when this is the last page
    pub next_cursor: Option<String>,
}

/// An error diagnosed by the adapter itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterError {
    pub message: String,
    pub code: ErrorCode,
    pub retry_after: Option<std::time::Duration>,
}

impl AdapterError {
    /// Create an adapter error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            retry_after: None,
        }
    }

    /// Attach a retry hint
    #[must_use]
    pub fn with_retry_after(mut self, retry_after: std::time::Duration) -> Self {
        self.retry_after = Some(retry_after);
        self
    }
}

impl From<Error> for AdapterError {
    fn from(error: Error) -> Self {
        Self::new(error.code(), error.message())
    }
}
