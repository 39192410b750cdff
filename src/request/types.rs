//! Reverse mapping types

use crate::types::AttributeType;
use serde::Serialize;
use std::collections::BTreeMap;

/// Index from external identifiers back to wire identifiers for one entity
///
/// Built once per validated request and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EntityReverseMapping {
    /// Internal identifier of the entity
    pub id: String,
    pub external_id: String,
    /// Attributes by external identifier
    pub attributes: BTreeMap<String, AttributeReverseMapping>,
    /// Child entities by external identifier
    pub child_entities: BTreeMap<String, EntityReverseMapping>,
}

/// Wire identity and declared shape of one attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeReverseMapping {
    /// Internal identifier of the attribute
    pub id: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    pub list: bool,
}

impl EntityReverseMapping {
    /// Look up an attribute by external identifier
    pub fn attribute(&self, external_id: &str) -> Option<&AttributeReverseMapping> {
        self.attributes.get(external_id)
    }

    /// Look up a child entity by external identifier
    pub fn child_entity(&self, external_id: &str) -> Option<&EntityReverseMapping> {
        self.child_entities.get(external_id)
    }
}
