//! Wire message module
//!
//! The messages exchanged with the platform across the RPC boundary.
//!
//! # Overview
//!
//! Entities and attributes on the wire carry two identifiers: an opaque
//! internal `id` assigned by the platform and an `external_id` chosen by the
//! adapter author. Attribute values are a closed, tagged set of types.
//! The JSON mapping follows the protobuf conventions: `bytes` fields are
//! base64 strings and enum values use their upper-case names.

mod types;

pub use types::{
    Attribute, AttributeConfig, AttributeValue, BasicAuth, ConnectorInfo, DatasourceAuthCredentials,
    DatasourceConfig, DateTimeValue, EntityConfig, EntityObjects, ErrorCode, GetPageRequest,
    GetPageResponse, Object, Page, PageError,
};

/// Serde helpers for `bytes` fields encoded as base64 strings
pub(crate) mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests;
