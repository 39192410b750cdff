//! Cursor encoding

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Position in a paged collection of paged collections
///
/// `cursor` is the position in the outer collection. While a member of the
/// outer collection is being paged through, `collection_id` names it and
/// `collection_cursor` is the position inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeCursor<K> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<K>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_cursor: Option<K>,
}

impl<K> Default for CompositeCursor<K> {
    fn default() -> Self {
        Self {
            cursor: None,
            collection_id: None,
            collection_cursor: None,
        }
    }
}

impl<K> CompositeCursor<K> {
    /// Cursor positioned on the outer collection only
    pub fn outer(cursor: K) -> Self {
        Self {
            cursor: Some(cursor),
            ..Default::default()
        }
    }

    /// Move into a member collection, keeping the outer position
    #[must_use]
    pub fn with_collection(
        mut self,
        collection_id: impl Into<String>,
        collection_cursor: Option<K>,
    ) -> Self {
        self.collection_id = Some(collection_id.into());
        self.collection_cursor = collection_cursor;
        self
    }

    /// Whether the cursor carries no position at all
    pub fn is_empty(&self) -> bool {
        self.cursor.is_none() && self.collection_id.is_none() && self.collection_cursor.is_none()
    }
}

/// Encode a cursor as base64 JSON
pub fn encode_cursor<T: Serialize>(cursor: &T) -> Result<String> {
    let json = serde_json::to_vec(cursor)
        .map_err(|e| Error::cursor(format!("Failed to serialize cursor: {e}")))?;
    Ok(STANDARD.encode(json))
}

/// Decode a base64 JSON cursor
pub fn decode_cursor<T: DeserializeOwned>(cursor: &str) -> Result<T> {
    let json = STANDARD
        .decode(cursor.trim())
        .map_err(|e| Error::cursor(format!("Cursor is not valid base64: {e}")))?;
    serde_json::from_slice(&json)
        .map_err(|e| Error::cursor(format!("Cursor does not hold a valid position: {e}")))
}

/// Decode the cursor of a request, `None` on the first page
pub fn decode_request_cursor<T: DeserializeOwned>(cursor: Option<&str>) -> Result<Option<T>> {
    cursor
        .filter(|c| !c.is_empty())
        .map(decode_cursor)
        .transpose()
}
