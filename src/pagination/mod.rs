//! Pagination helpers for adapters
//!
//! The framework treats page cursors as opaque strings. Adapters that page
//! over nested collections (for example, the members of every group) can use
//! [`CompositeCursor`] to carry both the outer and the inner position in a
//! single cursor, encoded as base64 JSON.

mod cursor;

pub use cursor::{decode_cursor, decode_request_cursor, encode_cursor, CompositeCursor};
