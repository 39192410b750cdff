//! Request validation and translation
//!
//! Turns a wire [`GetPageRequest`](crate::wire::GetPageRequest) into the
//! adapter-facing [`Request`](crate::framework::Request) and, in the same
//! pass, builds the [`EntityReverseMapping`] the response assembler uses to
//! put internal identifiers back onto the adapter's objects.
//!
//! Validation fails fast: the first violation found is reported.
//!
//! # Example
//!
//! ```ignore
//! let (request, mapping) = validate_get_page_request::<MyConfig>(&wire_request)?;
//! let response = adapter.get_page(&request).await;
//! let wire_response = build_get_page_response(&mapping, response);
//! ```

mod types;
mod validate;

pub use types::{AttributeReverseMapping, EntityReverseMapping};
pub use validate::{validate_entity_config, validate_get_page_request};
