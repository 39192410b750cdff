// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::float_cmp)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # Solidafy Adapter Framework
//!
//! A framework for datasource adapters that serve pages of hierarchical
//! objects over an RPC boundary.
//!
//! An adapter author implements one method, [`Adapter::get_page`]. The
//! framework validates each wire request against its entity schema, hands
//! the adapter a request addressed purely by external identifiers, and
//! re-encodes the plain objects the adapter returns into typed wire values.
//!
//! ## Features
//!
//! - **Schema Validation**: Fail-fast checks of datasource and entity configs
//! - **Reverse Mapping**: External identifiers mapped back to wire identifiers
//! - **Strict Coercion**: Runtime value types checked against declared types
//! - **JSON Conversion**: JSON documents to objects, with delimiter and JSONPath addressing
//! - **Token Auth**: File-backed caller tokens with live reload
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use solidafy_adapter::{Adapter, AdapterServer, Request, Response};
//! use solidafy_adapter::json::{convert_json_document, JsonOptions};
//!
//! struct UsersAdapter;
//!
//! #[async_trait::async_trait]
//! impl Adapter<serde_json::Value> for UsersAdapter {
//!     async fn get_page(&self, request: &Request<serde_json::Value>) -> Response {
//!         let body = fetch_users(request).await;
//!         match convert_json_document(&request.entity, &body, Some("$.data"), &JsonOptions::default()) {
//!             Ok(objects) => Response::success(objects, None),
//!             Err(e) => Response::error(e.into()),
//!         }
//!     }
//! }
//!
//! let server = AdapterServer::new(UsersAdapter);
//! let response = server.get_page(Some(token), &wire_request).await?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! GetPageRequest ─► request::validate ─► Request ─► Adapter::get_page
//!                          │                               │
//!                   EntityReverseMapping                Response
//!                          │                               │
//!                          └──────► response::assemble ◄───┘
//!                                          │
//!                                   GetPageResponse
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the framework
pub mod error;

/// Common types and type aliases
pub mod types;

/// Wire messages
pub mod wire;

/// Adapter-facing model
pub mod framework;

/// Adapter trait
pub mod adapter;

/// Attribute value coercion
pub mod attribute;

/// JSON to object conversion
pub mod json;

/// Request validation and translation
pub mod request;

/// Response assembly
pub mod response;

/// Caller authentication
pub mod auth;

/// Request pipeline
pub mod server;

/// Cursor helpers
pub mod pagination;

/// Framework configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use adapter::Adapter;
pub use framework::{AdapterError, Object, Request, Response, Value};
pub use server::AdapterServer;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
