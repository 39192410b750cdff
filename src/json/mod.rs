//! JSON object converter
//!
//! Builds adapter [`Object`](crate::framework::Object)s from raw JSON
//! documents and an entity schema, for adapters whose datasource speaks JSON.
//!
//! # Addressing
//!
//! An attribute or child entity is found in a JSON object by its external
//! identifier, in one of three ways:
//!
//! - **Direct**: the external identifier is a key of the object.
//! - **Delimiter**: with a delimiter such as `__` configured, `address__city`
//!   reads `city` from the nested object under `address`, to any depth.
//! - **JSONPath**: with JSONPath enabled, an external identifier starting with
//!   `$` is a query against the object, e.g. `$.emails[?(@.primary==true)].value`.
//!
//! JSONPath and delimiter addressing are mutually exclusive: enabling JSONPath
//! disables delimiter addressing for the whole entity tree.

mod converter;
mod options;
mod parse;
mod path;

pub use converter::{convert_json_document, convert_json_object, convert_json_object_list};
pub use options::{DateTimeFormat, JsonOptions, JSON_PATH_ANCHOR};
pub use parse::{parse_date_time, parse_duration_literal};
