//! CLI module
//!
//! Command-line tooling for adapter authors.
//!
//! # Commands
//!
//! - `validate` - Validate a wire page request and show the translated entity
//! - `convert` - Convert a JSON document into objects of an entity
//! - `decode-cursor` - Show the JSON inside a page cursor

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
