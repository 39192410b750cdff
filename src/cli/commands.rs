//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Datasource adapter framework tooling
#[derive(Parser, Debug)]
#[command(name = "solidafy-adapter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Framework configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a wire page request and show what an adapter would receive
    Validate {
        /// Page request file (JSON)
        #[arg(short, long)]
        request: PathBuf,
    },

    /// Convert a JSON document into objects of an entity
    Convert {
        /// Entity file (YAML or JSON), addressed by external identifiers
        #[arg(short, long)]
        entity: PathBuf,

        /// JSON document to convert
        #[arg(short, long)]
        input: PathBuf,

        /// JSONPath selecting the records inside the document
        #[arg(long)]
        record_path: Option<String>,

        /// Treat external identifiers starting with `$` as JSONPath queries
        #[arg(long)]
        json_path: bool,

        /// Delimiter for addressing nested objects
        #[arg(long)]
        delimiter: Option<String>,
    },

    /// Decode a base64 JSON page cursor
    DecodeCursor {
        /// The cursor
        cursor: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
}
