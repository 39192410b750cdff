//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{load_config, FrameworkConfig};
use crate::error::{Error, Result};
use crate::framework::EntityConfig;
use crate::json::{convert_json_document, JsonOptions};
use crate::pagination::decode_cursor;
use crate::request::validate_get_page_request;
use crate::types::JsonValue;
use crate::wire::GetPageRequest;
use serde_json::json;
use std::fs;
use std::path::Path;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        let output = match &self.cli.command {
            Commands::Validate { request } => self.validate(request)?,
            Commands::Convert {
                entity,
                input,
                record_path,
                json_path,
                delimiter,
            } => self.convert(
                entity,
                input,
                record_path.as_deref(),
                *json_path,
                delimiter.as_deref(),
            )?,
            Commands::DecodeCursor { cursor } => decode_cursor(cursor)?,
        };

        self.output_message(&output);
        Ok(())
    }

    /// Load the framework configuration, or the defaults without `--config`
    fn load_config(&self) -> Result<FrameworkConfig> {
        match &self.cli.config {
            Some(path) => load_config(path),
            None => Ok(FrameworkConfig::default()),
        }
    }

    /// JSON options from the configuration with command-line overrides
    fn json_options(&self, json_path: bool, delimiter: Option<&str>) -> Result<JsonOptions> {
        let mut options = self.load_config()?.json;
        if json_path {
            options = options.with_json_path();
        }
        if let Some(delimiter) = delimiter {
            options = options.with_delimiter(delimiter);
        }
        Ok(options)
    }

    /// Validate a page request
    ///
    /// A rejected request is not a command failure; the wire error is
    /// printed instead.
    fn validate(&self, path: &Path) -> Result<JsonValue> {
        let content = read_file(path)?;
        let request: GetPageRequest = serde_json::from_str(&content)
            .map_err(|e| Error::config(format!("Invalid page request JSON: {e}")))?;

        Ok(match validate_get_page_request::<JsonValue>(&request) {
            Ok((request, mapping)) => json!({
                "type": "VALID",
                "datasource_id": request.datasource_id,
                "config": request.config,
                "entity": request.entity,
                "page_size": request.page_size,
                "cursor": request.cursor,
                "reverse_mapping": mapping,
            }),
            Err(e) => json!({
                "type": "ERROR",
                "error": e.to_wire(),
            }),
        })
    }

    /// Convert a JSON document
    fn convert(
        &self,
        entity_path: &Path,
        input_path: &Path,
        record_path: Option<&str>,
        json_path: bool,
        delimiter: Option<&str>,
    ) -> Result<JsonValue> {
        let options = self.json_options(json_path, delimiter)?;
        let entity: EntityConfig = serde_yaml::from_str(&read_file(entity_path)?)
            .map_err(|e| Error::config(format!("Invalid entity definition: {e}")))?;
        let document = read_file(input_path)?;

        let objects = convert_json_document(&entity, &document, record_path, &options)?;
        Ok(json!({
            "type": "OBJECTS",
            "entity": entity.external_id,
            "count": objects.len(),
            "objects": objects,
        }))
    }

    /// Output a message
    fn output_message(&self, msg: &JsonValue) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read {}: {e}", path.display())))
}
