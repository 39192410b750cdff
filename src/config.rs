//! Framework configuration
//!
//! Settings shared by every request an adapter server handles, loaded from a
//! YAML file (JSON works too, being valid YAML). See
//! [`AdapterServer::from_config`](crate::AdapterServer::from_config).
//!
//! ```yaml
//! auth_tokens_path: /etc/adapter/tokens.json
//! token_reload_interval_secs: 30
//! json:
//!   complex_attribute_name_delimiter: "__"
//!   enable_json_path: false
//!   local_time_zone_offset: 0
//! ```

use crate::error::{Error, Result};
use crate::json::JsonOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Framework configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameworkConfig {
    /// JSON file holding the array of valid caller tokens
    pub auth_tokens_path: Option<PathBuf>,

    /// How often the token file is checked for changes, 0 to never reload
    pub token_reload_interval_secs: u64,

    /// Options for converting JSON documents into objects
    pub json: JsonOptions,
}

impl FrameworkConfig {
    /// Interval for watching the token file, if reloading is enabled
    pub fn token_reload_interval(&self) -> Option<Duration> {
        (self.token_reload_interval_secs > 0)
            .then(|| Duration::from_secs(self.token_reload_interval_secs))
    }
}

/// Load the framework configuration from a file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FrameworkConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read config file {}: {e}", path.display()))
    })?;
    load_config_from_str(&content)
}

/// Load the framework configuration from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<FrameworkConfig> {
    let config: FrameworkConfig = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse config YAML: {e}")))?;

    if chrono::FixedOffset::east_opt(config.json.local_time_zone_offset).is_none() {
        return Err(Error::config(format!(
            "local_time_zone_offset must be within one day, got {}s",
            config.json.local_time_zone_offset
        )));
    }
    if config.json.date_time_formats.is_empty() {
        return Err(Error::config("At least one date-time format is required"));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::DateTimeFormat;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config() {
        let config = load_config_from_str("{}").unwrap();
        assert_eq!(config, FrameworkConfig::default());
        assert!(config.token_reload_interval().is_none());
        assert_eq!(config.json, JsonOptions::default());
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
auth_tokens_path: /etc/adapter/tokens.json
token_reload_interval_secs: 30
json:
  complex_attribute_name_delimiter: "__"
  local_time_zone_offset: -18000
  date_time_formats:
    - format: "%Y-%m-%dT%H:%M:%S%z"
      has_timezone: true
"#;
        let config = load_config_from_str(yaml).unwrap();

        assert_eq!(
            config.auth_tokens_path,
            Some(PathBuf::from("/etc/adapter/tokens.json"))
        );
        assert_eq!(config.token_reload_interval(), Some(Duration::from_secs(30)));
        assert_eq!(
            config.json.complex_attribute_name_delimiter.as_deref(),
            Some("__")
        );
        assert!(!config.json.enable_json_path);
        assert_eq!(config.json.local_time_zone_offset, -18_000);
        assert_eq!(
            config.json.date_time_formats,
            vec![DateTimeFormat::with_timezone("%Y-%m-%dT%H:%M:%S%z")]
        );
    }

    #[test]
    fn test_json_config() {
        let config = load_config_from_str(r#"{"json": {"enable_json_path": true}}"#).unwrap();
        assert!(config.json.enable_json_path);
    }

    #[test]
    fn test_invalid_config() {
        assert!(load_config_from_str("unknown_key: 1").is_err());
        assert!(load_config_from_str("json:\n  local_time_zone_offset: 90000").is_err());
        assert!(load_config_from_str("json:\n  date_time_formats: []").is_err());
    }

    #[test]
    fn test_load_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "json:\n  enable_json_path: true").unwrap();

        let config = load_config(file.path()).unwrap();
        assert!(config.json.enable_json_path);

        let err = load_config("/nonexistent/config.yaml").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
