//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::idc::PrimitiveKind;

/// Log levels accepted in `logging.level`.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Directory footprints are written to.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Default copper layer.
    #[serde(default)]
    pub layer: Option<String>,

    /// Default primitive kind (`pad` or `rect`).
    #[serde(default)]
    pub kind: Option<PrimitiveKind>,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }

        if let Some(ref layer) = self.layer {
            if layer.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: "Layer must not be empty".to_string(),
                });
            }
        }

        if let Some(ref dir) = self.output_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: "Output directory must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let json = r"{}";
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert!(config.output_dir.is_none());
        assert!(config.kind.is_none());
    }

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "_comment": "Test config",
            "output_dir": "/path/to/footprints.pretty",
            "layer": "B.Cu",
            "kind": "rect",
            "logging": {
                "level": "debug"
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.output_dir,
            Some(PathBuf::from("/path/to/footprints.pretty"))
        );
        assert_eq!(config.layer.as_deref(), Some("B.Cu"));
        assert_eq!(config.kind, Some(PrimitiveKind::Rectangle));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn kind_accepts_long_rectangle_name() {
        let json = r#"{ "kind": "rectangle" }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.kind, Some(PrimitiveKind::Rectangle));
    }

    #[test]
    fn logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn reject_invalid_log_level() {
        let json = r#"{
            "logging": {
                "level": "loud"
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_empty_layer() {
        let json = r#"{ "layer": "  " }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_unknown_kind() {
        let json = r#"{ "kind": "circle" }"#;
        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn reject_unknown_fields() {
        let json = r#"{
            "unknown_field": "value"
        }"#;

        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
