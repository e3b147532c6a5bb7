//! Configuration management for the CLI
//!
//! Configuration comes from an explicit file (`--config` or
//! `RECORDSPEC_CONFIG`) or the first file found in the default locations,
//! and falls back to defaults. Command-line arguments override it.
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Schema used when `validate` is run without `--schema`
    pub default_schema: Option<String>,

    /// Directory searched for `<name>.schema.json|yaml` before bundled names
    pub schemas_dir: Option<PathBuf>,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (human, json, json-pretty, yaml)
    pub format: String,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) or an env-filter directive
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                Error::Io(e)
            }
        })?;

        let extension = path.extension().and_then(|s| s.to_str()).map(str::to_lowercase);
        let config = match extension.as_deref() {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?,
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?,
            _ => {
                return Err(Error::config(format!(
                    "{}: expected a .yaml, .yml or .json file",
                    path.display()
                )))
            }
        };

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".recordspec.yaml"), PathBuf::from(".recordspec.json")];

        if let Some(config_dir) = dirs::config_dir() {
            let recordspec_dir = config_dir.join("recordspec");
            paths.push(recordspec_dir.join("config.yaml"));
            paths.push(recordspec_dir.join("config.json"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.default_schema.is_none());
        assert_eq!(config.output.format, "human");
        assert!(config.output.color);
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_yaml_config_with_partial_sections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "default_schema: customer\noutput:\n  format: json\nlogging:\n  level: debug\n",
        )
        .unwrap();

        let config = Config::load_with_file(Some(&path)).unwrap();
        assert_eq!(config.default_schema.as_deref(), Some("customer"));
        assert_eq!(config.output.format, "json");
        assert!(config.output.color);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert!(config.logging.format.is_none());
    }

    #[test]
    fn test_json_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"schemas_dir": "schemas", "output": {"color": false}}"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.schemas_dir, Some(PathBuf::from("schemas")));
        assert!(!config.output.color);
        assert_eq!(config.output.format, "human");
    }

    #[test]
    fn test_missing_explicit_config_is_not_found() {
        let dir = tempdir().unwrap();
        let err = Config::load_with_file(Some(&dir.path().join("absent.yaml"))).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"output": {"color": "sometimes"}}"#).unwrap();
        assert!(matches!(Config::from_file(&path), Err(Error::Config(_))));

        let path = dir.path().join("config.toml");
        fs::write(&path, "default_schema = 'vendor'").unwrap();
        assert!(matches!(Config::from_file(&path), Err(Error::Config(_))));
    }
}
