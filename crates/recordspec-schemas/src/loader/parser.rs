//! Document parsing for YAML and JSON files
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use crate::value::Value;
use std::path::Path;

/// Supported on-disk document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl DocumentFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(extension) => match extension.to_lowercase().as_str() {
                "yaml" | "yml" => Ok(Self::Yaml),
                "json" => Ok(Self::Json),
                _ => Err(LoaderError::UnsupportedFormat {
                    path: path.to_path_buf(),
                }),
            },
            None => Err(LoaderError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Get the primary file extension for this format
    pub fn primary_extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

/// Read a file as a JSON document, whatever its on-disk format
pub fn parse_file(path: &Path) -> LoaderResult<serde_json::Value> {
    let format = DocumentFormat::from_path(path)?;
    let content = read(path)?;
    parse_content(&content, format, path)
}

/// Parse document text with an explicit format
///
/// YAML is converted into the JSON document model, keeping mapping order.
pub fn parse_content(content: &str, format: DocumentFormat, path: &Path) -> LoaderResult<serde_json::Value> {
    match format {
        DocumentFormat::Json => serde_json::from_str(content).map_err(|source| LoaderError::JsonParse {
            path: path.to_path_buf(),
            source,
        }),
        DocumentFormat::Yaml => {
            let yaml = parse_yaml(content, path)?;
            serde_json::to_value(yaml).map_err(|source| LoaderError::JsonParse {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Read a record file into a [`Value`]
///
/// YAML records go through [`Value::from_yaml`] so that tags, non-finite
/// numbers and complex keys are rejected rather than coerced.
pub fn parse_record_file(path: &Path) -> LoaderResult<Value> {
    let format = DocumentFormat::from_path(path)?;
    let content = read(path)?;
    parse_record(&content, format, path)
}

/// Parse record text with an explicit format
pub fn parse_record(content: &str, format: DocumentFormat, path: &Path) -> LoaderResult<Value> {
    let converted = match format {
        DocumentFormat::Json => {
            let json = parse_content(content, format, path)?;
            Value::from_json(&json)
        }
        DocumentFormat::Yaml => Value::from_yaml(&parse_yaml(content, path)?),
    };
    converted.map_err(|source| LoaderError::Record {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> LoaderResult<String> {
    std::fs::read_to_string(path).map_err(|e| LoaderError::io(path, e))
}

fn parse_yaml(content: &str, path: &Path) -> LoaderResult<serde_yaml::Value> {
    serde_yaml::from_str(content).map_err(|source| LoaderError::YamlParse {
        path: path.to_path_buf(),
        source,
    })
}
