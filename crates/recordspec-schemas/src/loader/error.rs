//! Error types for schema and record loading
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use crate::schema::SchemaDefinitionError;
use crate::value::ValueError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Failures reading schema and record documents from disk
#[derive(Error, Debug)]
pub enum LoaderError {
    /// The file does not exist
    #[error("File not found: '{path}'")]
    NotFound { path: PathBuf },

    /// Any other I/O failure
    #[error("Failed to read file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse YAML file '{path}': {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to parse JSON file '{path}': {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },

    /// The document parsed but is not a usable schema
    #[error("Invalid schema in '{path}': {source}")]
    Schema {
        path: PathBuf,
        source: SchemaDefinitionError,
    },

    /// The document parsed but is not a representable record
    #[error("Invalid record in '{path}': {source}")]
    Record { path: PathBuf, source: ValueError },
}

impl LoaderError {
    /// Classify an I/O error, splitting out missing files
    pub fn io(path: &Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source: error,
            }
        }
    }

    /// The file the error concerns
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::Io { path, .. }
            | Self::YamlParse { path, .. }
            | Self::JsonParse { path, .. }
            | Self::UnsupportedFormat { path }
            | Self::Schema { path, .. }
            | Self::Record { path, .. } => path,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the file was found but its content could not be used
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::YamlParse { .. } | Self::JsonParse { .. } | Self::Schema { .. } | Self::Record { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_splits_not_found() {
        let path = Path::new("vendor.json");

        let missing = LoaderError::io(path, std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(missing.is_not_found());
        assert_eq!(missing.path(), path);

        let denied = LoaderError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(denied, LoaderError::Io { .. }));
        assert!(!denied.is_parse_error());
    }

    #[test]
    fn test_parse_errors_classified() {
        let err = LoaderError::YamlParse {
            path: PathBuf::from("record.yaml"),
            source: serde_yaml::from_str::<serde_yaml::Value>("{").unwrap_err(),
        };
        assert!(err.is_parse_error());
        assert!(err.to_string().contains("record.yaml"));
    }
}
