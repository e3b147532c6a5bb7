//! Error types and handling for the CLI
//!
//! A record that fails validation is an error here, so that the process
//! exits with its own code; inside the library it is just a report.
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use recordspec_schemas::{CatalogError, LoaderError};
use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error loading a schema or record file
    #[error(transparent)]
    Loader(#[from] LoaderError),

    /// Error reading a bundled document
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logging could not be set up
    #[error("Logging error: {0}")]
    Logging(String),

    /// Schema name that is neither bundled nor found on disk
    #[error("Schema '{}' not found. Use 'vendor', 'customer' or a path to a schema file", name)]
    SchemaNotFound { name: String },

    /// No schema given and none configured
    #[error("No schema selected. Pass --schema or set default_schema in the configuration")]
    NoSchema,

    /// The record has violations
    #[error("Record is invalid: {} violation(s)", violations)]
    ValidationFailed { violations: usize },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::ValidationFailed { .. } => 2,
            Self::FileNotFound { .. } => 3,
            Self::Loader(err) if err.is_not_found() => 3,
            Self::Loader(LoaderError::Schema { .. }) => 8,
            Self::Loader(LoaderError::UnsupportedFormat { .. }) => 4,
            Self::Loader(err) if err.is_parse_error() => 4,
            Self::Loader(_) => 1,
            Self::Config(_) => 5,
            Self::Logging(_) => 1,
            Self::NoSchema => 6,
            Self::SchemaNotFound { .. } => 7,
            Self::Catalog(_) => 8,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::NoSchema)
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}
