//! Shared utilities for command handlers
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use crate::config::Config;
use crate::error::{Error, Result};
use recordspec_schemas::{RecordType, Schema, SchemaLoader};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Extensions tried for `<name>.schema.<ext>` in the schemas directory
const SCHEMA_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Where a schema comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// One of the bundled reference schemas
    Bundled(RecordType),
    /// A schema file on disk
    File(PathBuf),
}

impl fmt::Display for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bundled(record_type) => write!(f, "bundled {} schema", record_type),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Work out which schema a name refers to
///
/// Falls back to `default_schema` from the configuration. A name is tried
/// as a file path first, then as `<schemas_dir>/<name>.schema.*`, then as
/// a bundled record type.
pub fn resolve_schema_source(name: Option<&str>, config: &Config) -> Result<SchemaSource> {
    let name = name
        .or(config.default_schema.as_deref())
        .ok_or(Error::NoSchema)?;

    let as_path = Path::new(name);
    if as_path.is_file() {
        return Ok(SchemaSource::File(as_path.to_path_buf()));
    }

    if let Some(dir) = &config.schemas_dir {
        for extension in SCHEMA_EXTENSIONS {
            let candidate = dir.join(format!("{}.schema.{}", name, extension));
            if candidate.is_file() {
                debug!(path = %candidate.display(), "Schema found in schemas directory");
                return Ok(SchemaSource::File(candidate));
            }
        }
    }

    name.parse::<RecordType>()
        .map(SchemaSource::Bundled)
        .map_err(|_| Error::SchemaNotFound { name: name.to_string() })
}

/// Load the schema a source points at
pub fn load_schema(source: &SchemaSource, loader: &mut SchemaLoader) -> Result<Arc<Schema>> {
    match source {
        SchemaSource::Bundled(record_type) => Ok(Arc::new(record_type.schema()?)),
        SchemaSource::File(path) => Ok(loader.load_schema(path)?),
    }
}

/// Write a file, creating parent directories as needed
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;
    debug!(path = %path.display(), bytes = content.len(), "File written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_bundled_names() {
        let config = Config::default();
        assert_eq!(
            resolve_schema_source(Some("vendor"), &config).unwrap(),
            SchemaSource::Bundled(RecordType::Vendor)
        );
        assert_eq!(
            resolve_schema_source(Some("Customer"), &config).unwrap(),
            SchemaSource::Bundled(RecordType::Customer)
        );
    }

    #[test]
    fn test_default_schema_from_config() {
        let config = Config {
            default_schema: Some("customer".to_string()),
            ..Config::default()
        };
        assert_eq!(
            resolve_schema_source(None, &config).unwrap(),
            SchemaSource::Bundled(RecordType::Customer)
        );
        assert!(matches!(
            resolve_schema_source(None, &Config::default()),
            Err(Error::NoSchema)
        ));
    }

    #[test]
    fn test_schemas_dir_shadows_bundled_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vendor.schema.yaml");
        std::fs::write(&path, "type: object\n").unwrap();

        let config = Config {
            schemas_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        assert_eq!(
            resolve_schema_source(Some("vendor"), &config).unwrap(),
            SchemaSource::File(path)
        );
    }

    #[test]
    fn test_unknown_schema() {
        let err = resolve_schema_source(Some("supplier"), &Config::default()).unwrap_err();
        assert!(matches!(err, Error::SchemaNotFound { .. }));
    }

    #[test]
    fn test_load_bundled_and_file_schemas() {
        let mut loader = SchemaLoader::new();
        let bundled = load_schema(&SchemaSource::Bundled(RecordType::Vendor), &mut loader).unwrap();
        assert!(bundled.title().is_some());

        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("minimal.schema.json");
        write_file(&path, r#"{"type": "object", "properties": {"legalName": {"type": "string"}}}"#).unwrap();
        let from_file = load_schema(&SchemaSource::File(path.clone()), &mut loader).unwrap();
        assert!(from_file.root().property_node("legalName").is_some());
        assert!(loader.is_cached(&path));
    }
}
