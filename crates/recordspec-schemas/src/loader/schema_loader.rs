//! Schema loader with an in-memory cache
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use crate::loader::parser;
use crate::schema::Schema;
use crate::value::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Loads schemas and records from disk
///
/// Parsed schemas are cached by canonical path and handed out as
/// [`Arc`]s, so repeated loads of the same file share one checked schema.
#[derive(Debug, Default)]
pub struct SchemaLoader {
    cache: HashMap<PathBuf, Arc<Schema>>,
}

impl SchemaLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and check a schema file, from cache when possible
    pub fn load_schema(&mut self, path: &Path) -> LoaderResult<Arc<Schema>> {
        let key = cache_key(path)?;
        if let Some(schema) = self.cache.get(&key) {
            debug!(path = %path.display(), "schema served from cache");
            return Ok(Arc::clone(schema));
        }

        let schema = Arc::new(read_schema(path)?);
        self.cache.insert(key, Arc::clone(&schema));
        Ok(schema)
    }

    /// Load a schema, bypassing and refreshing the cache
    pub fn reload_schema(&mut self, path: &Path) -> LoaderResult<Arc<Schema>> {
        let key = cache_key(path)?;
        self.cache.remove(&key);
        self.load_schema(path)
    }

    /// Load a record file; records are never cached
    pub fn load_record(&self, path: &Path) -> LoaderResult<Value> {
        parser::parse_record_file(path)
    }

    pub fn is_cached(&self, path: &Path) -> bool {
        cache_key(path).is_ok_and(|key| self.cache.contains_key(&key))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Number of cached schemas
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }
}

fn cache_key(path: &Path) -> LoaderResult<PathBuf> {
    path.canonicalize().map_err(|e| LoaderError::io(path, e))
}

fn read_schema(path: &Path) -> LoaderResult<Schema> {
    let document = parser::parse_file(path)?;
    let schema = Schema::from_json(&document).map_err(|source| LoaderError::Schema {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), title = schema.title().unwrap_or("untitled"), "schema loaded");
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SCHEMA: &str = r#"{
        "title": "Minimal vendor",
        "type": "object",
        "properties": {"legalName": {"type": "string", "maxLength": 120}},
        "required": ["legalName"]
    }"#;

    #[test]
    fn test_caching_behavior() -> LoaderResult<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("vendor.schema.json");
        fs::write(&file_path, SCHEMA).unwrap();

        let mut loader = SchemaLoader::new();
        assert!(!loader.is_cached(&file_path));
        let first = loader.load_schema(&file_path)?;
        assert!(loader.is_cached(&file_path));

        let second = loader.load_schema(&file_path)?;
        assert!(Arc::ptr_eq(&first, &second));

        let reloaded = loader.reload_schema(&file_path)?;
        assert!(!Arc::ptr_eq(&first, &reloaded));
        assert_eq!(*first, *reloaded);

        loader.clear_cache();
        assert_eq!(loader.cached_count(), 0);
        Ok(())
    }

    #[test]
    fn test_yaml_schema_and_record() -> LoaderResult<()> {
        let dir = tempdir().unwrap();
        let schema_path = dir.path().join("vendor.schema.yaml");
        let record_path = dir.path().join("vendor.yaml");
        fs::write(
            &schema_path,
            "type: object\nproperties:\n  legalName:\n    type: string\nrequired: [legalName]\n",
        )
        .unwrap();
        fs::write(&record_path, "operatingName: Acme\n").unwrap();

        let mut loader = SchemaLoader::new();
        let schema = loader.load_schema(&schema_path)?;
        let record = loader.load_record(&record_path)?;
        assert!(!schema.validate(&record).is_valid());
        Ok(())
    }

    #[test]
    fn test_invalid_schema_is_reported_with_path() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("broken.schema.json");
        fs::write(
            &file_path,
            r#"{"type": "object", "properties": {}, "required": ["legalName"]}"#,
        )
        .unwrap();

        let err = SchemaLoader::new().load_schema(&file_path).unwrap_err();
        assert!(matches!(err, LoaderError::Schema { .. }));
        assert_eq!(err.path(), file_path.as_path());
    }

    #[test]
    fn test_missing_schema_is_not_found() {
        let dir = tempdir().unwrap();
        let err = SchemaLoader::new()
            .load_schema(&dir.path().join("absent.schema.json"))
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
