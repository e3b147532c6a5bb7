//! Loading schemas and records from disk
//!
//! The validation engine never touches storage; this module is the file
//! collaborator that turns YAML or JSON files into checked [`Schema`]s
//! and [`Value`] records, keeping missing files distinct from unparsable
//! ones.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use recordspec_schemas::loader::SchemaLoader;
//! use std::path::Path;
//!
//! let mut loader = SchemaLoader::new();
//! let schema = loader.load_schema(Path::new("vendor.schema.json"))?;
//! let record = loader.load_record(Path::new("vendor.json"))?;
//! println!("{}", schema.validate(&record));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`Schema`]: crate::schema::Schema
//! [`Value`]: crate::value::Value
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod parser;
pub mod schema_loader;

pub use error::{LoaderError, LoaderResult};
pub use parser::DocumentFormat;
pub use schema_loader::SchemaLoader;
