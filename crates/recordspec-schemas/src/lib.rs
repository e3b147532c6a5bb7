//! Recordspec Schemas - conditional validation of business records
//!
//! This crate validates structured business records (vendor and customer
//! records) against declarative schemas whose constraints depend on the
//! record itself: which identification numbers are required depends on
//! the organization type, which postal-code pattern applies depends on
//! the country.
//!
//! ## Features
//!
//! - **Value Model**: tree-shaped record values built from JSON or YAML
//! - **Schema Model**: typed constraint trees checked once at construction
//! - **Conditional Rules**: `if`/`then` fragments merged per record
//! - **Deterministic Reports**: every violation, in a stable pre-order
//! - **Reference Catalog**: bundled vendor and customer schemas with samples
//!
//! ## Quick Start
//!
//! ```rust
//! use recordspec_schemas::{RecordType, Value};
//! use serde_json::json;
//!
//! let schema = RecordType::Vendor.schema().unwrap();
//! let record = Value::from_json(&json!({
//!     "legalName": "ABC Company Inc.",
//!     "countryCode": "CA",
//!     "organizationType": "Corporation/Partnership",
//!     "vendorIdentificationNumbers": {"supplierNumber": "SUPP-12345"}
//! }))
//! .unwrap();
//!
//! let report = schema.validate(&record);
//! assert!(!report.is_valid());
//! assert_eq!(
//!     report.violations()[0].path.to_string(),
//!     "vendorIdentificationNumbers.businessNumber"
//! );
//! ```
//!
//! ## Conditional Rules
//!
//! Rule predicates read fields from the record root wherever the rule is
//! attached. Rules apply in declaration order; when two rules override the
//! same pattern or enum, the later one wins.
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

pub mod catalog;
pub mod loader;
pub mod path;
pub mod schema;
pub mod validation;
pub mod value;

// Re-export commonly used types for convenience
pub use catalog::{CatalogError, RecordType, Sample};
pub use loader::{LoaderError, LoaderResult, SchemaLoader};
pub use path::{FieldPath, PathSegment};
pub use schema::{
    AnyOfRequired, Condition, ConditionalRule, Format, Matcher, PartialNode, Pattern, Predicate, Schema,
    SchemaDefinitionError, SchemaKind, SchemaNode,
};
pub use validation::{
    effective_schema, validate, validate_batch, validate_with_config, Report, ValidationConfig, Violation,
    ViolationKind,
};
pub use value::{Number, Value, ValueError, ValueKind};
