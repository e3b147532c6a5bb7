//! Record validation
//!
//! [`validate`] walks a record depth-first against a [`Schema`]. At every
//! object node that carries conditional rules the effective schema is
//! recomputed against the full record, then the node's constraints are
//! checked and the walk descends into declared properties and array
//! elements. Violations come out in pre-order: a parent before its
//! children, properties in schema declaration order, array elements by
//! index.
//!
//! Validation is a pure function of its inputs. Schemas are never
//! mutated, so one schema can serve any number of threads at once.
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

pub mod conditional;
pub mod constraints;
pub mod error;
pub mod format;
pub mod report;

pub use conditional::effective_schema;
pub use constraints::check_node;
pub use error::{Violation, ViolationKind};
pub use report::Report;

use crate::path::FieldPath;
use crate::schema::{ConditionalRule, Schema, SchemaNode};
use crate::value::Value;
use tracing::debug;

/// Default nesting limit for [`ValidationConfig`]
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Tunables for a validation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Deepest nesting level walked; deeper positions yield `StructureTooDeep`
    pub max_depth: usize,
    /// Stop a batch at the first invalid record
    pub fail_fast: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            fail_fast: false,
        }
    }
}

impl ValidationConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enable fail-fast mode
    pub fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }
}

/// Validate `record` against `schema`
///
/// `rules` are extra root-level rules, applied before the rules the
/// schema root declares itself.
///
/// ```rust
/// use recordspec_schemas::schema::{Schema, SchemaNode};
/// use recordspec_schemas::validation::{validate, ViolationKind};
/// use recordspec_schemas::Value;
///
/// let schema = Schema::new(
///     SchemaNode::object()
///         .property("legalName", SchemaNode::string().with_max_length(120))
///         .require("legalName"),
/// )
/// .unwrap();
///
/// let record = Value::from_json(&serde_json::json!({"operatingName": "Acme"})).unwrap();
/// let report = validate(&schema, &[], &record);
/// assert!(!report.is_valid());
/// assert_eq!(report.violations()[0].kind, ViolationKind::MissingRequiredField);
/// assert_eq!(report.violations()[0].path.to_string(), "legalName");
/// ```
pub fn validate(schema: &Schema, rules: &[ConditionalRule], record: &Value) -> Report {
    validate_with_config(schema, rules, record, &ValidationConfig::default())
}

/// Validate with an explicit configuration
pub fn validate_with_config(
    schema: &Schema,
    rules: &[ConditionalRule],
    record: &Value,
    config: &ValidationConfig,
) -> Report {
    let mut walker = Walker {
        record_root: record,
        max_depth: config.max_depth,
        violations: Vec::new(),
    };
    let root = conditional::effective_schema_at(
        schema.root(),
        rules.iter().chain(schema.root().rules()),
        record,
        &FieldPath::root(),
    );
    walker.visit_effective(&root, record, &FieldPath::root(), 0);

    debug!(
        schema = schema.title().unwrap_or("untitled"),
        violations = walker.violations.len(),
        "record validated"
    );
    Report::from_violations(walker.violations)
}

/// Validate many records against one schema
///
/// With `fail_fast` the batch stops after the first invalid record, so
/// fewer reports than records may come back.
pub fn validate_batch(
    schema: &Schema,
    rules: &[ConditionalRule],
    records: &[Value],
    config: &ValidationConfig,
) -> Vec<Report> {
    let mut reports = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let report = validate_with_config(schema, rules, record, config);
        let stop = config.fail_fast && !report.is_valid();
        reports.push(report);
        if stop {
            debug!(index, "batch stopped at first invalid record");
            break;
        }
    }
    reports
}

struct Walker<'r> {
    record_root: &'r Value,
    max_depth: usize,
    violations: Vec<Violation>,
}

impl Walker<'_> {
    fn visit(&mut self, node: &SchemaNode, value: &Value, path: &FieldPath, depth: usize) {
        if node.rules().is_empty() {
            self.visit_effective(node, value, path, depth);
        } else {
            let effective = conditional::effective_schema_at(node, node.rules(), self.record_root, path);
            self.visit_effective(&effective, value, path, depth);
        }
    }

    fn visit_effective(&mut self, node: &SchemaNode, value: &Value, path: &FieldPath, depth: usize) {
        if depth > self.max_depth {
            debug!(path = %path, max_depth = self.max_depth, "depth limit reached");
            self.violations
                .push(Violation::structure_too_deep(path.clone(), self.max_depth));
            return;
        }

        self.violations.extend(constraints::check_node(node, value, path));
        if !node.kind().accepts(value.kind()) {
            return;
        }

        match value {
            Value::Object(map) => {
                for (name, child) in node.properties() {
                    if let Some(child_value) = map.get(name) {
                        self.visit(child, child_value, &path.child(name), depth + 1);
                    }
                }
            }
            Value::Array(elements) => {
                if let Some(items) = node.items() {
                    for (index, element) in elements.iter().enumerate() {
                        self.visit(items, element, &path.index(index), depth + 1);
                    }
                }
            }
            _ => {}
        }
    }
}
