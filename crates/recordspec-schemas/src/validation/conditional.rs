//! Conditional rule engine
//!
//! Computes the effective schema of a node: the base node with the
//! consequence of every rule whose predicate holds merged in, in
//! declaration order. The base node is only cloned once a rule fires.
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use crate::path::FieldPath;
use crate::schema::{ConditionalRule, PartialNode, SchemaNode};
use crate::value::Value;
use std::borrow::Cow;
use tracing::{debug, trace};

/// Merge every rule that holds against `record_root` into `base`
///
/// Required fields are unioned and any-of requirements appended. Enum and
/// pattern overrides replace the value at the same sub-path, so a later
/// rule wins over an earlier one.
///
/// ```rust
/// use recordspec_schemas::schema::{ConditionalRule, PartialNode, Predicate, SchemaNode};
/// use recordspec_schemas::validation::effective_schema;
/// use recordspec_schemas::Value;
///
/// let base = SchemaNode::object()
///     .property("countryCode", SchemaNode::string())
///     .property("province", SchemaNode::string());
/// let rules = [ConditionalRule::new(
///     Predicate::new().field("countryCode", ["CA"]),
///     PartialNode::new().require("province"),
/// )];
///
/// let record = Value::from_json(&serde_json::json!({"countryCode": "CA"})).unwrap();
/// assert_eq!(effective_schema(&base, &rules, &record).required(), ["province"]);
///
/// let record = Value::from_json(&serde_json::json!({"countryCode": "US"})).unwrap();
/// assert!(effective_schema(&base, &rules, &record).required().is_empty());
/// ```
pub fn effective_schema<'a, 'r, I>(base: &'a SchemaNode, rules: I, record_root: &Value) -> Cow<'a, SchemaNode>
where
    I: IntoIterator<Item = &'r ConditionalRule>,
{
    effective_schema_at(base, rules, record_root, &FieldPath::root())
}

pub(crate) fn effective_schema_at<'a, 'r, I>(
    base: &'a SchemaNode,
    rules: I,
    record_root: &Value,
    path: &FieldPath,
) -> Cow<'a, SchemaNode>
where
    I: IntoIterator<Item = &'r ConditionalRule>,
{
    let mut effective = Cow::Borrowed(base);
    for (index, rule) in rules.into_iter().enumerate() {
        if !rule.predicate().holds(record_root) {
            continue;
        }
        trace!(rule = index, path = %path, "conditional rule applies");
        merge(effective.to_mut(), rule.consequence(), path);
    }
    effective
}

fn merge(node: &mut SchemaNode, partial: &PartialNode, path: &FieldPath) {
    for field in partial.required() {
        if !node.required.contains(field) {
            node.required.push(field.clone());
        }
    }
    node.any_of_required.extend(partial.any_of_required().iter().cloned());
    if let Some(values) = partial.enum_values() {
        node.enum_values = Some(values.to_vec());
    }
    if let Some(pattern) = partial.pattern() {
        node.pattern = Some(pattern.clone());
    }
    for (name, child_partial) in partial.properties() {
        let child_path = path.child(name);
        match node.property_node_mut(name) {
            Some(child) => merge(child, child_partial, &child_path),
            None => debug!(path = %child_path, "rule targets an undeclared property; ignored"),
        }
    }
}
