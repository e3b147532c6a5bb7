//! Constraint evaluator
//!
//! Checks the constraints a single schema node places on a single value.
//! Descending into children is the walker's job; this module never
//! recurses.
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use crate::path::FieldPath;
use crate::schema::{AnyOfRequired, SchemaNode};
use crate::validation::error::Violation;
use crate::validation::format;
use crate::value::Value;

/// Check `value` against the constraints of `node`
///
/// A type mismatch is the only violation reported for a node of the wrong
/// kind. Otherwise every failing constraint is reported, in the order
/// required, any-of, enum, pattern, length, format.
pub fn check_node(node: &SchemaNode, value: &Value, path: &FieldPath) -> Vec<Violation> {
    if !node.kind().accepts(value.kind()) {
        return vec![Violation::type_mismatch(path.clone(), node.kind(), value.kind())];
    }

    let mut violations = Vec::new();

    if let Value::Object(map) = value {
        for field in node.required() {
            if !map.contains_key(field) {
                violations.push(Violation::missing_required(path.child(field.as_str()), field));
            }
        }
        for any_of in node.any_of_required() {
            if !covered_by_required(node, any_of) && !any_of.is_satisfied_by(value) {
                violations.push(Violation::any_of_required(path.clone(), any_of));
            }
        }
    }

    if let Some(allowed) = node.enum_values() {
        if !allowed.contains(value) {
            violations.push(Violation::enum_violation(path.clone(), allowed, value));
        }
    }

    if let Value::String(text) = value {
        if let Some(pattern) = node.pattern() {
            if !pattern.is_match(text) {
                violations.push(Violation::pattern_violation(path.clone(), pattern, text));
            }
        }
        if let Some(max_length) = node.max_length() {
            let length = text.chars().count();
            if length > max_length {
                violations.push(Violation::length_violation(path.clone(), max_length, length));
            }
        }
        if let Some(format) = node.format() {
            if !format::is_valid(format, text) {
                violations.push(Violation::format_violation(path.clone(), format, text));
            }
        }
    }

    violations
}

/// An any-of is moot when one of its single-field alternatives is already
/// required outright; the missing-field check reports that case.
fn covered_by_required(node: &SchemaNode, any_of: &AnyOfRequired) -> bool {
    any_of
        .alternatives()
        .iter()
        .filter_map(FieldPath::as_single_key)
        .any(|key| node.required().iter().any(|r| r == key))
}
