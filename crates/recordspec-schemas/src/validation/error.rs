//! Violation types produced by record validation
//!
//! Violations are data, never control flow: a malformed record always
//! yields a [`Report`](crate::validation::Report) listing them.
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use crate::path::FieldPath;
use crate::schema::{AnyOfRequired, Format, Pattern, SchemaKind};
use crate::value::{Value, ValueKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which constraint a record failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    TypeMismatch,
    MissingRequiredField,
    AnyOfRequiredViolation,
    EnumViolation,
    PatternViolation,
    LengthViolation,
    FormatViolation,
    StructureTooDeep,
}

impl ViolationKind {
    /// Stable identifier, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TypeMismatch => "TypeMismatch",
            Self::MissingRequiredField => "MissingRequiredField",
            Self::AnyOfRequiredViolation => "AnyOfRequiredViolation",
            Self::EnumViolation => "EnumViolation",
            Self::PatternViolation => "PatternViolation",
            Self::LengthViolation => "LengthViolation",
            Self::FormatViolation => "FormatViolation",
            Self::StructureTooDeep => "StructureTooDeep",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One concrete failure of a record against a constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Where in the record the failure is
    pub path: FieldPath,
    /// The constraint that failed
    pub kind: ViolationKind,
    /// Human-readable explanation
    pub message: String,
    /// What was expected
    pub expected: String,
    /// What was actually found
    pub actual: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}] (expected {}, found {})",
            self.path, self.message, self.kind, self.expected, self.actual
        )
    }
}

fn join_literals(values: &[Value]) -> String {
    values.iter().map(Value::to_string).collect::<Vec<_>>().join(", ")
}

impl Violation {
    /// Create a violation
    pub fn new<M, E, A>(path: FieldPath, kind: ViolationKind, message: M, expected: E, actual: A) -> Self
    where
        M: Into<String>,
        E: Into<String>,
        A: Into<String>,
    {
        Self {
            path,
            kind,
            message: message.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn type_mismatch(path: FieldPath, expected: SchemaKind, actual: ValueKind) -> Self {
        Self::new(
            path,
            ViolationKind::TypeMismatch,
            format!("expected a value of type {}", expected),
            expected.name(),
            actual.name(),
        )
    }

    /// `path` is the path of the missing field itself
    pub fn missing_required(path: FieldPath, field: &str) -> Self {
        Self::new(
            path,
            ViolationKind::MissingRequiredField,
            format!("required field '{}' is missing", field),
            format!("field '{}' to be present", field),
            "field is missing",
        )
    }

    pub fn any_of_required(path: FieldPath, any_of: &AnyOfRequired) -> Self {
        let alternatives = any_of
            .alternatives()
            .iter()
            .map(FieldPath::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self::new(
            path,
            ViolationKind::AnyOfRequiredViolation,
            format!("at least one of [{}] must be present", alternatives),
            format!("one of: {}", alternatives),
            "none present",
        )
    }

    pub fn enum_violation(path: FieldPath, allowed: &[Value], actual: &Value) -> Self {
        Self::new(
            path,
            ViolationKind::EnumViolation,
            format!("value {} is not one of the allowed values", actual),
            format!("one of: {}", join_literals(allowed)),
            actual.describe(),
        )
    }

    pub fn pattern_violation(path: FieldPath, pattern: &Pattern, actual: &str) -> Self {
        Self::new(
            path,
            ViolationKind::PatternViolation,
            format!("value \"{}\" does not match pattern {}", actual, pattern.as_str()),
            format!("match for {}", pattern.as_str()),
            format!("\"{}\"", actual),
        )
    }

    pub fn length_violation(path: FieldPath, max_length: usize, length: usize) -> Self {
        Self::new(
            path,
            ViolationKind::LengthViolation,
            format!("value is {} characters long, limit is {}", length, max_length),
            format!("at most {} characters", max_length),
            format!("{} characters", length),
        )
    }

    pub fn format_violation(path: FieldPath, format: Format, actual: &str) -> Self {
        Self::new(
            path,
            ViolationKind::FormatViolation,
            format!("value \"{}\" is not a valid {}", actual, format),
            format!("{} format", format),
            format!("\"{}\"", actual),
        )
    }

    pub fn structure_too_deep(path: FieldPath, max_depth: usize) -> Self {
        Self::new(
            path,
            ViolationKind::StructureTooDeep,
            format!("nesting exceeds the limit of {} levels", max_depth),
            format!("at most {} levels of nesting", max_depth),
            "deeper structure",
        )
    }
}
