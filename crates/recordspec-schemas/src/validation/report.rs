//! Validation report
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use crate::validation::error::{Violation, ViolationKind};
use serde::Serialize;
use std::fmt;

/// Complete outcome of one validation call
///
/// `valid` is always `violations.is_empty()`; the only way to build a
/// report is [`Report::from_violations`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    valid: bool,
    violations: Vec<Violation>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            return write!(f, "record is valid");
        }
        write!(f, "record has {} violation(s):", self.violations.len())?;
        for (i, violation) in self.violations.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for Report {}

impl Report {
    /// Build a report; order of `violations` is kept as given
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            valid: violations.is_empty(),
            violations,
        }
    }

    /// Report with no violations
    pub fn valid() -> Self {
        Self::from_violations(Vec::new())
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Violations in pre-order
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations of one kind
    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    /// One line per violation: `path<TAB>kind<TAB>expected<TAB>actual`
    ///
    /// Stable across runs for identical input.
    pub fn render(&self) -> String {
        self.violations
            .iter()
            .map(|v| format!("{}\t{}\t{}\t{}", v.path, v.kind, v.expected, v.actual))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// Ok if valid, the report itself otherwise
    pub fn into_result(self) -> Result<(), Self> {
        if self.valid {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<Vec<Violation>> for Report {
    fn from(violations: Vec<Violation>) -> Self {
        Self::from_violations(violations)
    }
}
