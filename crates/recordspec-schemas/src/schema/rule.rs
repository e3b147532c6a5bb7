//! Conditional rules: "if these record fields match, then these extra
//! constraints apply to this node"
//!
//! Predicates always read the record from its root, wherever the rule is
//! attached, so a rule on `contactInformation.address` can test the
//! top-level `countryCode`.
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use crate::path::FieldPath;
use crate::schema::{AnyOfRequired, Pattern};
use crate::value::Value;

/// What a [`Condition`] asks of the value at its path
#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    /// The value equals one of these literals
    OneOf(Vec<Value>),
    /// The path resolves to any value
    Present,
}

/// One `(fieldPath, matcher)` test
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    path: FieldPath,
    matcher: Matcher,
}

impl Condition {
    /// Match when the value at `path` equals one of `allowed`
    pub fn new<I, V>(path: FieldPath, allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            path,
            matcher: Matcher::OneOf(allowed.into_iter().map(Into::into).collect()),
        }
    }

    /// Match when `path` resolves, whatever the value
    pub fn present(path: FieldPath) -> Self {
        Self {
            path,
            matcher: Matcher::Present,
        }
    }

    /// Field read by this condition, from the record root
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Literals the field may equal; `None` for a presence test
    pub fn allowed(&self) -> Option<&[Value]> {
        match &self.matcher {
            Matcher::OneOf(values) => Some(values.as_slice()),
            Matcher::Present => None,
        }
    }

    /// A missing path never matches
    pub fn matches(&self, record_root: &Value) -> bool {
        record_root
            .get_path(&self.path)
            .is_some_and(|value| match &self.matcher {
                Matcher::OneOf(allowed) => allowed.contains(value),
                Matcher::Present => true,
            })
    }
}

/// Conjunction of [`Condition`]s; the empty predicate always holds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    conditions: Vec<Condition>,
}

impl Predicate {
    /// Predicate with no conditions
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition on a dotted field path
    ///
    /// ```rust
    /// use recordspec_schemas::schema::Predicate;
    ///
    /// let predicate = Predicate::new()
    ///     .field("organizationType", ["Corporation/Partnership"])
    ///     .field("countryCode", ["CA"]);
    /// assert_eq!(predicate.conditions().len(), 2);
    /// ```
    pub fn field<I, V>(self, dotted_path: &str, allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let path = FieldPath::from_keys(dotted_path.split('.'));
        self.condition(Condition::new(path, allowed))
    }

    /// Add a presence test on a dotted field path
    pub fn present(self, dotted_path: &str) -> Self {
        self.condition(Condition::present(FieldPath::from_keys(dotted_path.split('.'))))
    }

    /// Add a prepared condition
    pub fn condition(mut self, condition: Condition) -> Self {
        self.push(condition);
        self
    }

    pub(crate) fn push(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    /// The conditions, in declaration order
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Whether every condition matches the record
    pub fn holds(&self, record_root: &Value) -> bool {
        self.conditions.iter().all(|c| c.matches(record_root))
    }
}

/// Partial schema fragment merged into a node when a rule fires
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialNode {
    pub(crate) required: Vec<String>,
    pub(crate) any_of_required: Vec<AnyOfRequired>,
    pub(crate) enum_values: Option<Vec<Value>>,
    pub(crate) pattern: Option<Pattern>,
    pub(crate) properties: Vec<(String, PartialNode)>,
}

impl PartialNode {
    /// Empty fragment
    pub fn new() -> Self {
        Self::default()
    }

    /// Additionally require a field
    pub fn require(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// Additionally require at least one of several fields
    pub fn any_of(mut self, alternatives: AnyOfRequired) -> Self {
        self.any_of_required.push(alternatives);
        self
    }

    /// Replace the allowed literal set
    pub fn with_enum<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the pattern
    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Fragment for a declared child property
    pub fn property(mut self, name: impl Into<String>, fragment: PartialNode) -> Self {
        self.properties.push((name.into(), fragment));
        self
    }

    /// Fields this fragment adds to `required`
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Any-of requirements this fragment adds
    pub fn any_of_required(&self) -> &[AnyOfRequired] {
        &self.any_of_required
    }

    /// Enum override, if any
    pub fn enum_values(&self) -> Option<&[Value]> {
        self.enum_values.as_deref()
    }

    /// Pattern override, if any
    pub fn pattern(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    /// Child fragments in declaration order
    pub fn properties(&self) -> impl Iterator<Item = (&str, &PartialNode)> {
        self.properties.iter().map(|(name, node)| (name.as_str(), node))
    }
}

/// `{predicate, consequence}`
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalRule {
    predicate: Predicate,
    consequence: PartialNode,
}

impl ConditionalRule {
    /// Create a rule
    pub fn new(predicate: Predicate, consequence: PartialNode) -> Self {
        Self {
            predicate,
            consequence,
        }
    }

    /// The `if` side
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// The `then` side
    pub fn consequence(&self) -> &PartialNode {
        &self.consequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> Value {
        Value::from_json(&json!({
            "organizationType": "Individual",
            "countryCode": "CA",
            "contactInformation": {"address": {"country": "CA"}}
        }))
        .unwrap()
    }

    #[test]
    fn test_condition_matches_literal_set() {
        let condition = Condition::new(FieldPath::from_keys(["countryCode"]), ["CA", "US"]);
        assert!(condition.matches(&record()));

        let condition = Condition::new(FieldPath::from_keys(["countryCode"]), ["US"]);
        assert!(!condition.matches(&record()));
    }

    #[test]
    fn test_missing_path_does_not_match() {
        let condition = Condition::new(FieldPath::from_keys(["size"]), ["Small"]);
        assert!(!condition.matches(&record()));
    }

    #[test]
    fn test_predicate_is_conjunction() {
        let both = Predicate::new()
            .field("organizationType", ["Individual"])
            .field("contactInformation.address.country", ["CA"]);
        assert!(both.holds(&record()));

        let one_fails = both.clone().field("countryCode", ["US"]);
        assert!(!one_fails.holds(&record()));

        assert!(Predicate::new().holds(&record()));
    }

    #[test]
    fn test_presence_condition() {
        let present = Predicate::new().present("contactInformation.address.country");
        assert!(present.holds(&record()));
        assert_eq!(present.conditions()[0].allowed(), None);

        let absent = Predicate::new().present("vendorIdentificationNumbers.sinNumber");
        assert!(!absent.holds(&record()));
        assert!(!absent.holds(&Value::from_json(&json!({})).unwrap()));
    }
}
