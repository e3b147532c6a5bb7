//! Schema model
//!
//! A [`Schema`] is a tree of [`SchemaNode`]s plus the conditional rules
//! attached to its object nodes. Schemas are built once, checked for
//! internal consistency by [`Schema::new`], and then shared read-only by
//! any number of validations. Patterns are compiled at construction.
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

mod check;
pub mod error;
mod parser;
pub mod rule;

pub use error::{SchemaDefinitionError, SchemaResult};
pub use rule::{Condition, ConditionalRule, Matcher, PartialNode, Predicate};

use crate::path::FieldPath;
use crate::value::{Value, ValueKind};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Expected kind of the value at a schema position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    /// No type constraint
    Any,
}

impl SchemaKind {
    /// Name as written in the `type` keyword
    pub fn name(&self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Any => "any",
        }
    }

    /// Whether a value of `kind` satisfies this schema kind
    pub fn accepts(&self, kind: ValueKind) -> bool {
        match self {
            Self::Any => true,
            Self::Object => kind == ValueKind::Object,
            Self::Array => kind == ValueKind::Array,
            Self::String => kind == ValueKind::String,
            Self::Number => kind == ValueKind::Number,
            Self::Boolean => kind == ValueKind::Boolean,
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named semantic string formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// One `@` with non-empty local and domain parts
    Email,
    /// `YYYY-MM-DD`, calendar-valid
    Date,
    /// ISO-8601 date and time, offset optional
    DateTime,
}

impl Format {
    /// Name as written in the `format` keyword
    pub fn name(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Date => "date",
            Self::DateTime => "date-time",
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "date" => Ok(Self::Date),
            "date-time" => Ok(Self::DateTime),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A compiled, fully anchored regular expression
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile `source` so that it must match the whole string
    pub fn new(source: impl Into<String>) -> Result<Self, regex::Error> {
        let source = source.into();
        let regex = Regex::new(&format!("^(?:{})$", source))?;
        Ok(Self { source, regex })
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the whole input matches
    pub fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

/// "At least one of these fields must be present"
///
/// Alternatives are paths relative to the node the requirement sits on,
/// so `vendorIdentificationNumbers.sinNumber` is a valid alternative on
/// the record root.
#[derive(Debug, Clone, PartialEq)]
pub struct AnyOfRequired {
    alternatives: Vec<FieldPath>,
}

impl AnyOfRequired {
    /// Build from prepared paths
    pub fn new(alternatives: Vec<FieldPath>) -> Self {
        Self { alternatives }
    }

    /// Build from dotted paths
    pub fn of<I, S>(dotted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            alternatives: dotted
                .into_iter()
                .map(|p| FieldPath::from_keys(p.as_ref().split('.')))
                .collect(),
        }
    }

    /// The alternatives in declaration order
    pub fn alternatives(&self) -> &[FieldPath] {
        &self.alternatives
    }

    /// Whether any alternative is present in `value`
    pub fn is_satisfied_by(&self, value: &Value) -> bool {
        self.alternatives.iter().any(|p| value.get_path(p).is_some())
    }
}

/// Constraints for one position in the record tree
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub(crate) kind: SchemaKind,
    pub(crate) required: Vec<String>,
    pub(crate) properties: Vec<(String, SchemaNode)>,
    pub(crate) items: Option<Box<SchemaNode>>,
    pub(crate) enum_values: Option<Vec<Value>>,
    pub(crate) pattern: Option<Pattern>,
    pub(crate) max_length: Option<usize>,
    pub(crate) format: Option<Format>,
    pub(crate) any_of_required: Vec<AnyOfRequired>,
    pub(crate) rules: Vec<ConditionalRule>,
}

impl SchemaNode {
    /// Node of the given kind with no constraints
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            required: Vec::new(),
            properties: Vec::new(),
            items: None,
            enum_values: None,
            pattern: None,
            max_length: None,
            format: None,
            any_of_required: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn object() -> Self {
        Self::new(SchemaKind::Object)
    }

    pub fn string() -> Self {
        Self::new(SchemaKind::String)
    }

    pub fn number() -> Self {
        Self::new(SchemaKind::Number)
    }

    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    pub fn any() -> Self {
        Self::new(SchemaKind::Any)
    }

    /// Array whose elements must match `items`
    pub fn array(items: SchemaNode) -> Self {
        let mut node = Self::new(SchemaKind::Array);
        node.items = Some(Box::new(items));
        node
    }

    /// Declare a child property; declaration order is report order
    pub fn property(mut self, name: impl Into<String>, node: SchemaNode) -> Self {
        self.properties.push((name.into(), node));
        self
    }

    /// Require a declared property
    pub fn require(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// Require at least one of several fields
    pub fn any_of(mut self, alternatives: AnyOfRequired) -> Self {
        self.any_of_required.push(alternatives);
        self
    }

    /// Restrict to a set of literals
    pub fn with_enum<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Maximum length in characters
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Attach a conditional rule to this node
    pub fn rule(mut self, rule: ConditionalRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Child properties in declaration order
    pub fn properties(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.properties.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Look up a declared child
    pub fn property_node(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.iter().find(|(n, _)| n == name).map(|(_, node)| node)
    }

    pub(crate) fn property_node_mut(&mut self, name: &str) -> Option<&mut SchemaNode> {
        self.properties
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, node)| node)
    }

    pub fn items(&self) -> Option<&SchemaNode> {
        self.items.as_deref()
    }

    pub fn enum_values(&self) -> Option<&[Value]> {
        self.enum_values.as_deref()
    }

    pub fn pattern(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    pub fn format(&self) -> Option<Format> {
        self.format
    }

    pub fn any_of_required(&self) -> &[AnyOfRequired] {
        &self.any_of_required
    }

    /// Conditional rules attached here, in declaration order
    pub fn rules(&self) -> &[ConditionalRule] {
        &self.rules
    }
}

/// A checked schema, ready to validate records
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    title: Option<String>,
    root: SchemaNode,
}

impl Schema {
    /// Check the tree for internal consistency
    ///
    /// Rejects required names missing from `properties`, rule consequences
    /// and any-of alternatives that target undeclared fields, and keywords
    /// used on node kinds they do not apply to.
    pub fn new(root: SchemaNode) -> SchemaResult<Self> {
        check::check_node(&root, "#")?;
        Ok(Self { title: None, root })
    }

    /// Parse the reference JSON form
    pub fn from_json(document: &serde_json::Value) -> SchemaResult<Self> {
        parser::parse_schema(document)
    }

    /// Render the reference JSON form
    pub fn to_json(&self) -> serde_json::Value {
        parser::render_schema(self)
    }

    /// Attach a display title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// Validate a record using only the rules embedded in this schema
    pub fn validate(&self, record: &Value) -> crate::validation::Report {
        crate::validation::validate(self, &[], record)
    }
}
