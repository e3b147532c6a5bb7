//! Record value model
//!
//! [`Value`] is the tree the engine validates. It is built from an already
//! parsed document (JSON or YAML) and is read-only during validation.
//! Only tree-shaped, finite data is representable: YAML `.nan`/`.inf`,
//! tagged YAML nodes and non-scalar mapping keys are rejected at
//! construction with a [`ValueError`].
//!
//! Equality is exact: strings compare byte-for-byte, numbers by numeric
//! value (`1` equals `1.0`), booleans and null by kind. Integers keep
//! their full 64-bit value and never round through `f64`.
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use crate::path::{FieldPath, PathSegment};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// A parsed record value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Explicit null
    Null,
    /// Boolean
    Bool(bool),
    /// Finite number
    Number(Number),
    /// UTF-8 string
    String(String),
    /// Mapping from field name to value
    Object(BTreeMap<String, Value>),
    /// Ordered sequence
    Array(Vec<Value>),
}

/// A finite number, integral or not
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// Any value of an `i64` or `u64`
    Integer(i128),
    /// Finite floating point
    Float(f64),
}

impl Number {
    /// The nearest `f64`
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Integer(n) => n as f64,
            Self::Float(f) => f,
        }
    }

    fn to_json(self) -> serde_json::Value {
        match self {
            Self::Integer(n) => i64::try_from(n)
                .map(serde_json::Value::from)
                .or_else(|_| u64::try_from(n).map(serde_json::Value::from))
                .unwrap_or_else(|_| float_to_json(n as f64)),
            Self::Float(f) => float_to_json(f),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Integer(i), Self::Float(f)) | (Self::Float(f), Self::Integer(i)) => {
                f.fract() == 0.0 && f.abs() < 1.0e38 && f as i128 == i
            }
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Self::Integer(n.into())
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Self::Integer(n.into())
    }
}

/// Runtime kind of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `null`
    Null,
    /// `true` / `false`
    Boolean,
    /// Any number
    Number,
    /// String
    String,
    /// Mapping
    Object,
    /// Sequence
    Array,
}

impl ValueKind {
    /// Lowercase name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A document could not be represented as a [`Value`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueError {
    /// NaN or infinity
    #[error("non-finite number at '{path}'")]
    NonFiniteNumber { path: FieldPath },

    /// A number with neither an integer nor an f64 representation
    #[error("unrepresentable number '{number}' at '{path}'")]
    UnrepresentableNumber { path: FieldPath, number: String },

    /// A mapping key that is not a string, number or boolean
    #[error("non-scalar mapping key at '{path}'")]
    NonScalarKey { path: FieldPath },

    /// A YAML node carrying an explicit tag
    #[error("tagged value '{tag}' at '{path}' is not supported")]
    Tagged { path: FieldPath, tag: String },
}

impl Value {
    /// Runtime kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Boolean,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Object(_) => ValueKind::Object,
            Self::Array(_) => ValueKind::Array,
        }
    }

    /// Look up a field of an object
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Resolve a path relative to this value; missing steps yield `None`
    pub fn get_path(&self, path: &FieldPath) -> Option<&Value> {
        path.segments()
            .iter()
            .try_fold(self, |current, segment| match (segment, current) {
                (PathSegment::Key(key), Self::Object(map)) => map.get(key),
                (PathSegment::Index(index), Self::Array(items)) => items.get(*index),
                _ => None,
            })
    }

    /// The string content, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The mapping, if this is an object
    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Whether this value is a scalar literal usable in `enum` and predicates
    pub fn is_literal(&self) -> bool {
        !matches!(self, Self::Object(_) | Self::Array(_))
    }

    /// Convert from a parsed JSON document
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ValueError> {
        from_json_at(value, &FieldPath::root())
    }

    /// Convert from a parsed YAML document
    pub fn from_yaml(value: &serde_yaml::Value) -> Result<Self, ValueError> {
        from_yaml_at(value, &FieldPath::root())
    }

    /// Convert back into a JSON document
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Number(n) => n.to_json(),
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Object(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Self::Array(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
        }
    }

    /// Short rendering for the `actual` side of a violation
    pub fn describe(&self) -> String {
        match self {
            Self::Object(map) => format!("object with {} field(s)", map.len()),
            Self::Array(items) => format!("array of {} element(s)", items.len()),
            other => other.to_string(),
        }
    }
}

/// Integral values render without a fractional part
fn float_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(_) | Self::Object(_) | Self::Array(_) => write!(f, "{}", self.to_json()),
            Self::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

impl TryFrom<&serde_json::Value> for Value {
    type Error = ValueError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

impl TryFrom<&serde_yaml::Value> for Value {
    type Error = ValueError;

    fn try_from(value: &serde_yaml::Value) -> Result<Self, Self::Error> {
        Self::from_yaml(value)
    }
}

fn from_json_at(value: &serde_json::Value, path: &FieldPath) -> Result<Value, ValueError> {
    Ok(match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => number(n.as_i64(), n.as_u64(), n.as_f64(), &n.to_string(), path)?,
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| from_json_at(item, &path.index(i)))
                .collect::<Result<_, _>>()?,
        ),
        serde_json::Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), from_json_at(v, &path.child(k.as_str()))?)))
                .collect::<Result<_, ValueError>>()?,
        ),
    })
}

fn from_yaml_at(value: &serde_yaml::Value, path: &FieldPath) -> Result<Value, ValueError> {
    Ok(match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(*b),
        serde_yaml::Value::Number(n) => number(n.as_i64(), n.as_u64(), n.as_f64(), &n.to_string(), path)?,
        serde_yaml::Value::String(s) => Value::String(s.clone()),
        serde_yaml::Value::Sequence(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| from_yaml_at(item, &path.index(i)))
                .collect::<Result<_, _>>()?,
        ),
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = BTreeMap::new();
            for (key, item) in mapping {
                let key = yaml_key(key, path)?;
                let child = from_yaml_at(item, &path.child(key.as_str()))?;
                map.insert(key, child);
            }
            Value::Object(map)
        }
        serde_yaml::Value::Tagged(tagged) => {
            return Err(ValueError::Tagged {
                path: path.clone(),
                tag: tagged.tag.to_string(),
            })
        }
    })
}

fn yaml_key(key: &serde_yaml::Value, path: &FieldPath) -> Result<String, ValueError> {
    match key {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ValueError::NonScalarKey { path: path.clone() }),
    }
}

/// Integers are kept exactly; anything else must be a finite float
fn number(
    as_i64: Option<i64>,
    as_u64: Option<u64>,
    as_f64: Option<f64>,
    text: &str,
    path: &FieldPath,
) -> Result<Value, ValueError> {
    if let Some(n) = as_i64 {
        return Ok(Value::from(n));
    }
    if let Some(n) = as_u64 {
        return Ok(Value::from(n));
    }
    match as_f64 {
        Some(f) if f.is_finite() => Ok(Value::Number(Number::Float(f))),
        Some(_) => Err(ValueError::NonFiniteNumber { path: path.clone() }),
        None => Err(ValueError::UnrepresentableNumber {
            path: path.clone(),
            number: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_compare_by_value() {
        let int = Value::from_json(&json!(1)).unwrap();
        let float = Value::from_json(&json!(1.0)).unwrap();
        assert_eq!(int, float);
        assert_ne!(Value::from("1"), int);
    }

    #[test]
    fn test_large_integers_stay_exact() {
        let above = Value::from_json(&json!(9007199254740993_i64)).unwrap();
        let below = Value::from_json(&json!(9007199254740992_i64)).unwrap();
        assert_ne!(above, below);
        assert_eq!(above, Value::from(9007199254740993_i64));
        assert_eq!(above.to_json(), json!(9007199254740993_i64));

        let max = Value::from_json(&json!(u64::MAX)).unwrap();
        assert_eq!(max.to_json(), json!(u64::MAX));
        assert_ne!(max, Value::from_json(&json!(u64::MAX - 1)).unwrap());

        let float = Value::from_json(&json!(9007199254740992.0)).unwrap();
        assert_eq!(float, below);
        assert_ne!(float, above);
    }

    #[test]
    fn test_get_path() {
        let record = Value::from_json(&json!({
            "contactInformation": {"address": {"postalCode": "K1A 0A9"}},
            "commodityCodes": ["43211500", "43232400"]
        }))
        .unwrap();

        let postal = FieldPath::from_keys(["contactInformation", "address", "postalCode"]);
        assert_eq!(record.get_path(&postal), Some(&Value::from("K1A 0A9")));

        let code = FieldPath::root().child("commodityCodes").index(1);
        assert_eq!(record.get_path(&code), Some(&Value::from("43232400")));

        let missing = FieldPath::from_keys(["contactInformation", "telephone"]);
        assert_eq!(record.get_path(&missing), None);

        let through_scalar = postal.child("deeper");
        assert_eq!(record.get_path(&through_scalar), None);
    }

    #[test]
    fn test_yaml_rejects_non_finite() {
        let doc: serde_yaml::Value = serde_yaml::from_str("amount: .nan").unwrap();
        let err = Value::from_yaml(&doc).unwrap_err();
        assert!(matches!(err, ValueError::NonFiniteNumber { .. }));
        assert_eq!(err.to_string(), "non-finite number at 'amount'");
    }

    #[test]
    fn test_yaml_rejects_complex_keys() {
        let doc: serde_yaml::Value = serde_yaml::from_str("? [a, b]\n: 1\n").unwrap();
        assert!(matches!(
            Value::from_yaml(&doc),
            Err(ValueError::NonScalarKey { .. })
        ));
    }

    #[test]
    fn test_yaml_rejects_tags() {
        let doc: serde_yaml::Value = serde_yaml::from_str("size: !custom Large").unwrap();
        assert!(matches!(Value::from_yaml(&doc), Err(ValueError::Tagged { .. })));
    }

    #[test]
    fn test_yaml_and_json_agree() {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str("legalName: ABC\ncount: 3\ncodes: [a, b]\n").unwrap();
        let json = json!({"legalName": "ABC", "count": 3, "codes": ["a", "b"]});
        assert_eq!(Value::from_yaml(&yaml).unwrap(), Value::from_json(&json).unwrap());
    }

    #[test]
    fn test_describe() {
        assert_eq!(Value::from("12345").describe(), "\"12345\"");
        assert_eq!(Value::from(9_i64).describe(), "9");
        assert_eq!(Value::Number(Number::Float(9.0)).describe(), "9");
        assert_eq!(Value::Number(Number::Float(2.5)).describe(), "2.5");
        assert_eq!(Value::Array(vec![Value::Null]).describe(), "array of 1 element(s)");
    }
}
