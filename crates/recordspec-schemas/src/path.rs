//! Field paths into a record
//!
//! A [`FieldPath`] addresses one position in a record tree. It is used for
//! violation locations, for the fields a conditional predicate reads, and
//! for the alternatives of an any-of requirement.
//!
//! Paths render as dotted/bracketed strings (`contactInformation.address.postalCode`,
//! `commodityCodes[1]`); the empty path renders as `$`.
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One step of a [`FieldPath`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// Mapping key
    Key(String),
    /// Sequence index
    Index(usize),
}

/// Path from the record root to a value
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

/// Error returned when a rendered path cannot be parsed back
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid field path '{input}': {reason}")]
pub struct PathParseError {
    /// The rejected input
    pub input: String,
    /// What was wrong with it
    pub reason: String,
}

impl FieldPath {
    /// The empty path, addressing the record root
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a key-only path from its segments
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: keys.into_iter().map(|k| PathSegment::Key(k.into())).collect(),
        }
    }

    /// Path of a named child
    pub fn child<K: Into<String>>(&self, key: K) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.into()));
        Self { segments }
    }

    /// Path of an array element
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Concatenate two paths
    pub fn join(&self, other: &FieldPath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// The steps of this path, root first
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Whether this is the root path
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no steps
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The key when this path is a single key step
    pub fn as_single_key(&self) -> Option<&str> {
        match self.segments.as_slice() {
            [PathSegment::Key(key)] => Some(key),
            _ => None,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "$");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{}", key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = PathParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let error = |reason: &str| PathParseError {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        if input == "$" {
            return Ok(Self::root());
        }
        if input.is_empty() {
            return Err(error("path is empty"));
        }

        let mut segments = Vec::new();
        for part in input.split('.') {
            let (key, mut rest) = match part.find('[') {
                Some(pos) => (&part[..pos], &part[pos..]),
                None => (part, ""),
            };
            if key.is_empty() && (segments.is_empty() || rest.is_empty()) {
                return Err(error("empty key"));
            }
            if !key.is_empty() {
                segments.push(PathSegment::Key(key.to_string()));
            }
            while !rest.is_empty() {
                let close = rest.find(']').ok_or_else(|| error("unclosed '['"))?;
                let index = rest[1..close]
                    .parse::<usize>()
                    .map_err(|_| error("index is not a non-negative integer"))?;
                segments.push(PathSegment::Index(index));
                rest = &rest[close + 1..];
                if !rest.is_empty() && !rest.starts_with('[') {
                    return Err(error("unexpected characters after ']'"));
                }
            }
        }

        Ok(Self { segments })
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
