//! Construction-time schema errors
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use crate::schema::SchemaKind;
use thiserror::Error;

/// Result type for schema construction
pub type SchemaResult<T> = Result<T, SchemaDefinitionError>;

/// A schema that can never be used safely
///
/// Every variant carries `location`, a pointer into the schema document
/// (`#/properties/contactInformation/properties/address`).
#[derive(Debug, Error)]
pub enum SchemaDefinitionError {
    /// `type` names a kind outside the supported vocabulary
    #[error("unknown type '{type_name}' at {location}")]
    UnknownType { location: String, type_name: String },

    /// `required` names a field missing from `properties`
    #[error("required field '{field}' at {location} is not declared in properties")]
    UnknownRequiredField { location: String, field: String },

    /// A conditional consequence or alternative targets an undeclared field
    #[error("field '{field}' referenced at {location} is not declared in properties")]
    UnknownProperty { location: String, field: String },

    /// `pattern` does not compile
    #[error("invalid pattern '{pattern}' at {location}: {source}")]
    InvalidPattern {
        location: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// `format` names no known validator
    #[error("unknown format '{format}' at {location}")]
    UnknownFormat { location: String, format: String },

    /// A keyword outside the supported vocabulary
    #[error("unsupported keyword '{keyword}' at {location}")]
    UnsupportedKeyword { location: String, keyword: String },

    /// A keyword with a value of the wrong shape
    #[error("invalid '{keyword}' at {location}: {reason}")]
    InvalidKeyword {
        location: String,
        keyword: String,
        reason: String,
    },

    /// A keyword that has no meaning for the node's kind
    #[error("'{keyword}' at {location} does not apply to {kind} nodes")]
    KeywordNotApplicable {
        location: String,
        keyword: String,
        kind: SchemaKind,
    },

    /// An any-of requirement with nothing to choose from
    #[error("any-of requirement at {location} lists no alternatives")]
    EmptyAlternatives { location: String },
}

impl SchemaDefinitionError {
    /// Create an invalid keyword error
    pub fn invalid_keyword(
        location: impl Into<String>,
        keyword: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidKeyword {
            location: location.into(),
            keyword: keyword.into(),
            reason: reason.into(),
        }
    }

    /// Create a not-applicable error
    pub fn not_applicable(location: impl Into<String>, keyword: impl Into<String>, kind: SchemaKind) -> Self {
        Self::KeywordNotApplicable {
            location: location.into(),
            keyword: keyword.into(),
            kind,
        }
    }

    /// Schema location the error refers to
    pub fn location(&self) -> &str {
        match self {
            Self::UnknownType { location, .. }
            | Self::UnknownRequiredField { location, .. }
            | Self::UnknownProperty { location, .. }
            | Self::InvalidPattern { location, .. }
            | Self::UnknownFormat { location, .. }
            | Self::UnsupportedKeyword { location, .. }
            | Self::InvalidKeyword { location, .. }
            | Self::KeywordNotApplicable { location, .. }
            | Self::EmptyAlternatives { location } => location,
        }
    }
}
