//! Bundled reference schemas and sample records
//!
//! The vendor and customer schemas follow the Treasury Board standards on
//! vendor and customer records. Each ships with sample records that
//! validate against it.
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use crate::schema::{Schema, SchemaDefinitionError};
use crate::value::{Value, ValueError};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const VENDOR_SCHEMA: &str = include_str!("../schemas/vendor.schema.json");
const CUSTOMER_SCHEMA: &str = include_str!("../schemas/customer.schema.json");

const VENDOR_SAMPLES: &[Sample] = &[Sample {
    file_name: "sample_vendor.json",
    source: include_str!("../schemas/samples/sample_vendor.json"),
}];

const CUSTOMER_SAMPLES: &[Sample] = &[
    Sample {
        file_name: "sample_customer.json",
        source: include_str!("../schemas/samples/sample_customer.json"),
    },
    Sample {
        file_name: "sample_business_customer.json",
        source: include_str!("../schemas/samples/sample_business_customer.json"),
    },
    Sample {
        file_name: "sample_government_customer.json",
        source: include_str!("../schemas/samples/sample_government_customer.json"),
    },
];

/// Failures reading bundled documents
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Unknown record type '{name}'. Expected 'vendor' or 'customer'")]
    UnknownRecordType { name: String },

    #[error("Bundled document '{name}' is not valid JSON: {source}")]
    Json {
        name: String,
        source: serde_json::Error,
    },

    #[error("Bundled schema '{name}' is invalid: {source}")]
    Schema {
        name: String,
        source: SchemaDefinitionError,
    },

    #[error("Bundled sample '{name}' is not a valid record: {source}")]
    Record { name: String, source: ValueError },
}

/// Kinds of record with a bundled schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    Vendor,
    Customer,
}

impl RecordType {
    /// Every bundled record type
    pub const ALL: [RecordType; 2] = [RecordType::Vendor, RecordType::Customer];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Vendor => "vendor",
            Self::Customer => "customer",
        }
    }

    /// File name the schema is written under
    pub fn schema_file_name(&self) -> String {
        format!("{}_schema.json", self.name())
    }

    /// The schema document as bundled
    pub fn schema_source(&self) -> &'static str {
        match self {
            Self::Vendor => VENDOR_SCHEMA,
            Self::Customer => CUSTOMER_SCHEMA,
        }
    }

    /// Parse and check the bundled schema
    pub fn schema(&self) -> Result<Schema, CatalogError> {
        let name = self.schema_file_name();
        let document: serde_json::Value =
            serde_json::from_str(self.schema_source()).map_err(|source| CatalogError::Json {
                name: name.clone(),
                source,
            })?;
        Schema::from_json(&document).map_err(|source| CatalogError::Schema { name, source })
    }

    /// Sample records that validate against the bundled schema
    pub fn samples(&self) -> &'static [Sample] {
        match self {
            Self::Vendor => VENDOR_SAMPLES,
            Self::Customer => CUSTOMER_SAMPLES,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecordType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vendor" => Ok(Self::Vendor),
            "customer" => Ok(Self::Customer),
            _ => Err(CatalogError::UnknownRecordType { name: s.to_string() }),
        }
    }
}

/// A bundled sample record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// File name the sample is written under
    pub file_name: &'static str,
    /// The record as JSON text
    pub source: &'static str,
}

impl Sample {
    /// Parse the sample into a record
    pub fn record(&self) -> Result<Value, CatalogError> {
        let document: serde_json::Value = serde_json::from_str(self.source).map_err(|source| CatalogError::Json {
            name: self.file_name.to_string(),
            source,
        })?;
        Value::from_json(&document).map_err(|source| CatalogError::Record {
            name: self.file_name.to_string(),
            source,
        })
    }
}
