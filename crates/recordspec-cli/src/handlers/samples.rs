//! Samples command handler
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use super::utils::write_file;
use crate::cli::{OutputFormat, SamplesArgs};
use crate::error::Result;
use crate::output::OutputWriter;
use recordspec_schemas::RecordType;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// Files written for one record type
#[derive(Debug, Serialize)]
struct WrittenSet {
    record_type: String,
    schema: PathBuf,
    samples: Vec<PathBuf>,
}

/// Handle the samples command
///
/// Writes `DIR/<type>_schema/<type>_schema.json` and the sample records
/// next to it. Each sample is checked against its schema first.
#[instrument(skip(output), fields(dir = %args.dir.display()))]
pub fn handle_samples(args: SamplesArgs, output: &mut OutputWriter) -> Result<()> {
    let mut written = Vec::new();

    for record_type in RecordType::ALL {
        let folder = args.dir.join(format!("{}_schema", record_type));
        let schema_path = folder.join(record_type.schema_file_name());
        write_file(&schema_path, record_type.schema_source())?;

        let schema = record_type.schema()?;
        let mut samples = Vec::new();
        for sample in record_type.samples() {
            let report = schema.validate(&sample.record()?);
            if !report.is_valid() {
                warn!(sample = sample.file_name, violations = report.len(), "Bundled sample does not validate");
            }

            let sample_path = folder.join(sample.file_name);
            write_file(&sample_path, sample.source)?;
            samples.push(sample_path);
        }

        info!(record_type = %record_type, samples = samples.len(), "Schema and samples written");
        output.success(&format!(
            "Wrote {} schema and {} sample(s) to {}",
            record_type,
            samples.len(),
            folder.display()
        ))?;
        written.push(WrittenSet {
            record_type: record_type.to_string(),
            schema: schema_path,
            samples,
        });
    }

    if output.format() != OutputFormat::Human {
        output.data(&written)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_writes_schema_folders() {
        let dir = tempdir().unwrap();
        let mut output = OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(std::io::sink()));

        handle_samples(
            SamplesArgs {
                dir: dir.path().to_path_buf(),
            },
            &mut output,
        )
        .unwrap();

        let vendor = dir.path().join("vendor_schema");
        assert!(vendor.join("vendor_schema.json").is_file());
        assert!(vendor.join("sample_vendor.json").is_file());

        let customer = dir.path().join("customer_schema");
        assert!(customer.join("customer_schema.json").is_file());
        for name in [
            "sample_customer.json",
            "sample_business_customer.json",
            "sample_government_customer.json",
        ] {
            assert!(customer.join(name).is_file(), "{name} missing");
        }

        let written = std::fs::read_to_string(customer.join("customer_schema.json")).unwrap();
        assert_eq!(written, RecordType::Customer.schema_source());
    }
}
