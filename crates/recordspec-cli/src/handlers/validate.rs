//! Validation command handler
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use super::utils::{load_schema, resolve_schema_source};
use crate::cli::{OutputFormat, ValidateArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::{redaction, timing::Timer};
use crate::output::OutputWriter;
use recordspec_schemas::SchemaLoader;
use tracing::{debug, info, instrument};

/// Handle the validate command
///
/// A record with violations is reported and then turned into
/// [`Error::ValidationFailed`], so the process exits non-zero.
#[instrument(skip(config, output), fields(record = %args.record.display()))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &format!("record: {}", args.record.display()));

    let source = resolve_schema_source(args.schema.as_deref(), config)?;
    info!(schema = %source, "Starting validation");
    output.info(&format!("Validating {} against {}", args.record.display(), source))?;

    let mut loader = SchemaLoader::new();
    let schema = {
        let _schema_timer = Timer::new("schema_loading");
        load_schema(&source, &mut loader)?
    };
    let record = {
        let _record_timer = Timer::new("record_loading");
        loader.load_record(&args.record)?
    };
    debug!(kind = record.kind().name(), "Record loaded");

    let report = {
        let _validation_timer = Timer::new("record_validation");
        schema.validate(&record)
    };
    info!(valid = report.is_valid(), violations = report.len(), "Validation finished");

    output.report(&report)?;

    if args.detailed && !report.is_valid() && output.format() == OutputFormat::Human {
        output.section("Details")?;
        output.violation_table(report.violations())?;

        output.section("Record (redacted)")?;
        let mut echoed = record.to_json();
        redaction::redact_json_value(&mut echoed);
        output.data(&echoed)?;
    }

    report.into_result().map_err(|report| Error::ValidationFailed {
        violations: report.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordspec_schemas::RecordType;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn quiet_output() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Json, false, true, Box::new(std::io::sink()))
    }

    fn args(record: &Path, schema: &str) -> ValidateArgs {
        ValidateArgs {
            record: record.to_path_buf(),
            schema: Some(schema.to_string()),
            detailed: true,
        }
    }

    #[test]
    fn test_bundled_samples_pass() {
        let dir = tempdir().unwrap();
        for record_type in RecordType::ALL {
            for sample in record_type.samples() {
                let path = dir.path().join(sample.file_name);
                std::fs::write(&path, sample.source).unwrap();
                handle_validate(args(&path, record_type.name()), &Config::default(), &mut quiet_output()).unwrap();
            }
        }
    }

    #[test]
    fn test_invalid_record_fails_with_violation_count() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vendor.yaml");
        std::fs::write(
            &path,
            "legalName: ABC Company Inc.\ncountryCode: CA\norganizationType: Corporation/Partnership\nvendorIdentificationNumbers:\n  supplierNumber: SUPP-12345\n",
        )
        .unwrap();

        let err = handle_validate(args(&path, "vendor"), &Config::default(), &mut quiet_output()).unwrap_err();
        assert!(matches!(err, Error::ValidationFailed { violations: 1 }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_missing_record_is_not_found() {
        let err = handle_validate(
            args(&PathBuf::from("does-not-exist.json"), "customer"),
            &Config::default(),
            &mut quiet_output(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
