//! Schema command handler
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use super::utils::write_file;
use crate::cli::SchemaArgs;
use crate::error::Result;
use crate::output::OutputWriter;
use recordspec_schemas::RecordType;
use tracing::{info, instrument};

/// Handle the schema command
///
/// The bundled schema is parsed and serialized back, so what is printed
/// is exactly what validation uses.
#[instrument(skip(output), fields(record_type = ?args.record_type))]
pub fn handle_schema(args: SchemaArgs, output: &mut OutputWriter) -> Result<()> {
    let record_type = RecordType::from(args.record_type);
    let document = record_type.schema()?.to_json();

    match args.save_to {
        Some(path) => {
            write_file(&path, &serde_json::to_string_pretty(&document)?)?;
            info!(path = %path.display(), "Schema saved");
            output.success(&format!("Saved {} schema to {}", record_type, path.display()))
        }
        None => output.data(&document),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{OutputFormat, RecordTypeArg};
    use recordspec_schemas::Schema;
    use tempfile::tempdir;

    #[test]
    fn test_saved_schema_reparses_to_the_bundled_one() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("customer_schema.json");
        let mut output = OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(std::io::sink()));

        handle_schema(
            SchemaArgs {
                record_type: RecordTypeArg::Customer,
                save_to: Some(path.clone()),
            },
            &mut output,
        )
        .unwrap();

        let written: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let reparsed = Schema::from_json(&written).unwrap();
        assert_eq!(reparsed, RecordType::Customer.schema().unwrap());
    }
}
