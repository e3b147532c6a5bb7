//! Output formatting and writing utilities
//!
//! This module formats validation reports and documents as JSON, YAML or
//! human-readable text, with optional colors.
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::logging::redaction;
use colored::Colorize;
use recordspec_schemas::{Report, Violation};
use serde::Serialize;
use std::io::{self, Write};
use tracing::{debug, trace};

/// Formatting of output values for each output format
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a validation report
    fn format_report(&self, report: &Report) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // Documents read best as pretty JSON
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_report(&self, report: &Report) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_report_human(report)),
            _ => self.format(report),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(format: OutputFormat, use_color: bool, quiet: bool, writer: Box<dyn Write>) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        if tracing::enabled!(tracing::Level::TRACE) {
            let mut value_json = serde_json::to_value(value)?;
            redaction::redact_json_value(&mut value_json);
            trace!("Outputting data: {}", value_json);
        }

        let formatted = self.format.format(value)?;
        self.write_formatted(&formatted)
    }

    /// Write a validation report
    ///
    /// Machine formats always carry the full report. In human format a
    /// valid report is a single success line, silenced by `--quiet`.
    pub fn report(&mut self, report: &Report) -> Result<()> {
        if report.is_valid() && self.format == OutputFormat::Human {
            return self.success("✅ Record is valid");
        }

        let formatted = self.format.format_report(report)?;
        if self.format == OutputFormat::Human && self.use_color {
            return self.writeln(formatted.trim_end().red().to_string().as_str());
        }
        self.write_formatted(&formatted)
    }

    /// Write a table of expected and found values per violation
    pub fn violation_table(&mut self, violations: &[Violation]) -> Result<()> {
        let rows = violations
            .iter()
            .map(|v| {
                vec![
                    v.path.to_string(),
                    v.kind.to_string(),
                    v.expected.clone(),
                    redaction::redact_sensitive(&v.actual),
                ]
            })
            .collect();
        self.table(&["Path", "Kind", "Expected", "Found"], rows)
    }

    /// Write a table (human format only)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        let header_row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
            .collect::<Vec<_>>()
            .join(" │ ");

        if self.use_color {
            self.writeln(&header_row.bold().to_string())?;
        } else {
            self.writeln(&header_row)?;
        }

        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        self.writeln(&separator)?;

        for row in rows {
            let row_str = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    if i < widths.len() {
                        format!("{:width$}", cell, width = widths[i])
                    } else {
                        cell.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(" │ ");
            self.writeln(row_str.trim_end())?;
        }

        Ok(())
    }

    fn write_formatted(&mut self, formatted: &str) -> Result<()> {
        if formatted.ends_with('\n') {
            self.write(formatted)
        } else {
            self.writeln(formatted)
        }
    }
}

/// Format a report for human reading
fn format_report_human(report: &Report) -> String {
    if report.is_valid() {
        return "✅ Record is valid\n".to_string();
    }

    let mut output = format!("❌ Validation Failed - {} Violation(s)\n\n", report.len());
    for (i, violation) in report.violations().iter().enumerate() {
        output.push_str(&format!(
            "{}. {}: {} [{}]\n",
            i + 1,
            violation.path,
            violation.message,
            violation.kind
        ));
    }
    output
}
