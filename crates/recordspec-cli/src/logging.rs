//! Logging utilities for the Recordspec CLI
//!
//! This module provides:
//! - Request ID generation and tracking
//! - Redaction of identification and banking numbers in echoed records
//! - Performance timing spans
//! - Structured logging setup in compact, full or JSON form
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use is_terminal::IsTerminal;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::{field, Span};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Global request ID for the current session
static REQUEST_ID: OnceLock<String> = OnceLock::new();

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter
    pub level: String,
    /// Output format: compact, full, json
    pub format: LogFormat,
    /// Allow ANSI colors on stderr
    pub console: bool,
    /// Include thread IDs
    pub thread_ids: bool,
    /// Include file and line numbers
    pub source_location: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Compact format for everyday use
    Compact,
    /// Full format with all details
    Full,
    /// JSON structured format
    Json,
}

impl LogFormat {
    /// Parse a format name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "full" => Some(Self::Full),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            console: true,
            thread_ids: false,
            source_location: false,
        }
    }
}

impl LoggingConfig {
    /// Create logging config from verbosity level
    pub fn from_verbosity(verbosity: u8) -> Self {
        let mut config = Self::default();

        match verbosity {
            0 => {
                config.level = "warn".to_string();
            }
            1 => {
                config.level = "info".to_string();
            }
            2 => {
                config.level = "debug".to_string();
                config.source_location = true;
            }
            _ => {
                config.level = "trace".to_string();
                config.format = LogFormat::Full;
                config.source_location = true;
                config.thread_ids = true;
            }
        }

        config
    }

    /// Apply settings from the configuration file
    ///
    /// A configured level only replaces the default one; an explicit `-v`
    /// on the command line keeps precedence.
    pub fn merge_with_file(&mut self, verbosity: u8, level: Option<&str>, format: Option<&str>) {
        if verbosity == 0 {
            if let Some(level) = level {
                self.level = level.to_string();
            }
        }
        if let Some(name) = format {
            match LogFormat::from_name(name) {
                Some(format) => self.format = format,
                None => eprintln!("Ignoring unknown log format '{}' in configuration", name),
            }
        }
    }

    /// Apply environment overrides
    pub fn merge_with_env(&mut self) {
        // RUST_LOG takes precedence
        if let Ok(rust_log) = std::env::var("RUST_LOG") {
            self.level = rust_log;
        }

        if let Ok(format) = std::env::var("RECORDSPEC_LOG_FORMAT") {
            match LogFormat::from_name(&format) {
                Some(format) => self.format = format,
                None => eprintln!("Ignoring unknown RECORDSPEC_LOG_FORMAT '{}'", format),
            }
        }
    }
}

/// Initialize the global logging system
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let env_filter = create_env_filter(&config)?;
    let ansi = config.console && std::io::stderr().is_terminal();

    // Each format yields a different subscriber type
    match config.format {
        LogFormat::Compact => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(ansi)
                .with_thread_ids(config.thread_ids)
                .with_file(config.source_location)
                .with_line_number(config.source_location)
                .compact()
                .finish();

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| Error::Logging(format!("Failed to initialize logging: {}", e)))?;
        }
        LogFormat::Json => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(false)
                .with_thread_ids(config.thread_ids)
                .with_file(config.source_location)
                .with_line_number(config.source_location)
                .json()
                .finish();

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| Error::Logging(format!("Failed to initialize logging: {}", e)))?;
        }
        LogFormat::Full => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(ansi)
                .with_thread_ids(config.thread_ids)
                .with_file(config.source_location)
                .with_line_number(config.source_location)
                .finish();

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| Error::Logging(format!("Failed to initialize logging: {}", e)))?;
        }
    }

    let request_id = generate_request_id();
    REQUEST_ID
        .set(request_id.clone())
        .map_err(|_| Error::Logging("Request ID was already set".to_string()))?;

    tracing::info!(
        request_id = %request_id,
        config = ?config,
        "Logging system initialized"
    );

    Ok(())
}

/// Create environment filter based on configuration
fn create_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    EnvFilter::try_new(&config.level)
        .map_err(|e| Error::Logging(format!("Invalid log level '{}': {}", config.level, e)))
}

/// Generate a unique request ID for this session
pub fn generate_request_id() -> String {
    format!("req_{}", Uuid::new_v4().simple())
}

/// Get the current request ID
pub fn current_request_id() -> Option<&'static str> {
    REQUEST_ID.get().map(|s| s.as_str())
}

/// Create a span with request ID and timing
pub fn create_operation_span(operation: &str, details: Option<&str>) -> Span {
    tracing::info_span!(
        "operation",
        operation = operation,
        request_id = current_request_id().unwrap_or("unknown"),
        details = details.unwrap_or(""),
        duration_ms = field::Empty,
    )
}

/// Redaction of personal and banking identifiers
///
/// Records carry social insurance numbers, business numbers and bank
/// account details. They are masked before a record is echoed.
pub mod redaction {
    use regex::Regex;
    use std::sync::OnceLock;

    const MASK: &str = "***";

    /// Word prefixes that mark a field as holding an identifier
    const SENSITIVE_PREFIXES: &[&str] = &["account", "bank", "number"];

    /// Whole words that mark a field as holding an identifier
    const SENSITIVE_WORDS: &[&str] = &["sin"];

    static NINE_DIGIT_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

    fn nine_digit_regex() -> Option<&'static Regex> {
        NINE_DIGIT_REGEX
            .get_or_init(|| Regex::new(r"\b[0-9]{3}[ -]?[0-9]{3}[ -]?[0-9]{3}\b").ok())
            .as_ref()
    }

    /// Mask nine-digit identifiers (SIN or business number shaped) in free text
    pub fn redact_sensitive(input: &str) -> String {
        match nine_digit_regex() {
            Some(regex) => regex.replace_all(input, MASK).into_owned(),
            None => input.to_string(),
        }
    }

    /// Redact sensitive fields in a JSON record, in place
    pub fn redact_json_value(value: &mut serde_json::Value) {
        match value {
            serde_json::Value::Object(map) => {
                for (key, val) in map.iter_mut() {
                    if is_sensitive_key(key) {
                        mask(val);
                    } else {
                        redact_json_value(val);
                    }
                }
            }
            serde_json::Value::Array(arr) => {
                for item in arr.iter_mut() {
                    redact_json_value(item);
                }
            }
            serde_json::Value::String(s) => {
                *s = redact_sensitive(s);
            }
            _ => {}
        }
    }

    /// Replace every scalar under a sensitive key, keeping the shape
    fn mask(value: &mut serde_json::Value) {
        match value {
            serde_json::Value::Object(map) => map.values_mut().for_each(mask),
            serde_json::Value::Array(arr) => arr.iter_mut().for_each(mask),
            serde_json::Value::Null => {}
            other => *other = serde_json::Value::String(MASK.to_string()),
        }
    }

    /// Check if a field name marks an identifier
    ///
    /// Names are split into camelCase and snake_case words, so that
    /// `businessName` and `singleSource` are not caught by `sin` while
    /// `sinNumber`, `bankingInformation` and `accountNumber` are.
    pub fn is_sensitive_key(key: &str) -> bool {
        key_words(key).iter().any(|word| {
            SENSITIVE_WORDS.contains(&word.as_str())
                || SENSITIVE_PREFIXES.iter().any(|prefix| word.starts_with(prefix))
        })
    }

    fn key_words(key: &str) -> Vec<String> {
        let mut words = Vec::new();
        let mut current = String::new();
        for ch in key.chars() {
            if ch == '_' || ch == '-' || ch == ' ' {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                continue;
            }
            if ch.is_uppercase() && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            current.extend(ch.to_lowercase());
        }
        if !current.is_empty() {
            words.push(current);
        }
        words
    }
}

/// Performance timing utilities
pub mod timing {
    use std::time::Instant;
    use tracing::Span;

    /// A timer that logs its duration when dropped
    pub struct Timer {
        start: Instant,
        span: Span,
        operation: String,
    }

    impl Timer {
        pub fn new(operation: &str) -> Self {
            let span = super::create_operation_span(operation, None);

            Self {
                start: Instant::now(),
                span,
                operation: operation.to_string(),
            }
        }

        pub fn with_details(operation: &str, details: &str) -> Self {
            let span = super::create_operation_span(operation, Some(details));

            Self {
                start: Instant::now(),
                span,
                operation: operation.to_string(),
            }
        }
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            let duration = self.start.elapsed();
            self.span.record("duration_ms", duration.as_millis() as u64);

            tracing::debug!(
                operation = %self.operation,
                duration_ms = duration.as_millis(),
                "Operation completed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sensitive_keys() {
        assert!(redaction::is_sensitive_key("sinNumber"));
        assert!(redaction::is_sensitive_key("businessNumber"));
        assert!(redaction::is_sensitive_key("bankingInformation"));
        assert!(redaction::is_sensitive_key("accountNumber"));
        assert!(redaction::is_sensitive_key("account_holder"));
        assert!(!redaction::is_sensitive_key("businessName"));
        assert!(!redaction::is_sensitive_key("legalName"));
        assert!(!redaction::is_sensitive_key("telephone"));
    }

    #[test]
    fn test_sin_matches_whole_word_only() {
        assert!(redaction::is_sensitive_key("sin"));
        assert!(redaction::is_sensitive_key("employee_sin"));
        assert!(!redaction::is_sensitive_key("singleSourceJustification"));
        assert!(!redaction::is_sensitive_key("sinceDate"));
        assert!(!redaction::is_sensitive_key("single_use"));
    }

    #[test]
    fn test_free_text_redaction() {
        let redacted = redaction::redact_sensitive("SIN 123 456 789 on file, BN 987654321");
        assert_eq!(redacted, "SIN *** on file, BN ***");

        // ten-digit phone numbers are left alone
        assert_eq!(redaction::redact_sensitive("6135551234"), "6135551234");
    }

    #[test]
    fn test_json_redaction_keeps_shape() {
        let mut value = json!({
            "legalName": "ABC Company Inc.",
            "vendorIdentificationNumbers": {"businessNumber": "123456789"},
            "bankingInformation": {"institutionNumber": "001", "transitNumber": "12345"},
            "contactInformation": {"telephone": "6135551234"},
            "notes": "old BN 111222333"
        });

        redaction::redact_json_value(&mut value);

        assert_eq!(value["legalName"], "ABC Company Inc.");
        assert_eq!(value["vendorIdentificationNumbers"]["businessNumber"], "***");
        assert_eq!(value["bankingInformation"]["institutionNumber"], "***");
        assert_eq!(value["bankingInformation"]["transitNumber"], "***");
        assert_eq!(value["contactInformation"]["telephone"], "6135551234");
        assert_eq!(value["notes"], "old BN ***");
    }

    #[test]
    fn test_logging_config_from_verbosity() {
        let config = LoggingConfig::from_verbosity(0);
        assert_eq!(config.level, "warn");
        assert!(!config.source_location);

        let config = LoggingConfig::from_verbosity(2);
        assert_eq!(config.level, "debug");
        assert!(config.source_location);

        let config = LoggingConfig::from_verbosity(3);
        assert_eq!(config.level, "trace");
        assert_eq!(config.format, LogFormat::Full);
        assert!(config.thread_ids);
    }

    #[test]
    fn test_merge_with_file_respects_verbosity() {
        let mut config = LoggingConfig::from_verbosity(0);
        config.merge_with_file(0, Some("info"), Some("json"));
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Json);

        let mut config = LoggingConfig::from_verbosity(2);
        config.merge_with_file(2, Some("error"), None);
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Compact);
    }

    #[test]
    fn test_request_id_shape() {
        let id = generate_request_id();
        assert!(id.starts_with("req_"));
        assert_eq!(id.len(), "req_".len() + 32);
    }
}
