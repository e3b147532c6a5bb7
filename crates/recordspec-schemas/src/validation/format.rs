//! Named string format validators
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use crate::schema::Format;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Whether `input` satisfies `format`
pub fn is_valid(format: Format, input: &str) -> bool {
    match format {
        Format::Email => is_email(input),
        Format::Date => is_date(input),
        Format::DateTime => is_date_time(input),
    }
}

/// Exactly one `@`, both sides non-empty
fn is_email(input: &str) -> bool {
    match input.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// `YYYY-MM-DD`, calendar-valid
fn is_date(input: &str) -> bool {
    let bytes = input.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    shape_ok && NaiveDate::parse_from_str(input, "%Y-%m-%d").is_ok()
}

/// RFC 3339, or the same without an offset
fn is_date_time(input: &str) -> bool {
    match input.get(..10) {
        Some(date) if is_date(date) => {}
        _ => return false,
    }
    DateTime::parse_from_rfc3339(input).is_ok()
        || NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
}
