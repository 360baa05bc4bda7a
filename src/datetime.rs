//! Timestamp transforms used by the field resolution rules.
//!
//! Source timestamps arrive in two shapes: ISO-ish strings from the
//! customer export (`2025-02-23T10:00:00Z`) and day-first strings from the
//! spreadsheet exports (`23/02/2025 10:00:00` or `23-02-2025 10:00:00`).

use chrono::NaiveDateTime;

/// Day-first timestamp formats accepted from the spreadsheet exports.
const DAY_FIRST_FORMATS: &[&str] = &["%d/%m/%Y %H:%M:%S", "%d-%m-%Y %H:%M:%S"];

/// Truncates a timestamp to its date portion: the first 10 characters.
///
/// Strings shorter than 10 characters pass through unchanged.
pub fn truncate_to_date(timestamp: &str) -> &str {
    if timestamp.is_char_boundary(10) {
        &timestamp[..10]
    } else {
        timestamp
    }
}

/// Parses a day-first timestamp in either accepted format.
pub fn parse_day_first(timestamp: &str) -> Option<NaiveDateTime> {
    let trimmed = timestamp.trim();
    DAY_FIRST_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
}

/// Extracts the ISO date (`YYYY-MM-DD`) from a day-first timestamp.
///
/// Returns `None` when the string matches neither accepted pattern; the
/// caller emits an empty field and logs a warning.
pub fn day_first_to_iso_date(timestamp: &str) -> Option<String> {
    parse_day_first(timestamp).map(|dt| dt.format("%Y-%m-%d").to_string())
}

/// Extracts the zero-padded time with six fractional digits
/// (`HH:MM:SS.000000`) from a day-first timestamp.
pub fn day_first_to_time(timestamp: &str) -> Option<String> {
    parse_day_first(timestamp).map(|dt| dt.format("%H:%M:%S.%6f").to_string())
}
