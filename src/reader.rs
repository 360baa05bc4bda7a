//! Delimited text input: data files and report templates.
//!
//! Both the customer master export and the auxiliary flat files are
//! header-first delimited text (pipe or comma). Quoting is deliberately
//! naive: each field is trimmed and unwrapped of a single pair of
//! surrounding double quotes, nothing more. Fields containing the delimiter
//! must come through the converter (see [`crate::convert`]) first.

use crate::record::Record;
use csv::ReaderBuilder;
use log::warn;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Strips one pair of surrounding double quotes, after trimming.
fn unwrap_quotes(field: &str) -> &str {
    let trimmed = field.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

/// Reads a delimited file into records, using the first line as the header.
///
/// A missing file is not fatal: it is logged and yields an empty set, and
/// the caller decides whether that aborts the report or defaults a field.
pub fn read_delimited(path: &Path, delimiter: u8) -> Vec<Record> {
    if !path.exists() {
        warn!("Input file not found: {}", path.display());
        return Vec::new();
    }

    match File::open(path) {
        Ok(file) => read_delimited_from(file, delimiter),
        Err(e) => {
            warn!("Failed to open {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Reads delimited records from any reader. See [`read_delimited`].
pub fn read_delimited_from<R: Read>(reader: R, delimiter: u8) -> Vec<Record> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .quoting(false)
        .flexible(true)
        .has_headers(false)
        .from_reader(reader);

    let mut headers: Vec<String> = Vec::new();
    let mut records = Vec::new();

    for result in csv_reader.records() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Skipping malformed line: {}", e);
                continue;
            }
        };

        let fields: Vec<String> = raw.iter().map(|f| unwrap_quotes(f).to_string()).collect();
        if headers.is_empty() {
            if fields.iter().all(|f| f.is_empty()) {
                continue;
            }
            headers = fields;
        } else {
            records.push(Record::from_row(&headers, &fields));
        }
    }

    records
}

/// Reads the ordered output column list from a template file's first line.
///
/// The template's first line is split on `|` and each name trimmed. A
/// missing template logs a warning and returns an empty list; the caller
/// must treat an empty list as a hard stop for that one report.
pub fn read_template_fields(path: &Path) -> Vec<String> {
    if !path.exists() {
        warn!("Template file not found: {}", path.display());
        return Vec::new();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read template {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    match content.lines().next() {
        Some(line) if !line.trim().is_empty() => {
            line.split('|').map(|f| f.trim().to_string()).collect()
        }
        _ => Vec::new(),
    }
}
