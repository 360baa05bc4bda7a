//! Workbook input: reads one named sheet into records.
//!
//! The allocation report arrives as a binary `.xlsx` workbook; the
//! `Allocation` and `Transfer` sheets drive the outstanding and DTW
//! reports. The first row of the sheet is the header, with field names
//! normalized by removing quote characters.

use crate::record::Record;
use calamine::{open_workbook, Reader, Xlsx};
use log::warn;
use std::path::Path;

/// Reads a named sheet of a workbook into records.
///
/// The first row is the header; fully blank rows are skipped. A missing
/// file or missing sheet logs a warning and returns an empty set, matching
/// the delimited reader's failure semantics.
pub fn read_sheet(path: &Path, sheet_name: &str) -> Vec<Record> {
    if !path.exists() {
        warn!("Workbook not found: {}", path.display());
        return Vec::new();
    }

    let mut workbook: Xlsx<_> = match open_workbook(path) {
        Ok(workbook) => workbook,
        Err(e) => {
            warn!("Failed to open workbook {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let range = match workbook.worksheet_range(sheet_name) {
        Ok(range) => range,
        Err(e) => {
            warn!(
                "Sheet '{}' not readable in {}: {}",
                sheet_name,
                path.display(),
                e
            );
            return Vec::new();
        }
    };

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| cell.to_string().replace('"', "").trim().to_string())
            .collect(),
        None => {
            warn!("Sheet '{}' in {} is empty", sheet_name, path.display());
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for data_row in rows {
        let values: Vec<String> = data_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let record = Record::from_row(&headers, &values);
        if record.is_blank() {
            continue;
        }
        records.push(record);
    }

    records
}
