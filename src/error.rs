//! Error types for report generation.

use thiserror::Error;

/// Result type alias for report generation operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while generating a report.
///
/// Most degradable conditions (missing lookup matches, malformed dates,
/// absent optional inputs) never surface here; they are logged and replaced
/// with a default value. These variants are the hard stops for a single
/// report or for the process entry point.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Failed to open, read, or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Template file absent or its header line empty; aborts that one report
    #[error("Template {0} has no field list; report skipped")]
    EmptyTemplate(String),

    /// Template file name does not match any known report type
    #[error("Unknown report template: {0}")]
    UnknownTemplate(String),

    /// Every report in the run failed
    #[error("No reports were generated")]
    NoReports,

    /// Identity override dataset present but malformed
    #[error("Invalid override dataset {path}: {message}")]
    InvalidOverrides { path: String, message: String },

    /// Missing CLI argument
    #[error("Missing argument. Usage: ico-report-gen <dbdNo> <assetId> <yyyymmdd> [--master DIR] [--templates DIR] [--output DIR]")]
    MissingArgument,
}
