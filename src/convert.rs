//! Master-export delimiter conversion.
//!
//! The raw customer export arrives comma-delimited with quoted fields.
//! The report inputs are read with naive pipe splitting, so the export is
//! rewritten pipe-delimited once, with real CSV quoting honored on the way
//! in. Operators run this whenever a fresh export lands.

use crate::error::Result;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::info;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Rewrites a comma-delimited, quoted CSV file as pipe-delimited.
pub fn convert_delimiter(input: &Path, output: &Path) -> Result<()> {
    let input_file = File::open(input)?;
    let output_file = File::create(output)?;
    convert_delimiter_streams(input_file, output_file)?;

    info!("Converted {} -> {}", input.display(), output.display());
    Ok(())
}

/// Stream variant of [`convert_delimiter`].
pub fn convert_delimiter_streams<R: Read, W: Write>(input: R, output: W) -> Result<()> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(false)
        .from_reader(input);

    let mut writer = WriterBuilder::new()
        .delimiter(b'|')
        .from_writer(output);

    for result in reader.records() {
        let record = result?;
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
