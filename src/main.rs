//! ICO Report Generator CLI
//!
//! Generates the full ICO Portal DA report set from the master directory.
//!
//! # Usage
//!
//! ```bash
//! ico-report-gen <dbdNo> <assetId> <yyyymmdd> [--master DIR] [--templates DIR] [--output DIR]
//! ico-report-gen convert <input.csv> <output.csv>
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use ico_report_gen::{
    convert_delimiter, Generator, GeneratorConfig, ReportError, Result, RunParams,
};
use std::env;
use std::path::PathBuf;
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.first().map(String::as_str) == Some("convert") {
        return run_convert(&args[1..]);
    }

    let (params, config) = parse_args(&args)?;
    let generator = Generator::new(config)?;
    let generated = generator.generate_all(&params);

    if generated == 0 {
        return Err(ReportError::NoReports);
    }
    Ok(())
}

fn run_convert(args: &[String]) -> Result<()> {
    let (input, output) = match (args.first(), args.get(1)) {
        (Some(input), Some(output)) => (PathBuf::from(input), PathBuf::from(output)),
        _ => return Err(ReportError::MissingArgument),
    };
    convert_delimiter(&input, &output)
}

fn parse_args(args: &[String]) -> Result<(RunParams, GeneratorConfig)> {
    let mut positional = Vec::new();
    let mut config = GeneratorConfig::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--master" => config.master_dir = next_path(&mut iter)?,
            "--templates" => config.template_dir = next_path(&mut iter)?,
            "--output" => config.output_dir = next_path(&mut iter)?,
            _ => positional.push(arg.clone()),
        }
    }

    if positional.len() < 3 {
        return Err(ReportError::MissingArgument);
    }

    let params = RunParams {
        dbd_no: positional[0].clone(),
        asset_id: positional[1].clone(),
        yyyymmdd: positional[2].clone(),
    };
    Ok((params, config))
}

fn next_path(iter: &mut std::slice::Iter<'_, String>) -> Result<PathBuf> {
    iter.next()
        .map(PathBuf::from)
        .ok_or(ReportError::MissingArgument)
}
