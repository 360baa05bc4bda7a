//! # ICO Report Generator
//!
//! A batch CLI that transforms a customer master export and auxiliary
//! reference tables into the pipe-delimited "ICO Portal DA" regulator
//! report set. Each report's column layout is driven by a template file;
//! every output column resolves through an ordered chain of rules
//! (identity override literal, named report rule, direct copy, default).
//!
//! ## Design Principles
//!
//! - **Table-driven resolution**: per-report rules live in a declarative
//!   rule table, not conditional chains
//! - **Degrade, don't crash**: missing lookups and malformed values become
//!   defaults with a logged warning; only an empty template aborts a report
//! - **Isolated reports**: one failed report never blocks the rest of a run
//! - **No hidden state**: all lookups flow through an explicitly built
//!   context; the only counter is the DTW occurrence suffix, scoped to one
//!   report generation
//!
//! ## Example
//!
//! ```no_run
//! use ico_report_gen::{Generator, GeneratorConfig, RunParams};
//!
//! let generator = Generator::new(GeneratorConfig::default()).unwrap();
//! let params = RunParams {
//!     dbd_no: "111".to_string(),
//!     asset_id: "4846".to_string(),
//!     yyyymmdd: "20250307".to_string(),
//! };
//! generator.generate_all(&params);
//! ```

pub mod convert;
pub mod datetime;
pub mod error;
pub mod generator;
pub mod lookup;
pub mod overrides;
pub mod reader;
pub mod record;
pub mod refdata;
pub mod report;
pub mod resolver;
pub mod sheet;
pub mod writer;

pub use convert::convert_delimiter;
pub use error::{ReportError, Result};
pub use generator::{Generator, GeneratorConfig, RunParams};
pub use lookup::{LookupContext, RefTable};
pub use overrides::OverrideSet;
pub use record::Record;
pub use report::ReportType;
pub use resolver::Resolver;
