//! Per-template report generation.
//!
//! One `Generator` is built per run: it loads the customer master, the
//! reference tables, the identity overrides, and the allocation sheet once,
//! then generates each requested report to completion before the next.
//! Report generations are isolated; a failed template is logged and the
//! run continues.

use crate::error::{ReportError, Result};
use crate::lookup::LookupContext;
use crate::overrides::OverrideSet;
use crate::reader::{read_delimited, read_template_fields};
use crate::record::Record;
use crate::report::{DrivingSource, ReportType, ALLOCATION_SHEET};
use crate::resolver::Resolver;
use crate::sheet::read_sheet;
use crate::writer::{derive_output_path, write_report};
use log::{error, info, warn};
use std::path::PathBuf;

/// The allocation workbook file name under the master directory.
const ALLOCATION_WORKBOOK: &str = "allocation_report.xlsx";
/// The wallet export file name under the master directory.
const WALLET_EXPORT: &str = "wallet_report.csv";
/// The identity override dataset file name under the master directory.
const OVERRIDES_FILE: &str = "identity_overrides.json";

/// Input and output locations for one run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Directory holding the customer export, workbook, wallet export,
    /// override dataset, and `ref/` tables.
    pub master_dir: PathBuf,
    /// Directory holding the report templates.
    pub template_dir: PathBuf,
    /// Directory the reports are written into; created if absent.
    pub output_dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            master_dir: PathBuf::from("DA-Master"),
            template_dir: PathBuf::from("DA-template"),
            output_dir: PathBuf::from("output"),
        }
    }
}

/// Placeholder values substituted into template file names.
#[derive(Debug, Clone)]
pub struct RunParams {
    pub dbd_no: String,
    pub asset_id: String,
    pub yyyymmdd: String,
}

/// Loads all shared inputs once and generates reports from them.
pub struct Generator {
    config: GeneratorConfig,
    ctx: LookupContext,
    overrides: OverrideSet,
    allocations: Vec<Record>,
}

impl Generator {
    /// Loads the customer master, reference tables, override dataset, and
    /// allocation sheet from the configured master directory.
    ///
    /// A malformed override dataset is a hard error so a bad deploy cannot
    /// silently drop the per-identity literals; every other missing input
    /// degrades to an empty collection with a warning.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let ctx = LookupContext::from_master_dir(&config.master_dir);
        let overrides = OverrideSet::load(&config.master_dir.join(OVERRIDES_FILE))?;
        let allocations = read_sheet(
            &config.master_dir.join(ALLOCATION_WORKBOOK),
            ALLOCATION_SHEET,
        );

        Ok(Generator {
            config,
            ctx,
            overrides,
            allocations,
        })
    }

    /// Generates one report from its template file name.
    ///
    /// Returns the written output path. An absent or empty template aborts
    /// this report only.
    pub fn generate(&self, template_file_name: &str, params: &RunParams) -> Result<PathBuf> {
        let report_type = ReportType::from_template_name(template_file_name)
            .ok_or_else(|| ReportError::UnknownTemplate(template_file_name.to_string()))?;

        let template_path = self.config.template_dir.join(template_file_name);
        let fields = read_template_fields(&template_path);
        if fields.is_empty() {
            return Err(ReportError::EmptyTemplate(template_file_name.to_string()));
        }

        // The allocation sheet is the one shared driver, loaded once at
        // construction; the wallet and transfer sets are read per report.
        let loaded;
        let driving: &[Record] = match report_type.driving_source() {
            DrivingSource::CustomerMaster => &self.ctx.customers,
            DrivingSource::WorkbookSheet(ALLOCATION_SHEET) => &self.allocations,
            DrivingSource::WorkbookSheet(sheet) => {
                loaded = read_sheet(&self.master_path(ALLOCATION_WORKBOOK), sheet);
                &loaded
            }
            DrivingSource::WalletCsv => {
                loaded = read_delimited(&self.master_path(WALLET_EXPORT), b'|');
                &loaded
            }
        };
        if driving.is_empty() {
            warn!(
                "Driving record set for {:?} is empty; writing header-only report",
                report_type
            );
        }

        let resolver = Resolver::new(report_type, &self.ctx, &self.overrides, &self.allocations);
        let rows = resolver.resolve(&fields, driving);

        let out_path = derive_output_path(
            &self.config.output_dir,
            template_file_name,
            &params.dbd_no,
            &params.asset_id,
            &params.yyyymmdd,
        );
        write_report(&out_path, &fields, &rows)?;

        info!("Generated {}", out_path.display());
        Ok(out_path)
    }

    /// Generates the full report set in its fixed order.
    ///
    /// Failures are logged per report and do not stop the run. Returns the
    /// number of reports successfully written.
    pub fn generate_all(&self, params: &RunParams) -> usize {
        let mut generated = 0;
        for report_type in ReportType::ALL {
            match self.generate(report_type.template_name(), params) {
                Ok(_) => generated += 1,
                Err(e) => error!("{:?} failed: {}", report_type, e),
            }
        }
        generated
    }

    fn master_path(&self, file_name: &str) -> PathBuf {
        self.config.master_dir.join(file_name)
    }
}
