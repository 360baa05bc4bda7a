//! Report types of the ICO Portal DA set.

/// Workbook sheet driving the CusOutstanding report.
pub const ALLOCATION_SHEET: &str = "Allocation";
/// Workbook sheet driving the DTW report.
pub const TRANSFER_SHEET: &str = "Transfer";

/// The regulator report family generated by this tool.
///
/// Each variant selects a template, a driving record set, and a field
/// resolution chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportType {
    /// Customer master data report, driven by the customer export.
    CusData,
    /// Outstanding holdings report, driven by the allocation sheet.
    CusOutstanding,
    /// Wallet report, driven by the wallet export.
    CusWallet,
    /// Customer identification report, driven by the customer export.
    Identification,
    /// Portal profile report, driven by the customer export.
    ProfilePortal,
    /// Digital token withdrawal/transfer report, driven by the transfer
    /// sheet; carries the per-identity transaction numbering rule.
    DtwReport,
}

/// Which input collection drives a report: one output row per driving
/// record, in driving-set order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrivingSource {
    /// The customer master export itself.
    CustomerMaster,
    /// A named sheet of the allocation workbook.
    WorkbookSheet(&'static str),
    /// The pipe-delimited wallet export.
    WalletCsv,
}

impl ReportType {
    /// Every report type, in the order the default run generates them.
    pub const ALL: [ReportType; 6] = [
        ReportType::CusData,
        ReportType::CusOutstanding,
        ReportType::CusWallet,
        ReportType::Identification,
        ReportType::ProfilePortal,
        ReportType::DtwReport,
    ];

    /// The template file name, placeholders included.
    pub fn template_name(self) -> &'static str {
        match self {
            ReportType::CusData => "ICOPortal_DA_CusData_{dbdNo}_{assetId}_{yyyymmdd}.csv",
            ReportType::CusOutstanding => {
                "ICOPortal_DA_CusOutstanding_{dbdNo}_{assetId}_{yyyymmdd}.csv"
            }
            ReportType::CusWallet => "ICOPortal_DA_CusWallet_{dbdNo}_{assetId}_{yyyymmdd}.csv",
            ReportType::Identification => {
                "ICOPortal_DA_Identification_{dbdNo}_{assetId}_{yyyymmdd}.csv"
            }
            ReportType::ProfilePortal => {
                "ICOPortal_DA_ProfilePortal_{dbdNo}_{assetId}_{yyyymmdd}.csv"
            }
            ReportType::DtwReport => "ICOPortal_DA_DTWReport_{dbdNo}_{assetId}_{yyyymmdd}.csv",
        }
    }

    /// Resolves a template file name back to its report type.
    pub fn from_template_name(name: &str) -> Option<Self> {
        ReportType::ALL
            .into_iter()
            .find(|report_type| report_type.template_name() == name)
    }

    /// The collection that drives row emission for this report.
    pub fn driving_source(self) -> DrivingSource {
        match self {
            ReportType::CusData | ReportType::Identification | ReportType::ProfilePortal => {
                DrivingSource::CustomerMaster
            }
            ReportType::CusOutstanding => DrivingSource::WorkbookSheet(ALLOCATION_SHEET),
            ReportType::CusWallet => DrivingSource::WalletCsv,
            ReportType::DtwReport => DrivingSource::WorkbookSheet(TRANSFER_SHEET),
        }
    }

    /// The filler emitted when no rule and no source field applies.
    pub fn default_filler(self) -> &'static str {
        match self {
            ReportType::CusOutstanding | ReportType::CusWallet => "-",
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_round_trip() {
        for report_type in ReportType::ALL {
            assert_eq!(
                ReportType::from_template_name(report_type.template_name()),
                Some(report_type)
            );
        }
    }

    #[test]
    fn test_unknown_template_name() {
        assert_eq!(
            ReportType::from_template_name("ICOPortal_DA_Unknown_{dbdNo}.csv"),
            None
        );
    }

    #[test]
    fn test_driving_sources() {
        assert_eq!(
            ReportType::CusData.driving_source(),
            DrivingSource::CustomerMaster
        );
        assert_eq!(
            ReportType::CusOutstanding.driving_source(),
            DrivingSource::WorkbookSheet(ALLOCATION_SHEET)
        );
        assert_eq!(ReportType::CusWallet.driving_source(), DrivingSource::WalletCsv);
        assert_eq!(
            ReportType::DtwReport.driving_source(),
            DrivingSource::WorkbookSheet(TRANSFER_SHEET)
        );
    }

    #[test]
    fn test_default_fillers() {
        assert_eq!(ReportType::CusData.default_filler(), "");
        assert_eq!(ReportType::CusOutstanding.default_filler(), "-");
        assert_eq!(ReportType::CusWallet.default_filler(), "-");
        assert_eq!(ReportType::DtwReport.default_filler(), "");
    }
}
