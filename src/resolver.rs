//! Core field resolution: one output row per driving record.
//!
//! For each output field, the first matching rule wins:
//!
//! 1. an identity override literal for the driving record's identity,
//! 2. the report type's named rule for that field, from the rule table,
//! 3. direct copy of a same-named field from the driving record or its
//!    matched customer, falling back to the report type's filler.
//!
//! The resolver is stateless per row except for the DTW transaction
//! numbering, whose occurrence counts are scoped to a single `resolve`
//! call.

use crate::datetime;
use crate::lookup::{normalize_identity, LookupContext, RefTable, IDENTITY_FIELD};
use crate::overrides::OverrideSet;
use crate::record::Record;
use crate::report::ReportType;
use log::warn;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

/// Identity field name used by the spreadsheet and wallet exports.
const ALT_IDENTITY_FIELD: &str = "tax_id";

/// Which reference table a lookup rule consults.
#[derive(Debug, Clone, Copy)]
enum TableId {
    Countries,
    Nationalities,
    Titles,
    Banks,
    Locations,
    BusinessTypes,
}

/// A named resolution rule for one (report type, field) pair.
#[derive(Debug, Clone, Copy)]
enum Rule {
    /// Fixed output value.
    Literal(&'static str),
    /// Reference-table lookup of a human-readable source value.
    RefLookup {
        table: TableId,
        source: &'static str,
        default: &'static str,
    },
    /// First 10 characters of a source timestamp.
    DateTruncate { source: &'static str },
    /// `"T"` iff the source value equals `THAI` case-sensitively.
    ThaiFlag { source: &'static str },
    /// ISO date from a day-first source timestamp.
    DayFirstDate { source: &'static str },
    /// Zero-padded time with six fractional digits from a day-first
    /// source timestamp.
    DayFirstTime { source: &'static str },
    /// Sum of matching allocation quantities for the record's identity.
    AllocationSum,
    /// Transaction number with the per-identity occurrence suffix.
    TransactionNo { source: &'static str },
}

/// Ordered rule table for a report type.
///
/// CusOutstanding deliberately registers no `customer_type` rule; the
/// field falls through to direct copy like any other.
fn rules(report_type: ReportType) -> &'static [(&'static str, Rule)] {
    match report_type {
        ReportType::CusData => &[
            (
                "name_title",
                Rule::RefLookup {
                    table: TableId::Titles,
                    source: "name_title",
                    default: "",
                },
            ),
            (
                "country",
                Rule::RefLookup {
                    table: TableId::Countries,
                    source: "country",
                    default: "-",
                },
            ),
            (
                "nationality",
                Rule::RefLookup {
                    table: TableId::Nationalities,
                    source: "nationality",
                    default: "-",
                },
            ),
            ("is_thai_nationality", Rule::ThaiFlag { source: "nationality" }),
            ("opening_account_date", Rule::DateTruncate { source: "created_at" }),
            (
                "province",
                Rule::RefLookup {
                    table: TableId::Locations,
                    source: "province",
                    default: "",
                },
            ),
            (
                "business_type",
                Rule::RefLookup {
                    table: TableId::BusinessTypes,
                    source: "business_type",
                    default: "",
                },
            ),
            (
                "bank_short_name",
                Rule::RefLookup {
                    table: TableId::Banks,
                    source: "bank_name",
                    default: "",
                },
            ),
        ],
        ReportType::CusOutstanding => &[
            ("da_quantity", Rule::AllocationSum),
            (
                "country",
                Rule::RefLookup {
                    table: TableId::Countries,
                    source: "country",
                    default: "-",
                },
            ),
            (
                "nationality",
                Rule::RefLookup {
                    table: TableId::Nationalities,
                    source: "nationality",
                    default: "-",
                },
            ),
            (
                "name_title",
                Rule::RefLookup {
                    table: TableId::Titles,
                    source: "name_title",
                    default: "",
                },
            ),
            (
                "bank_short_name",
                Rule::RefLookup {
                    table: TableId::Banks,
                    source: "bank_name",
                    default: "",
                },
            ),
        ],
        ReportType::CusWallet => &[
            ("da_quantity", Rule::AllocationSum),
            ("opening_account_date", Rule::DateTruncate { source: "created_at" }),
        ],
        ReportType::Identification => &[
            (
                "name_title",
                Rule::RefLookup {
                    table: TableId::Titles,
                    source: "name_title",
                    default: "",
                },
            ),
            (
                "country",
                Rule::RefLookup {
                    table: TableId::Countries,
                    source: "country",
                    default: "-",
                },
            ),
            (
                "nationality",
                Rule::RefLookup {
                    table: TableId::Nationalities,
                    source: "nationality",
                    default: "-",
                },
            ),
            ("is_thai_nationality", Rule::ThaiFlag { source: "nationality" }),
        ],
        ReportType::ProfilePortal => &[
            ("channel", Rule::Literal("ICO_PORTAL")),
            ("opening_account_date", Rule::DateTruncate { source: "created_at" }),
            (
                "country",
                Rule::RefLookup {
                    table: TableId::Countries,
                    source: "country",
                    default: "-",
                },
            ),
        ],
        ReportType::DtwReport => &[
            ("transaction_no", Rule::TransactionNo { source: "transaction_no" }),
            (
                "transaction_date",
                Rule::DayFirstDate { source: "transfer_datetime" },
            ),
            (
                "transaction_time",
                Rule::DayFirstTime { source: "transfer_datetime" },
            ),
            (
                "bank_short_name",
                Rule::RefLookup {
                    table: TableId::Banks,
                    source: "bank_name",
                    default: "",
                },
            ),
        ],
    }
}

/// Resolves driving records into output rows for one report type.
pub struct Resolver<'a> {
    report_type: ReportType,
    ctx: &'a LookupContext,
    overrides: &'a OverrideSet,
    /// Allocation sheet rows, consulted by the `da_quantity` rule.
    allocations: &'a [Record],
}

impl<'a> Resolver<'a> {
    pub fn new(
        report_type: ReportType,
        ctx: &'a LookupContext,
        overrides: &'a OverrideSet,
        allocations: &'a [Record],
    ) -> Self {
        Resolver {
            report_type,
            ctx,
            overrides,
            allocations,
        }
    }

    /// Produces one output row per driving record, each row exactly
    /// `fields.len()` values, in driving-set order.
    pub fn resolve(&self, fields: &[String], driving: &[Record]) -> Vec<Vec<String>> {
        // Occurrence totals for the transaction-number suffix are decided
        // once, over the whole driving set, before any row is emitted.
        let mut totals: HashMap<String, usize> = HashMap::new();
        if self.report_type == ReportType::DtwReport {
            for record in driving {
                let identity = normalize_identity(identity_of(record));
                // Rows without an identity key are unrelated transfers,
                // not repeat occurrences; they stay unsuffixed.
                if identity.is_empty() {
                    continue;
                }
                *totals.entry(identity).or_insert(0) += 1;
            }
        }

        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut rows = Vec::with_capacity(driving.len());

        for record in driving {
            let identity = normalize_identity(identity_of(record));

            let suffix = match totals.get(&identity) {
                Some(&total) if total > 1 => {
                    let occurrence = seen.entry(identity.clone()).or_insert(0);
                    *occurrence += 1;
                    Some(format!("-{:02}", occurrence))
                }
                _ => None,
            };

            let customer = self.matched_customer(&identity);
            let row = fields
                .iter()
                .map(|field| self.resolve_field(field, record, customer, &identity, suffix.as_deref()))
                .collect();
            rows.push(row);
        }

        rows
    }

    /// The customer record joined to a driving record, when the driving set
    /// is not the customer master itself.
    fn matched_customer(&self, identity: &str) -> Option<&'a Record> {
        if self.report_type.driving_source() == crate::report::DrivingSource::CustomerMaster {
            // The driving record is the customer; nothing to join.
            return None;
        }
        let customer = self.ctx.customer_by_identity(identity);
        if customer.is_none() && !identity.is_empty() {
            warn!(
                "No customer match for identity {} in {:?}",
                identity, self.report_type
            );
        }
        customer
    }

    /// Applies the resolution chain for one field of one driving record.
    fn resolve_field(
        &self,
        field: &str,
        record: &Record,
        customer: Option<&Record>,
        identity: &str,
        suffix: Option<&str>,
    ) -> String {
        if let Some(literal) = self.overrides.get(identity, field) {
            return literal.to_string();
        }

        if let Some((_, rule)) = rules(self.report_type)
            .iter()
            .find(|(name, _)| *name == field)
        {
            return self.apply_rule(*rule, record, customer, identity, suffix);
        }

        self.direct_copy(field, record, customer)
    }

    fn apply_rule(
        &self,
        rule: Rule,
        record: &Record,
        customer: Option<&Record>,
        identity: &str,
        suffix: Option<&str>,
    ) -> String {
        match rule {
            Rule::Literal(value) => value.to_string(),
            Rule::RefLookup {
                table,
                source,
                default,
            } => {
                let value = source_value(record, customer, source);
                self.table(table).lookup(value, default).to_string()
            }
            Rule::DateTruncate { source } => {
                datetime::truncate_to_date(source_value(record, customer, source)).to_string()
            }
            Rule::ThaiFlag { source } => {
                if source_value(record, customer, source) == "THAI" {
                    "T".to_string()
                } else {
                    "F".to_string()
                }
            }
            Rule::DayFirstDate { source } => {
                let value = source_value(record, customer, source);
                datetime::day_first_to_iso_date(value).unwrap_or_else(|| {
                    malformed_date(value, self.report_type);
                    String::new()
                })
            }
            Rule::DayFirstTime { source } => {
                let value = source_value(record, customer, source);
                datetime::day_first_to_time(value).unwrap_or_else(|| {
                    malformed_date(value, self.report_type);
                    String::new()
                })
            }
            Rule::AllocationSum => self.allocation_sum(identity),
            Rule::TransactionNo { source } => {
                let base = source_value(record, customer, source);
                match suffix {
                    Some(suffix) => format!("{}{}", base, suffix),
                    None => base.to_string(),
                }
            }
        }
    }

    /// Sums the allocation quantities recorded for an identity.
    ///
    /// No matching allocation yields `"0"`; unparseable quantities are
    /// skipped with a warning.
    fn allocation_sum(&self, identity: &str) -> String {
        let mut sum = Decimal::ZERO;
        let mut matched = false;

        for allocation in self.allocations {
            if normalize_identity(identity_of(allocation)) != identity || identity.is_empty() {
                continue;
            }
            matched = true;
            let quantity = allocation.get_or_empty("quantity");
            match Decimal::from_str(quantity.trim()) {
                Ok(value) => sum += value,
                Err(_) => warn!(
                    "Unparseable allocation quantity '{}' for identity {}",
                    quantity, identity
                ),
            }
        }

        if matched {
            sum.to_string()
        } else {
            "0".to_string()
        }
    }

    fn direct_copy(&self, field: &str, record: &Record, customer: Option<&Record>) -> String {
        let value = source_value(record, customer, field);
        if value.is_empty() {
            self.report_type.default_filler().to_string()
        } else {
            value.to_string()
        }
    }

    fn table(&self, id: TableId) -> &RefTable {
        match id {
            TableId::Countries => &self.ctx.countries,
            TableId::Nationalities => &self.ctx.nationalities,
            TableId::Titles => &self.ctx.titles,
            TableId::Banks => &self.ctx.banks,
            TableId::Locations => &self.ctx.locations,
            TableId::BusinessTypes => &self.ctx.business_types,
        }
    }
}

/// The identity key of a record, whichever source it came from.
fn identity_of(record: &Record) -> &str {
    let primary = record.get_or_empty(IDENTITY_FIELD);
    if !primary.is_empty() {
        return primary;
    }
    record.get_or_empty(ALT_IDENTITY_FIELD)
}

/// Reads a source field from the driving record first, then from the
/// matched customer. Empty values count as missing.
fn source_value<'a>(record: &'a Record, customer: Option<&'a Record>, field: &str) -> &'a str {
    let own = record.get_or_empty(field);
    if !own.is_empty() {
        return own;
    }
    customer.map(|c| c.get_or_empty(field)).unwrap_or("")
}

fn malformed_date(value: &str, report_type: ReportType) {
    if !value.is_empty() {
        warn!("Malformed timestamp '{}' in {:?}", value, report_type);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::RefTable;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn customer(card_id: &str, pairs: &[(&str, &str)]) -> Record {
        let mut record = Record::new();
        record.push(IDENTITY_FIELD, card_id);
        for (name, value) in pairs {
            record.push(*name, *value);
        }
        record
    }

    fn sheet_row(tax_id: &str, pairs: &[(&str, &str)]) -> Record {
        let mut record = Record::new();
        record.push(ALT_IDENTITY_FIELD, tax_id);
        for (name, value) in pairs {
            record.push(*name, *value);
        }
        record
    }

    fn test_context(customers: Vec<Record>) -> LookupContext {
        LookupContext::new(
            customers,
            RefTable::from_pairs(&[("Thailand", "0102100218")]),
            RefTable::from_pairs(&[("Thai", "TH")]),
            RefTable::from_pairs(&[("Mr", "003")]),
            RefTable::from_pairs(&[("Bangkok Bank", "BBL")]),
            RefTable::from_pairs(&[("Bangkok", "10")]),
            RefTable::from_pairs(&[("Financial and Insurance", "K01")]),
        )
    }

    #[test]
    fn test_direct_copy_from_driving_record() {
        let ctx = test_context(vec![]);
        let overrides = OverrideSet::default();
        let resolver = Resolver::new(ReportType::CusData, &ctx, &overrides, &[]);

        let driving = vec![customer("1103700012345", &[("first_name", "Somchai")])];
        let rows = resolver.resolve(&fields(&["card_id", "first_name"]), &driving);

        assert_eq!(rows, vec![vec!["1103700012345".to_string(), "Somchai".to_string()]]);
    }

    #[test]
    fn test_arity_matches_field_count() {
        let ctx = test_context(vec![]);
        let overrides = OverrideSet::default();
        let resolver = Resolver::new(ReportType::CusData, &ctx, &overrides, &[]);

        let driving = vec![customer("1103700012345", &[])];
        let rows = resolver.resolve(&fields(&["a", "b", "c", "d", "e"]), &driving);

        assert_eq!(rows[0].len(), 5);
    }

    #[test]
    fn test_missing_field_defaults_to_filler() {
        let ctx = test_context(vec![]);
        let overrides = OverrideSet::default();

        let resolver = Resolver::new(ReportType::CusData, &ctx, &overrides, &[]);
        let rows = resolver.resolve(&fields(&["no_such_field"]), &[customer("1", &[])]);
        assert_eq!(rows[0][0], "");

        let resolver = Resolver::new(ReportType::CusWallet, &ctx, &overrides, &[]);
        let rows = resolver.resolve(&fields(&["no_such_field"]), &[sheet_row("1", &[])]);
        assert_eq!(rows[0][0], "-");
    }

    #[test]
    fn test_country_lookup_is_fuzzy() {
        let ctx = test_context(vec![]);
        let overrides = OverrideSet::default();
        let resolver = Resolver::new(ReportType::CusData, &ctx, &overrides, &[]);

        let driving = vec![
            customer("1", &[("country", "THAILAND")]),
            customer("2", &[("country", "thailand kingdom")]),
            customer("3", &[("country", "Atlantis")]),
        ];
        let rows = resolver.resolve(&fields(&["country"]), &driving);

        assert_eq!(rows[0][0], "0102100218");
        assert_eq!(rows[1][0], "0102100218");
        assert_eq!(rows[2][0], "-");
    }

    #[test]
    fn test_thai_flag_is_case_sensitive() {
        let ctx = test_context(vec![]);
        let overrides = OverrideSet::default();
        let resolver = Resolver::new(ReportType::CusData, &ctx, &overrides, &[]);

        let driving = vec![
            customer("1", &[("nationality", "THAI")]),
            customer("2", &[("nationality", "Thai")]),
            customer("3", &[("nationality", "AMERICAN")]),
        ];
        let rows = resolver.resolve(&fields(&["is_thai_nationality"]), &driving);

        assert_eq!(rows[0][0], "T");
        assert_eq!(rows[1][0], "F");
        assert_eq!(rows[2][0], "F");
    }

    #[test]
    fn test_opening_account_date_truncates() {
        let ctx = test_context(vec![]);
        let overrides = OverrideSet::default();
        let resolver = Resolver::new(ReportType::CusData, &ctx, &overrides, &[]);

        let driving = vec![customer("1", &[("created_at", "2025-02-23T10:00:00Z")])];
        let rows = resolver.resolve(&fields(&["opening_account_date"]), &driving);

        assert_eq!(rows[0][0], "2025-02-23");
    }

    #[test]
    fn test_identity_override_beats_every_rule() {
        // Reference tables would resolve country differently; the override
        // literal must win regardless.
        let ctx = test_context(vec![]);
        let overrides = OverrideSet::builtin();
        let resolver = Resolver::new(ReportType::CusData, &ctx, &overrides, &[]);

        let driving = vec![customer(
            "0105556123456",
            &[("country", "Atlantis"), ("nationality", "MARTIAN")],
        )];
        let rows = resolver.resolve(
            &fields(&["country", "nationality", "is_thai_nationality", "first_name"]),
            &driving,
        );

        assert_eq!(rows[0][0], "0102100218");
        assert_eq!(rows[0][1], "TH");
        assert_eq!(rows[0][2], "T");
        assert_eq!(rows[0][3], "SIAM DIGITAL HOLDINGS");
    }

    #[test]
    fn test_cross_record_join_pulls_customer_fields() {
        let ctx = test_context(vec![customer(
            "1103700012345",
            &[("first_name", "Somchai"), ("country", "Thailand")],
        )]);
        let overrides = OverrideSet::default();
        let resolver = Resolver::new(ReportType::CusOutstanding, &ctx, &overrides, &[]);

        let driving = vec![sheet_row("1103700012345", &[("quantity", "5")])];
        let rows = resolver.resolve(&fields(&["first_name", "country"]), &driving);

        assert_eq!(rows[0][0], "Somchai");
        assert_eq!(rows[0][1], "0102100218");
    }

    #[test]
    fn test_unmatched_join_falls_back_to_filler() {
        let ctx = test_context(vec![]);
        let overrides = OverrideSet::default();
        let resolver = Resolver::new(ReportType::CusOutstanding, &ctx, &overrides, &[]);

        let driving = vec![sheet_row("9999999999999", &[])];
        let rows = resolver.resolve(&fields(&["first_name"]), &driving);

        assert_eq!(rows[0][0], "-");
    }

    #[test]
    fn test_customer_type_falls_through_on_outstanding() {
        // customer_type has no named rule; it resolves by direct copy
        // only.
        let ctx = test_context(vec![customer(
            "1103700012345",
            &[("customer_type", "I")],
        )]);
        let overrides = OverrideSet::default();
        let resolver = Resolver::new(ReportType::CusOutstanding, &ctx, &overrides, &[]);

        let driving = vec![
            sheet_row("1103700012345", &[]),
            sheet_row("9999999999999", &[]),
        ];
        let rows = resolver.resolve(&fields(&["customer_type"]), &driving);

        assert_eq!(rows[0][0], "I");
        assert_eq!(rows[1][0], "-");
    }

    #[test]
    fn test_allocation_sum_by_identity() {
        let ctx = test_context(vec![]);
        let overrides = OverrideSet::default();
        let allocations = vec![
            sheet_row("1103700012345", &[("quantity", "2.5")]),
            sheet_row("1103700012345", &[("quantity", "1.5")]),
            sheet_row("2222222222222", &[("quantity", "9")]),
        ];
        let resolver =
            Resolver::new(ReportType::CusOutstanding, &ctx, &overrides, &allocations);

        let driving = vec![
            sheet_row("1103700012345", &[]),
            sheet_row("3333333333333", &[]),
        ];
        let rows = resolver.resolve(&fields(&["da_quantity"]), &driving);

        assert_eq!(rows[0][0], "4.0");
        assert_eq!(rows[1][0], "0");
    }

    #[test]
    fn test_transaction_number_suffixing() {
        let ctx = test_context(vec![]);
        let overrides = OverrideSet::default();
        let resolver = Resolver::new(ReportType::DtwReport, &ctx, &overrides, &[]);

        // Identities [A, A, B]: A gets -01 and -02 in traversal order,
        // B stays unsuffixed.
        let driving = vec![
            sheet_row("A", &[("transaction_no", "TXN100")]),
            sheet_row("A", &[("transaction_no", "TXN101")]),
            sheet_row("B", &[("transaction_no", "TXN200")]),
        ];
        let rows = resolver.resolve(&fields(&["transaction_no"]), &driving);

        assert_eq!(rows[0][0], "TXN100-01");
        assert_eq!(rows[1][0], "TXN101-02");
        assert_eq!(rows[2][0], "TXN200");
    }

    #[test]
    fn test_transaction_number_no_suffix_without_identity() {
        let ctx = test_context(vec![]);
        let overrides = OverrideSet::default();
        let resolver = Resolver::new(ReportType::DtwReport, &ctx, &overrides, &[]);

        // Two rows with no identity key are unrelated transfers, not two
        // occurrences of one identity.
        let driving = vec![
            sheet_row("", &[("transaction_no", "TXN300")]),
            sheet_row("", &[("transaction_no", "TXN301")]),
            sheet_row("A", &[("transaction_no", "TXN400")]),
        ];
        let rows = resolver.resolve(&fields(&["transaction_no"]), &driving);

        assert_eq!(rows[0][0], "TXN300");
        assert_eq!(rows[1][0], "TXN301");
        assert_eq!(rows[2][0], "TXN400");
    }

    #[test]
    fn test_transfer_datetime_split() {
        let ctx = test_context(vec![]);
        let overrides = OverrideSet::default();
        let resolver = Resolver::new(ReportType::DtwReport, &ctx, &overrides, &[]);

        let driving = vec![
            sheet_row("A", &[("transfer_datetime", "23/02/2025 09:05:09")]),
            sheet_row("B", &[("transfer_datetime", "24-02-2025 18:30:00")]),
            sheet_row("C", &[("transfer_datetime", "garbage")]),
        ];
        let rows = resolver.resolve(
            &fields(&["transaction_date", "transaction_time"]),
            &driving,
        );

        assert_eq!(rows[0], vec!["2025-02-23", "09:05:09.000000"]);
        assert_eq!(rows[1], vec!["2025-02-24", "18:30:00.000000"]);
        assert_eq!(rows[2], vec!["", ""]);
    }

    #[test]
    fn test_profile_portal_literal_channel() {
        let ctx = test_context(vec![]);
        let overrides = OverrideSet::default();
        let resolver = Resolver::new(ReportType::ProfilePortal, &ctx, &overrides, &[]);

        let rows = resolver.resolve(&fields(&["channel"]), &[customer("1", &[])]);
        assert_eq!(rows[0][0], "ICO_PORTAL");
    }
}
