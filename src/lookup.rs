//! Reference tables and the per-run lookup context.
//!
//! A reference table maps a human-readable name (country, nationality,
//! title, bank, province, business type) to a regulator code. Source data
//! is free text, so lookup is case-insensitive and substring-tolerant:
//! the query matching an entry name, or an entry name matching the query,
//! both count. First match wins.

use crate::reader::read_delimited;
use crate::record::Record;
use log::{debug, warn};
use std::collections::HashMap;
use std::path::Path;

/// A name→code reference table with fuzzy lookup.
#[derive(Debug, Clone, Default)]
pub struct RefTable {
    entries: Vec<(String, String)>,
}

impl RefTable {
    /// Builds a table from static (name, code) pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        RefTable {
            entries: pairs
                .iter()
                .map(|(name, code)| (name.to_string(), code.to_string()))
                .collect(),
        }
    }

    /// Loads a table from a `name|code` pipe-delimited file, falling back
    /// to the given built-in pairs when the file is absent or empty.
    pub fn load(path: &Path, builtin: &[(&str, &str)]) -> Self {
        let records = read_delimited(path, b'|');
        if records.is_empty() {
            return Self::from_pairs(builtin);
        }

        let entries = records
            .iter()
            .filter_map(|record| {
                let name = record.get_or_empty("name");
                let code = record.get_or_empty("code");
                if name.is_empty() {
                    None
                } else {
                    Some((name.to_string(), code.to_string()))
                }
            })
            .collect();

        debug!("Loaded reference table from {}", path.display());
        RefTable { entries }
    }

    /// Resolves a free-text value to its code.
    ///
    /// Matching is case-insensitive; either side containing the other is a
    /// match, so `"thailand kingdom"` still resolves against `"Thailand"`.
    /// Returns `default` on no match or an empty query.
    pub fn lookup<'a>(&'a self, query: &str, default: &'a str) -> &'a str {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return default;
        }

        for (name, code) in &self.entries {
            let name = name.to_lowercase();
            if query == name || query.contains(&name) || name.contains(&query) {
                return code;
            }
        }
        default
    }
}

/// Normalizes an identity/tax-id value for cross-record matching.
pub fn normalize_identity(raw: &str) -> String {
    raw.trim().to_string()
}

/// Everything the resolver consults besides the driving records.
///
/// Built once per run, read-only afterwards. Holding the customer index
/// here removes the per-row linear scans the join would otherwise need.
#[derive(Debug, Default)]
pub struct LookupContext {
    /// Customer master rows in export order.
    pub customers: Vec<Record>,
    /// Normalized identity key → index into `customers`. First occurrence
    /// wins.
    customer_index: HashMap<String, usize>,
    pub countries: RefTable,
    pub nationalities: RefTable,
    pub titles: RefTable,
    pub banks: RefTable,
    pub locations: RefTable,
    pub business_types: RefTable,
}

/// The customer master field carrying the identity/tax-id key.
pub const IDENTITY_FIELD: &str = "card_id";

impl LookupContext {
    /// Builds a context from the customer master and reference tables.
    pub fn new(
        customers: Vec<Record>,
        countries: RefTable,
        nationalities: RefTable,
        titles: RefTable,
        banks: RefTable,
        locations: RefTable,
        business_types: RefTable,
    ) -> Self {
        let mut customer_index = HashMap::new();
        for (i, customer) in customers.iter().enumerate() {
            let key = normalize_identity(customer.get_or_empty(IDENTITY_FIELD));
            if key.is_empty() {
                continue;
            }
            customer_index.entry(key).or_insert(i);
        }

        if customer_index.len() < customers.len() {
            warn!(
                "{} customer rows lack a usable identity key or duplicate one",
                customers.len() - customer_index.len()
            );
        }

        LookupContext {
            customers,
            customer_index,
            countries,
            nationalities,
            titles,
            banks,
            locations,
            business_types,
        }
    }

    /// Builds a context from the master directory: customer export plus
    /// optional file-backed reference tables under `ref/`, defaulting to
    /// the built-in tables.
    pub fn from_master_dir(master_dir: &Path) -> Self {
        let customers = read_delimited(&master_dir.join("ico_customer_export_pipe.csv"), b'|');
        if customers.is_empty() {
            warn!(
                "Customer master export is empty or missing in {}",
                master_dir.display()
            );
        }

        let ref_dir = master_dir.join("ref");
        LookupContext::new(
            customers,
            RefTable::load(&ref_dir.join("countries.csv"), crate::refdata::COUNTRIES),
            RefTable::load(
                &ref_dir.join("nationalities.csv"),
                crate::refdata::NATIONALITIES,
            ),
            RefTable::load(&ref_dir.join("titles.csv"), crate::refdata::TITLES),
            RefTable::load(&ref_dir.join("banks.csv"), crate::refdata::BANKS),
            RefTable::load(&ref_dir.join("locations.csv"), crate::refdata::LOCATIONS),
            RefTable::load(
                &ref_dir.join("business_types.csv"),
                crate::refdata::BUSINESS_TYPES,
            ),
        )
    }

    /// Finds the customer record matching a normalized identity key.
    pub fn customer_by_identity(&self, identity: &str) -> Option<&Record> {
        let key = normalize_identity(identity);
        self.customer_index
            .get(&key)
            .map(|&i| &self.customers[i])
    }
}
