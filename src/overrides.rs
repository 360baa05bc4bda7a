//! Per-identity literal overrides.
//!
//! A small number of legal entities have regulator-agreed report values
//! that bypass every other resolution rule. These are data, not logic:
//! the built-in set covers the two known juristic persons, and a versioned
//! `identity_overrides.json` in the master directory replaces the built-ins
//! wholesale when present, so the dataset can change without a rebuild.

use crate::error::{ReportError, Result};
use crate::lookup::normalize_identity;
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// One override entry: an identity key and its field literals.
#[derive(Debug, Clone, Deserialize)]
pub struct OverrideEntry {
    /// Normalized identity / tax-id key.
    pub identity: String,
    /// Field name → literal output value.
    pub fields: HashMap<String, String>,
}

/// The override dataset file layout.
#[derive(Debug, Deserialize)]
struct OverrideFile {
    /// Dataset version, for operator bookkeeping; not interpreted.
    #[allow(dead_code)]
    version: u32,
    entries: Vec<OverrideEntry>,
}

/// The loaded override dataset, keyed by normalized identity.
#[derive(Debug, Clone, Default)]
pub struct OverrideSet {
    entries: HashMap<String, HashMap<String, String>>,
}

impl OverrideSet {
    /// The built-in dataset: the two special-cased legal entities.
    pub fn builtin() -> Self {
        let mut entries = HashMap::new();

        entries.insert(
            "0105556123456".to_string(),
            literal_fields(&[
                ("name_title", "903"),
                ("first_name", "SIAM DIGITAL HOLDINGS"),
                ("last_name", ""),
                ("customer_type", "J"),
                ("country", "0102100218"),
                ("nationality", "TH"),
                ("is_thai_nationality", "T"),
                ("business_type", "K01"),
                ("province", "10"),
            ]),
        );

        entries.insert(
            "0107536000315".to_string(),
            literal_fields(&[
                ("name_title", "902"),
                ("first_name", "ORIENTAL ASSET MANAGEMENT"),
                ("last_name", ""),
                ("customer_type", "J"),
                ("country", "0102100218"),
                ("nationality", "TH"),
                ("is_thai_nationality", "T"),
                ("business_type", "K01"),
                ("province", "10"),
            ]),
        );

        OverrideSet { entries }
    }

    /// Loads the dataset from a JSON file, replacing the built-ins.
    ///
    /// A missing file yields the built-in set. A present but malformed file
    /// is a hard error so a bad deploy cannot silently drop the overrides.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::builtin());
        }

        let content = std::fs::read_to_string(path)?;
        let file: OverrideFile =
            serde_json::from_str(&content).map_err(|e| ReportError::InvalidOverrides {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        debug!(
            "Loaded {} identity overrides from {}",
            file.entries.len(),
            path.display()
        );

        let entries = file
            .entries
            .into_iter()
            .map(|entry| (normalize_identity(&entry.identity), entry.fields))
            .collect();
        Ok(OverrideSet { entries })
    }

    /// Returns the literal for (identity, field), if one exists.
    pub fn get(&self, identity: &str, field: &str) -> Option<&str> {
        self.entries
            .get(&normalize_identity(identity))
            .and_then(|fields| fields.get(field))
            .map(String::as_str)
    }

    /// Returns `true` if the identity has any overrides at all.
    pub fn has_identity(&self, identity: &str) -> bool {
        self.entries.contains_key(&normalize_identity(identity))
    }
}

fn literal_fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_entities_present() {
        let set = OverrideSet::builtin();
        assert!(set.has_identity("0105556123456"));
        assert!(set.has_identity("0107536000315"));
        assert_eq!(set.get("0105556123456", "customer_type"), Some("J"));
        assert_eq!(set.get("0107536000315", "name_title"), Some("902"));
    }

    #[test]
    fn test_identity_normalized_before_lookup() {
        let set = OverrideSet::builtin();
        assert_eq!(set.get("  0105556123456  ", "country"), Some("0102100218"));
    }

    #[test]
    fn test_unknown_identity_or_field_is_none() {
        let set = OverrideSet::builtin();
        assert_eq!(set.get("1103700012345", "country"), None);
        assert_eq!(set.get("0105556123456", "no_such_field"), None);
    }

    #[test]
    fn test_missing_file_falls_back_to_builtin() {
        let set = OverrideSet::load(Path::new("no_such_overrides.json")).unwrap();
        assert!(set.has_identity("0105556123456"));
    }

    #[test]
    fn test_file_replaces_builtin_wholesale() {
        let mut temp = NamedTempFile::new().unwrap();
        write!(
            temp,
            r#"{{"version": 2, "entries": [
                {{"identity": "0999999999999", "fields": {{"country": "X"}}}}
            ]}}"#
        )
        .unwrap();

        let set = OverrideSet::load(temp.path()).unwrap();
        assert_eq!(set.get("0999999999999", "country"), Some("X"));
        assert!(!set.has_identity("0105556123456"));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut temp = NamedTempFile::new().unwrap();
        write!(temp, "not json").unwrap();

        assert!(OverrideSet::load(temp.path()).is_err());
    }
}
