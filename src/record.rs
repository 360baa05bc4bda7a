//! Row model shared by every input source.
//!
//! A [`Record`] is one row of input data: an ordered list of
//! (field name, value) pairs. Order is preserved exactly as read so that
//! writing a record back out reproduces the source row. Field names are not
//! unique across sources; every resolution step names the record it reads
//! from.

/// One row of input data (a customer, an allocation entry, a wallet entry,
/// a transfer entry).
///
/// Lookups are linear over the row's pairs. Rows carry tens of fields at
/// most, and the identity join that would otherwise dominate is done through
/// a precomputed index, never through per-row scans of the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Record { fields: Vec::new() }
    }

    /// Builds a record by zipping header names against row values.
    ///
    /// Missing trailing values default to the empty string; extra trailing
    /// values beyond the header width are dropped.
    pub fn from_row(headers: &[String], values: &[String]) -> Self {
        let fields = headers
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let value = values.get(i).cloned().unwrap_or_default();
                (name.clone(), value)
            })
            .collect();
        Record { fields }
    }

    /// Appends a field, keeping insertion order.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Returns the value of the first field with the given name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the value of the first field with the given name, or `""`.
    pub fn get_or_empty(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// Returns `true` if every value in the record is empty.
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|(_, v)| v.is_empty())
    }

    /// Field names in read order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Values in read order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_row_zips_positionally() {
        let record = Record::from_row(
            &headers(&["id", "name", "country"]),
            &["123".to_string(), "Somchai".to_string(), "Thailand".to_string()],
        );

        assert_eq!(record.get("id"), Some("123"));
        assert_eq!(record.get("name"), Some("Somchai"));
        assert_eq!(record.get("country"), Some("Thailand"));
    }

    #[test]
    fn test_missing_trailing_fields_default_to_empty() {
        let record = Record::from_row(
            &headers(&["id", "name", "country"]),
            &["123".to_string()],
        );

        assert_eq!(record.get("name"), Some(""));
        assert_eq!(record.get("country"), Some(""));
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_get_unknown_field_is_none() {
        let record = Record::from_row(&headers(&["id"]), &["1".to_string()]);
        assert_eq!(record.get("missing"), None);
        assert_eq!(record.get_or_empty("missing"), "");
    }

    #[test]
    fn test_duplicate_names_first_wins() {
        let mut record = Record::new();
        record.push("id", "first");
        record.push("id", "second");
        assert_eq!(record.get("id"), Some("first"));
    }

    #[test]
    fn test_order_preserved() {
        let record = Record::from_row(
            &headers(&["b", "a", "c"]),
            &["2".to_string(), "1".to_string(), "3".to_string()],
        );
        let names: Vec<_> = record.names().collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        let values: Vec<_> = record.values().collect();
        assert_eq!(values, vec!["2", "1", "3"]);
    }

    #[test]
    fn test_is_blank() {
        let record = Record::from_row(&headers(&["a", "b"]), &[]);
        assert!(record.is_blank());

        let record = Record::from_row(&headers(&["a", "b"]), &["x".to_string()]);
        assert!(!record.is_blank());
    }
}
