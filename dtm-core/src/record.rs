//! Tax records and the name → rate lookup.
//!
//! The tax dataset is a JSON array of objects with at least `name` (string)
//! and `tax` (number). Extra fields are ignored. Values are taken as-is:
//! there is no range checking and no normalization of names.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::Result;

/// Shown in popups for districts that have no tax record.
pub const RATE_NOT_AVAILABLE: &str = "N/A";

/// One district's tax rate. Immutable after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRecord {
    /// District identifier, the join key against the geographic dataset
    pub name: String,
    pub tax: f64,
}

impl TaxRecord {
    pub fn new(name: impl Into<String>, tax: f64) -> Self {
        Self {
            name: name.into(),
            tax,
        }
    }

    /// The rate as shown on bar labels and popups, e.g. `$5.50`.
    pub fn rate_label(&self) -> String {
        format_currency(self.tax)
    }
}

/// Format a rate with a dollar prefix and two decimals.
pub fn format_currency(value: f64) -> String {
    format!("${:.2}", value)
}

/// Parse the tax dataset and return its records sorted ascending by rate.
pub fn parse_tax_records(json: &str) -> Result<Vec<TaxRecord>> {
    let mut records: Vec<TaxRecord> = serde_json::from_str(json)?;
    sort_by_rate(&mut records);
    log::info!("[DTM] record: Parsed {} tax records", records.len());
    Ok(records)
}

/// Sort ascending by `tax`. Stable, so equal rates keep their input order.
pub fn sort_by_rate(records: &mut [TaxRecord]) {
    records.sort_by(|a, b| a.tax.partial_cmp(&b.tax).unwrap_or(Ordering::Equal));
}

/// Read-only mapping from district name to tax rate.
///
/// Built once from the sorted records and used to annotate map popups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaxLookup {
    rates: HashMap<String, f64>,
}

impl TaxLookup {
    /// Build the lookup in one pass. A later record with the same name
    /// silently replaces an earlier one.
    pub fn from_records(records: &[TaxRecord]) -> Self {
        let mut rates = HashMap::with_capacity(records.len());
        for record in records {
            rates.insert(record.name.clone(), record.tax);
        }
        Self { rates }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.rates.get(name).copied()
    }

    /// `$x.xx` for a known district, `N/A` otherwise.
    pub fn rate_label(&self, name: &str) -> String {
        match self.get(name) {
            Some(rate) => format_currency(rate),
            None => RATE_NOT_AVAILABLE.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sorts_ascending() {
        let json = r#"[{"name":"A","tax":5.5},{"name":"B","tax":2.75}]"#;
        let records = parse_tax_records(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], TaxRecord::new("B", 2.75));
        assert_eq!(records[1], TaxRecord::new("A", 5.5));
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let json = r#"[
            {"name":"First","tax":4.0},
            {"name":"Low","tax":1.0},
            {"name":"Second","tax":4.0},
            {"name":"Third","tax":4.0}
        ]"#;
        let records = parse_tax_records(json).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Low", "First", "Second", "Third"]);
        assert!(records.windows(2).all(|w| w[0].tax <= w[1].tax));
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let json = r#"[{"name":"Adair","tax":3.1,"county":"Adair","year":2024}]"#;
        let records = parse_tax_records(json).unwrap();
        assert_eq!(records, vec![TaxRecord::new("Adair", 3.1)]);
    }

    #[test]
    fn test_parse_empty_array() {
        let records = parse_tax_records("[]").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_rejects_missing_tax() {
        let err = parse_tax_records(r#"[{"name":"A"}]"#).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse tax dataset"));
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(parse_tax_records(r#"{"name":"A","tax":1}"#).is_err());
        assert!(parse_tax_records("<html>Not Found</html>").is_err());
    }

    #[test]
    fn test_lookup_later_duplicate_wins() {
        let records = vec![TaxRecord::new("A", 1.0), TaxRecord::new("A", 9.0)];
        let lookup = TaxLookup::from_records(&records);
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.get("A"), Some(9.0));
    }

    #[test]
    fn test_lookup_rate_label() {
        let lookup = TaxLookup::from_records(&[TaxRecord::new("B", 2.75)]);
        assert_eq!(lookup.rate_label("B"), "$2.75");
        assert_eq!(lookup.rate_label("C"), "N/A");
        // exact-string join key
        assert_eq!(lookup.rate_label("b"), "N/A");
        assert_eq!(lookup.rate_label(" B"), "N/A");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(5.5), "$5.50");
        assert_eq!(format_currency(3.0), "$3.00");
        assert_eq!(TaxRecord::new("X", 4.256).rate_label(), "$4.26");
    }
}
