use serde::Deserialize;
use std::collections::BTreeSet;

/// One record from `GET /documents`. Only the quarter matters here; the rest
/// of the listing is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentRecord {
    #[serde(default)]
    pub quarter: Option<String>,
}

/// Known quarter identifiers, deduplicated and sorted ascending. With the
/// `YYYY_Qn` format lexicographic order is chronological order.
///
/// Fetched once at startup and read-only afterwards. An empty catalog is a
/// degraded mode (free-text quarter entry), never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuarterCatalog {
    quarters: Vec<String>,
}

impl QuarterCatalog {
    pub fn from_documents(docs: &[DocumentRecord]) -> Self {
        let set: BTreeSet<String> = docs
            .iter()
            .filter_map(|d| d.quarter.clone())
            .filter(|q| !q.is_empty())
            .collect();
        Self {
            quarters: set.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.quarters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.quarters.len()
    }

    pub fn contains(&self, quarter: &str) -> bool {
        self.quarters.iter().any(|q| q == quarter)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.quarters.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(quarter: &str) -> DocumentRecord {
        DocumentRecord {
            quarter: Some(quarter.to_string()),
        }
    }

    #[test]
    fn catalog_deduplicates_and_sorts_ascending() {
        let docs = vec![record("2025_Q2"), record("2025_Q1"), record("2025_Q2")];
        let catalog = QuarterCatalog::from_documents(&docs);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.iter().collect::<Vec<_>>(), ["2025_Q1", "2025_Q2"]);
    }

    #[test]
    fn records_without_quarter_are_skipped() {
        let docs = vec![
            DocumentRecord { quarter: None },
            record(""),
            record("2024_Q4"),
        ];
        let catalog = QuarterCatalog::from_documents(&docs);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("2024_Q4"));
        assert!(!catalog.contains("2025_Q1"));
    }

    #[test]
    fn empty_listing_yields_empty_catalog() {
        let catalog = QuarterCatalog::from_documents(&[]);
        assert!(catalog.is_empty());
    }
}
