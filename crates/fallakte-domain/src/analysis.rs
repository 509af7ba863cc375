//! Structured result of one document's analysis pass

use crate::category::DocumentCategory;
use crate::relevance::RelevanceTier;
use serde::{Deserialize, Serialize};

/// Structured result of one document's completion-service pass
///
/// Every list field defaults to empty, never absent; the category always
/// resolves to a valid member of the fixed set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Document category (falls back to `Sonstiges`)
    #[serde(default)]
    pub category: DocumentCategory,

    /// Relevance tier (defaults to `mittel`)
    #[serde(default)]
    pub relevance: RelevanceTier,

    /// Free-text summary
    #[serde(default)]
    pub summary: String,

    /// Organizations mentioned in the document
    #[serde(default)]
    pub organizations: Vec<String>,

    /// Persons mentioned in the document
    #[serde(default)]
    pub people: Vec<String>,

    /// Monetary amounts mentioned in the document
    #[serde(default)]
    pub amounts: Vec<String>,

    /// Dates mentioned in the document
    #[serde(default)]
    pub dates: Vec<String>,

    /// Free-text anomaly findings
    #[serde(default)]
    pub anomalies: Vec<String>,
}

impl Analysis {
    /// Whether any entity list carries at least one value
    pub fn has_entities(&self) -> bool {
        !self.organizations.is_empty()
            || !self.people.is_empty()
            || !self.amounts.is_empty()
            || !self.dates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let analysis = Analysis::default();
        assert_eq!(analysis.category, DocumentCategory::Other);
        assert_eq!(analysis.relevance, RelevanceTier::Medium);
        assert!(analysis.summary.is_empty());
        assert!(!analysis.has_entities());
    }

    #[test]
    fn test_deserialize_missing_lists() {
        // Lists omitted on the wire still deserialize to empty
        let json = r#"{"category": "Rechnung", "relevance": "hoch"}"#;
        let analysis: Analysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.category, DocumentCategory::Invoice);
        assert_eq!(analysis.relevance, RelevanceTier::High);
        assert!(analysis.organizations.is_empty());
        assert!(analysis.anomalies.is_empty());
    }
}
