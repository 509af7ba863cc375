//! Batch-level aggregate results

use crate::outcome::AnalysisOutcome;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entity value shared by two or more documents in a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReference {
    /// The entity value (exact string after normalization)
    pub value: String,

    /// Filenames of the documents mentioning the entity, in task-completion
    /// order
    pub documents: Vec<String>,
}

/// Inverted entity index over the successful analyses of one batch
///
/// Only entities referenced by at least two distinct documents are
/// retained. Rebuilt fresh per batch, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReferenceIndex {
    /// Organizations shared across documents
    pub organizations: Vec<CrossReference>,

    /// Persons shared across documents
    pub people: Vec<CrossReference>,

    /// Monetary amounts shared across documents
    pub amounts: Vec<CrossReference>,
}

impl CrossReferenceIndex {
    /// Whether the index holds no entries at all
    pub fn is_empty(&self) -> bool {
        self.organizations.is_empty() && self.people.is_empty() && self.amounts.is_empty()
    }
}

/// Everything one batch request returns
///
/// Created once per request, returned, then discarded - the pipeline keeps
/// no cross-request state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// Time-ordered batch identifier
    pub batch_id: Uuid,

    /// Number of documents submitted
    pub total_submitted: usize,

    /// Number of documents analyzed successfully
    pub processed: usize,

    /// Number of documents that failed
    pub failed: usize,

    /// One outcome per accepted document
    pub outcomes: Vec<AnalysisOutcome>,

    /// Entities shared by at least two documents
    pub cross_references: CrossReferenceIndex,

    /// Rendered human-readable synthesis
    pub report: String,

    /// Total wall-clock seconds for the batch
    pub elapsed_secs: f64,
}

impl BatchResult {
    /// Assemble a batch result from collected outcomes
    pub fn new(
        outcomes: Vec<AnalysisOutcome>,
        cross_references: CrossReferenceIndex,
        report: String,
        elapsed_secs: f64,
    ) -> Self {
        let processed = outcomes.iter().filter(|o| o.is_success()).count();
        let failed = outcomes.len() - processed;
        Self {
            batch_id: Uuid::now_v7(),
            total_submitted: outcomes.len(),
            processed,
            failed,
            outcomes,
            cross_references,
            report,
            elapsed_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::FailureReason;

    #[test]
    fn test_batch_result_counts() {
        let outcomes = vec![
            AnalysisOutcome::Success {
                filename: "a.txt".to_string(),
                stats: Default::default(),
                analysis: Default::default(),
                elapsed_secs: 0.1,
            },
            AnalysisOutcome::Failure {
                filename: "b.txt".to_string(),
                reason: FailureReason::Timeout,
            },
        ];
        let result = BatchResult::new(outcomes, CrossReferenceIndex::default(), String::new(), 0.2);
        assert_eq!(result.total_submitted, 2);
        assert_eq!(result.processed, 1);
        assert_eq!(result.failed, 1);
    }

    #[test]
    fn test_empty_index() {
        assert!(CrossReferenceIndex::default().is_empty());
    }
}
