//! Batch-level errors
//!
//! These are the only errors a batch run can surface. Everything that goes
//! wrong inside a single document's task stays a per-document
//! `AnalysisOutcome::Failure` and never reaches this level.

use thiserror::Error;

/// Wholesale rejection of a batch before any task is scheduled
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BatchError {
    /// The request carried no documents at all
    #[error("Keine Dokumente übermittelt")]
    EmptyBatch,

    /// The request exceeds the per-batch document limit
    #[error("Zu viele Dokumente: {submitted} übermittelt, Maximum ist {limit}")]
    TooManyDocuments {
        /// Number of documents in the request
        submitted: usize,
        /// Configured per-batch limit
        limit: usize,
    },
}
