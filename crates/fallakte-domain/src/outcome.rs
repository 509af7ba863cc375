//! Per-document outcome of a batch run

use crate::analysis::Analysis;
use crate::extracted::TextStats;
use serde::{Deserialize, Serialize};

/// Categorized reason a document's analysis failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// Declared format is not in the accepted set
    UnsupportedFormat {
        /// The rejected format tag
        format: String,
    },

    /// Text extraction failed
    Extraction {
        /// Extractor's reason
        detail: String,
    },

    /// Completion service did not answer within the deadline
    Timeout,

    /// Completion service could not be reached
    Unreachable {
        /// Transport-level detail
        detail: String,
    },

    /// Completion service answered with a non-success status
    Service {
        /// HTTP status code
        status: u16,
    },

    /// Unexpected internal fault (isolated to this document)
    Internal {
        /// Fault description
        detail: String,
    },
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::UnsupportedFormat { format } => {
                write!(f, "Dateityp '{}' nicht unterstützt", format)
            }
            FailureReason::Extraction { detail } => write!(f, "Extraktion fehlgeschlagen: {}", detail),
            FailureReason::Timeout => write!(f, "Timeout - Anfrage dauerte zu lange"),
            FailureReason::Unreachable { detail } => write!(f, "Verbindungsfehler: {}", detail),
            FailureReason::Service { status } => write!(f, "Dienst-Fehler: Status {}", status),
            FailureReason::Internal { detail } => write!(f, "Interner Fehler: {}", detail),
        }
    }
}

/// Outcome of one document's analysis task
///
/// A batch produces exactly one outcome per accepted document, keyed by
/// filename - never by position, since tasks complete in arbitrary order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// The document was extracted, analyzed, and parsed
    Success {
        /// Document identity
        filename: String,
        /// Extraction size statistics
        stats: TextStats,
        /// Structured analysis result
        analysis: Analysis,
        /// Wall-clock seconds the task took
        elapsed_secs: f64,
    },

    /// The task failed; siblings are unaffected
    Failure {
        /// Document identity
        filename: String,
        /// Categorized reason
        reason: FailureReason,
    },
}

impl AnalysisOutcome {
    /// Document identity this outcome belongs to
    pub fn filename(&self) -> &str {
        match self {
            AnalysisOutcome::Success { filename, .. } => filename,
            AnalysisOutcome::Failure { filename, .. } => filename,
        }
    }

    /// Whether this outcome is a success
    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisOutcome::Success { .. })
    }

    /// The analysis, if the task succeeded
    pub fn analysis(&self) -> Option<&Analysis> {
        match self {
            AnalysisOutcome::Success { analysis, .. } => Some(analysis),
            AnalysisOutcome::Failure { .. } => None,
        }
    }
}

/// Outcome of a single-document summarization
///
/// The free-text sibling of [`AnalysisOutcome`]: same extraction and
/// failure paths, but the completion result is prose instead of labeled
/// fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SummaryOutcome {
    /// The document was extracted and summarized
    Success {
        /// Document identity
        filename: String,
        /// Extraction size statistics
        stats: TextStats,
        /// Free-text summary
        summary: String,
        /// Wall-clock seconds the task took
        elapsed_secs: f64,
    },

    /// The summarization failed
    Failure {
        /// Document identity
        filename: String,
        /// Categorized reason
        reason: FailureReason,
    },
}

impl SummaryOutcome {
    /// Document identity this outcome belongs to
    pub fn filename(&self) -> &str {
        match self {
            SummaryOutcome::Success { filename, .. } => filename,
            SummaryOutcome::Failure { filename, .. } => filename,
        }
    }

    /// The summary text, if the task succeeded
    pub fn summary(&self) -> Option<&str> {
        match self {
            SummaryOutcome::Success { summary, .. } => Some(summary),
            SummaryOutcome::Failure { .. } => None,
        }
    }
}
