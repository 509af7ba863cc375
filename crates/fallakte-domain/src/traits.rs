//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and its two
//! external collaborators: per-format text extraction and the
//! text-completion service. Infrastructure implementations live in
//! `fallakte-extract` and `fallakte-llm`.

use crate::document::Document;
use crate::extracted::ExtractedText;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors the extraction boundary can report
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    /// Declared format is outside the accepted set
    #[error("Dateityp '{0}' nicht unterstützt")]
    UnsupportedFormat(String),

    /// No encoding in the fallback list decoded the file
    #[error("Konnte Datei-Encoding nicht erkennen")]
    UnreadableEncoding,

    /// Format-specific failure (corrupt container, parse error)
    #[error("{0}")]
    Malformed(String),
}

/// Errors the completion-service boundary can report
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompletionError {
    /// The service did not answer within the request timeout
    #[error("Timeout - Anfrage dauerte zu lange")]
    Timeout,

    /// The service could not be reached at all
    #[error("Verbindungsfehler: {0}")]
    Unreachable(String),

    /// The service answered with a non-success status
    #[error("Dienst-Fehler: Status {code}")]
    Status {
        /// HTTP status code
        code: u16,
        /// Response body, if readable
        message: String,
    },

    /// The response body could not be decoded
    #[error("Ungültige Antwort: {0}")]
    InvalidResponse(String),
}

/// A completed text generation
#[derive(Debug, Clone)]
pub struct Completion {
    /// Generated text
    pub text: String,

    /// Wall-clock time the service call took
    pub elapsed: Duration,
}

/// Per-document text extraction capability, polymorphic over format
///
/// Extraction is a deterministic, CPU-bound transform over in-memory bytes;
/// callers run it on a blocking thread.
pub trait TextExtractor: Send + Sync {
    /// Extract text and format metadata from a document's raw bytes
    fn extract(&self, document: &Document) -> Result<ExtractedText, ExtractionError>;
}

/// Text-completion service capability (prompt in, free text out)
///
/// A single attempt per invocation; the pipeline imposes no retry policy.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Generate a completion for a prompt, bounded to `max_tokens`
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<Completion, CompletionError>;

    /// Whether the backing service currently answers; in-process
    /// implementations are always healthy
    async fn healthy(&self) -> bool {
        true
    }
}
