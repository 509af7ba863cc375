//! Fallakte Extraction Layer
//!
//! Format-specific text extraction behind the [`TextExtractor`] boundary.
//!
//! # Supported formats
//!
//! - Plain text with encoding fallback (UTF-8, then Windows-1252)
//! - Delimited tabular text with delimiter sniffing
//! - RFC 822 e-mail (headers + plain-text body)
//! - PDF (per-page text with page markers)
//! - DOCX/DOC (paragraphs and tables from the ZIP/XML container)
//! - Forensic bulk-extractor dumps, recognized by sentinel headers inside
//!   plain-text files and parsed on a dedicated path
//!
//! All extraction operates on in-memory bytes; nothing touches the disk.

#![warn(missing_docs)]

pub mod email;
pub mod forensic;
pub mod office;
pub mod pdf;
pub mod plain;
pub mod tabular;

use fallakte_domain::{Document, DocumentFormat, ExtractedText, ExtractionError, TextExtractor};
use tracing::debug;

/// Dispatching [`TextExtractor`] over the accepted format set
///
/// Stateless; one instance serves the whole process.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatExtractor;

impl FormatExtractor {
    /// Create the extractor
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for FormatExtractor {
    fn extract(&self, document: &Document) -> Result<ExtractedText, ExtractionError> {
        let format = document
            .resolved_format()
            .ok_or_else(|| ExtractionError::UnsupportedFormat(document.format.clone()))?;

        debug!(
            filename = %document.filename,
            format = format.as_str(),
            bytes = document.content.len(),
            "extracting text"
        );

        match format {
            DocumentFormat::Txt => plain::extract(&document.content),
            DocumentFormat::Csv => tabular::extract(&document.content),
            DocumentFormat::Eml | DocumentFormat::Msg => email::extract(&document.content),
            DocumentFormat::Pdf => pdf::extract(&document.content),
            DocumentFormat::Docx | DocumentFormat::Doc => office::extract(&document.content),
        }
    }
}
