//! Documents submitted for analysis and the accepted format set

use serde::{Deserialize, Serialize};

/// File formats the extraction layer accepts
///
/// The declared tag on a [`Document`] is resolved into one of these during
/// batch validation; anything else is rejected before a task is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// Portable document format
    Pdf,
    /// Word 2007+ (ZIP/XML container)
    Docx,
    /// Legacy Word (accepted tag; extraction requires the modern container)
    Doc,
    /// Plain text, including forensic bulk-extractor dumps
    Txt,
    /// Delimited tabular text
    Csv,
    /// RFC 822 e-mail
    Eml,
    /// Outlook message (parsed through the e-mail path)
    Msg,
}

impl DocumentFormat {
    /// Resolve a declared format tag (file extension, with or without a
    /// leading dot, any case). Returns `None` for anything outside the
    /// accepted set.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "doc" => Some(DocumentFormat::Doc),
            "txt" => Some(DocumentFormat::Txt),
            "csv" => Some(DocumentFormat::Csv),
            "eml" => Some(DocumentFormat::Eml),
            "msg" => Some(DocumentFormat::Msg),
            _ => None,
        }
    }

    /// Get the format tag as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Doc => "doc",
            DocumentFormat::Txt => "txt",
            DocumentFormat::Csv => "csv",
            DocumentFormat::Eml => "eml",
            DocumentFormat::Msg => "msg",
        }
    }

    /// All accepted format tags, for error messages and the health endpoint
    pub fn accepted_tags() -> &'static [&'static str] {
        &["pdf", "docx", "doc", "txt", "csv", "eml", "msg"]
    }
}

impl std::str::FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unsupported format: {}", s))
    }
}

/// One evidence file submitted in a batch
///
/// Immutable once submitted. The content bytes are owned exclusively by the
/// document's analysis task and are dropped after text extraction; nothing
/// is written to disk (privacy invariant).
#[derive(Debug, Clone)]
pub struct Document {
    /// Original filename, the document's identity within the batch
    pub filename: String,

    /// Raw file content
    pub content: Vec<u8>,

    /// Declared format tag (usually the file extension); resolved into a
    /// [`DocumentFormat`] during validation
    pub format: String,
}

impl Document {
    /// Create a document with an explicit format tag
    pub fn new(filename: impl Into<String>, content: Vec<u8>, format: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content,
            format: format.into(),
        }
    }

    /// Create a document, deriving the format tag from the filename extension
    pub fn from_filename(filename: impl Into<String>, content: Vec<u8>) -> Self {
        let filename = filename.into();
        let format = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        Self {
            filename,
            content,
            format,
        }
    }

    /// Resolve the declared format tag against the accepted set
    pub fn resolved_format(&self) -> Option<DocumentFormat> {
        DocumentFormat::parse(&self.format)
    }
}
