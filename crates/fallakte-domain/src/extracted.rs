//! Extracted text and format-specific metadata

use serde::{Deserialize, Serialize};

/// Basic size statistics of an extracted text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    /// Number of characters
    pub char_count: usize,

    /// Number of whitespace-separated words
    pub word_count: usize,

    /// Number of lines
    pub line_count: usize,
}

impl TextStats {
    /// Compute statistics for a text body
    pub fn of(text: &str) -> Self {
        Self {
            char_count: text.chars().count(),
            word_count: text.split_whitespace().count(),
            line_count: text.lines().count(),
        }
    }
}

/// Format-specific metadata attached to an extraction result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormatMetadata {
    /// Plain text file
    Plain {
        /// Encoding that decoded the file
        encoding: String,
    },
    /// Delimited tabular text
    Tabular {
        /// Number of data rows
        row_count: usize,
    },
    /// E-mail message
    Email {
        /// Sender
        from: String,
        /// Recipients
        to: String,
        /// Carbon-copy recipients
        cc: String,
        /// Subject line
        subject: String,
        /// Date header
        date: String,
        /// Attachment filenames (attachments themselves are not analyzed)
        attachments: Vec<String>,
    },
    /// Portable document
    Pdf {
        /// Number of pages
        page_count: usize,
    },
    /// Word-processor document
    Office {
        /// Number of non-empty paragraphs
        paragraph_count: usize,
        /// Number of tables
        table_count: usize,
    },
    /// Forensic bulk-extractor dump
    Forensic {
        /// Feature recorder that produced the dump
        recorder: String,
        /// Source image the features were carved from
        source_image: String,
        /// Total number of feature lines
        feature_count: usize,
        /// Count per feature type
        feature_types: Vec<(String, usize)>,
    },
}

/// Text extracted from one document
///
/// Produced once per document by the extraction layer and read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedText {
    /// The text body
    pub text: String,

    /// Size statistics of the body
    pub stats: TextStats,

    /// Format-specific metadata
    pub metadata: FormatMetadata,
}

impl ExtractedText {
    /// Build an extraction result, computing the statistics from the body
    pub fn new(text: String, metadata: FormatMetadata) -> Self {
        let stats = TextStats::of(&text);
        Self {
            text,
            stats,
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats() {
        let stats = TextStats::of("eine Zeile\nzwei Wörter hier");
        assert_eq!(stats.line_count, 2);
        assert_eq!(stats.word_count, 5);
        assert_eq!(stats.char_count, 27);
    }

    #[test]
    fn test_stats_empty() {
        let stats = TextStats::of("");
        assert_eq!(stats, TextStats::default());
    }

    #[test]
    fn test_extracted_text_computes_stats() {
        let extracted = ExtractedText::new(
            "a b c".to_string(),
            FormatMetadata::Plain {
                encoding: "utf-8".to_string(),
            },
        );
        assert_eq!(extracted.stats.word_count, 3);
    }
}
