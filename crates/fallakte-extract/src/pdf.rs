//! PDF text extraction

use fallakte_domain::{ExtractedText, ExtractionError, FormatMetadata};
use tracing::warn;

/// Extract per-page text from a PDF.
///
/// Pages that fail text extraction are skipped with a warning; an entirely
/// unreadable file is `Malformed`. Encrypted or image-only PDFs typically
/// yield empty page text rather than an error.
pub fn extract(content: &[u8]) -> Result<ExtractedText, ExtractionError> {
    let document = lopdf::Document::load_mem(content)
        .map_err(|e| ExtractionError::Malformed(format!("PDF-Fehler: {}", e)))?;

    let pages = document.get_pages();
    let page_count = pages.len();

    let mut sections = Vec::new();
    for (page_number, _) in pages {
        match document.extract_text(&[page_number]) {
            Ok(page_text) => {
                if !page_text.trim().is_empty() {
                    sections.push(format!("--- Seite {} ---\n{}", page_number, page_text));
                }
            }
            Err(e) => {
                warn!(page = page_number, error = %e, "skipping unreadable PDF page");
            }
        }
    }

    Ok(ExtractedText::new(
        sections.join("\n\n"),
        FormatMetadata::Pdf { page_count },
    ))
}
