//! Plain-text extraction with encoding fallback

use crate::forensic;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use fallakte_domain::{ExtractedText, ExtractionError, FormatMetadata};

/// Fixed, ordered encoding fallback list. Windows-1252 is a superset of
/// Latin-1 for printable bytes and covers the cp1252 files German offices
/// produce.
const ENCODINGS: &[(&str, &'static Encoding)] = &[("utf-8", UTF_8), ("windows-1252", WINDOWS_1252)];

/// Extract text from a plain-text file.
///
/// Files carrying bulk-extractor sentinel headers are routed to the
/// forensic parser instead of the generic path.
pub fn extract(content: &[u8]) -> Result<ExtractedText, ExtractionError> {
    let (text, encoding) = decode(content)?;

    if forensic::is_forensic_dump(&text) {
        return forensic::extract(&text);
    }

    Ok(ExtractedText::new(
        text,
        FormatMetadata::Plain {
            encoding: encoding.to_string(),
        },
    ))
}

/// Decode bytes against the fallback list; the first encoding that decodes
/// without replacement errors wins.
pub(crate) fn decode(content: &[u8]) -> Result<(String, &'static str), ExtractionError> {
    for (name, encoding) in ENCODINGS {
        let (text, _, had_errors) = encoding.decode(content);
        if !had_errors {
            return Ok((text.into_owned(), name));
        }
    }
    Err(ExtractionError::UnreadableEncoding)
}
