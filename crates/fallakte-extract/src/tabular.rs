//! Delimited tabular text extraction

use crate::plain;
use fallakte_domain::{ExtractedText, ExtractionError, FormatMetadata};

/// Candidate delimiters, tried against the first line
const DELIMITERS: &[u8] = &[b';', b',', b'\t', b'|'];

/// Extract a CSV file into one pipe-joined line per row.
///
/// The delimiter is sniffed from the first line: whichever candidate occurs
/// most often wins, semicolon-first on ties (German spreadsheets export
/// semicolon-delimited by default).
pub fn extract(content: &[u8]) -> Result<ExtractedText, ExtractionError> {
    let (decoded, _) = plain::decode(content)?;
    let delimiter = sniff_delimiter(&decoded);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(decoded.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ExtractionError::Malformed(format!("CSV-Fehler: {}", e)))?;
        rows.push(record.iter().collect::<Vec<_>>().join(" | "));
    }

    let row_count = rows.len();
    Ok(ExtractedText::new(
        rows.join("\n"),
        FormatMetadata::Tabular { row_count },
    ))
}

fn sniff_delimiter(text: &str) -> u8 {
    let first_line = text.lines().next().unwrap_or_default();
    // max_by_key keeps the last maximum, so iterate in reverse priority
    DELIMITERS
        .iter()
        .rev()
        .copied()
        .max_by_key(|&d| first_line.bytes().filter(|&b| b == d).count())
        .unwrap_or(b',')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semicolon_sniffing() {
        let csv = "Datum;Betrag;Empfänger\n01.03.2024;5.000,00;ABC GmbH\n";
        let extracted = extract(csv.as_bytes()).unwrap();
        assert_eq!(extracted.text, "Datum | Betrag | Empfänger\n01.03.2024 | 5.000,00 | ABC GmbH");
        assert_eq!(extracted.metadata, FormatMetadata::Tabular { row_count: 2 });
    }

    #[test]
    fn test_comma_delimited() {
        let csv = "a,b,c\n1,2,3\n";
        let extracted = extract(csv.as_bytes()).unwrap();
        assert_eq!(extracted.text, "a | b | c\n1 | 2 | 3");
    }

    #[test]
    fn test_ragged_rows_tolerated() {
        let csv = "a;b;c\n1;2\n";
        let extracted = extract(csv.as_bytes()).unwrap();
        assert_eq!(extracted.metadata, FormatMetadata::Tabular { row_count: 2 });
    }

    #[test]
    fn test_empty_file() {
        let extracted = extract(b"").unwrap();
        assert_eq!(extracted.metadata, FormatMetadata::Tabular { row_count: 0 });
        assert!(extracted.text.is_empty());
    }
}
