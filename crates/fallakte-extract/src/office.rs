//! Word-processor document extraction (DOCX ZIP/XML container)

use fallakte_domain::{ExtractedText, ExtractionError, FormatMetadata};
use std::io::{Cursor, Read};

/// Extract paragraphs and tables from a DOCX container.
///
/// Legacy binary `.doc` files are not ZIP containers and are reported as
/// `Malformed` with a conversion hint.
pub fn extract(content: &[u8]) -> Result<ExtractedText, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(content)).map_err(|_| {
        ExtractionError::Malformed(
            "Kein DOCX-Container (Altes .doc-Format? Bitte als .docx speichern)".to_string(),
        )
    })?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractionError::Malformed(format!("DOCX-Fehler: {}", e)))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Malformed(format!("DOCX-Fehler: {}", e)))?;

    let table_count = xml.matches("<w:tbl>").count() + xml.matches("<w:tbl ").count();

    // Paragraph boundaries, then tag stripping per paragraph
    let paragraphs: Vec<String> = xml
        .split("</w:p>")
        .map(strip_tags)
        .filter(|p| !p.trim().is_empty())
        .collect();

    let paragraph_count = paragraphs.len();
    Ok(ExtractedText::new(
        paragraphs.join("\n\n"),
        FormatMetadata::Office {
            paragraph_count,
            table_count,
        },
    ))
}

/// Drop XML tags, keeping character data. Explicit breaks and tabs become
/// whitespace so runs do not fuse into one token.
fn strip_tags(fragment: &str) -> String {
    let mut out = String::new();
    let mut in_tag = false;
    let mut tag = String::new();

    for c in fragment.chars() {
        match c {
            '<' => {
                in_tag = true;
                tag.clear();
            }
            '>' => {
                in_tag = false;
                if tag.starts_with("w:br") || tag.starts_with("w:tab") {
                    out.push(' ');
                }
            }
            _ if in_tag => tag.push(c),
            _ => out.push(c),
        }
    }

    decode_entities(out.trim())
}

fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn docx_with(document_xml: &str) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            writer
                .start_file("word/document.xml", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_paragraph_extraction() {
        let xml = "<w:document><w:body>\
            <w:p><w:r><w:t>Vertrag zwischen ABC GmbH</w:t></w:r></w:p>\
            <w:p><w:r><w:t>und Max Mustermann</w:t></w:r></w:p>\
            </w:body></w:document>";
        let extracted = extract(&docx_with(xml)).unwrap();
        assert!(extracted.text.contains("Vertrag zwischen ABC GmbH"));
        assert!(extracted.text.contains("und Max Mustermann"));
        match extracted.metadata {
            FormatMetadata::Office {
                paragraph_count, ..
            } => assert_eq!(paragraph_count, 2),
            other => panic!("expected office metadata, got {:?}", other),
        }
    }

    #[test]
    fn test_entity_decoding() {
        let xml = "<w:p><w:t>M&amp;M Consulting</w:t></w:p>";
        let extracted = extract(&docx_with(xml)).unwrap();
        assert!(extracted.text.contains("M&M Consulting"));
    }

    #[test]
    fn test_legacy_doc_is_malformed() {
        // OLE2 magic of a legacy .doc, not a ZIP
        let bytes = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
        let result = extract(&bytes);
        assert!(matches!(result, Err(ExtractionError::Malformed(_))));
    }
}
