//! Bulk-extractor dump parsing for forensic evidence
//!
//! Bulk-extractor feature files are line-oriented: comment headers carrying
//! recorder metadata, then `offset<TAB>feature<TAB>context` lines. They are
//! technically plain text but get a dedicated structured path so the
//! analysis prompt sees feature statistics instead of a raw byte soup.

use fallakte_domain::{ExtractedText, ExtractionError, FormatMetadata};
use std::collections::BTreeMap;

/// Sentinel markers distinguishing a bulk-extractor dump from ordinary text
const MARKERS: &[&str] = &["# BULK_EXTRACTOR", "# Feature-Recorder:", "# Filename:", ".E01"];

/// Features rendered in full into the text output
const FEATURE_PREVIEW_LIMIT: usize = 50;

/// Context characters kept per feature
const CONTEXT_LIMIT: usize = 200;

/// One parsed feature line
#[derive(Debug, Clone)]
struct Feature {
    offset: String,
    feature: String,
    context: String,
}

/// Whether a decoded text is bulk-extractor output
pub fn is_forensic_dump(text: &str) -> bool {
    MARKERS.iter().any(|marker| text.contains(marker))
}

/// Parse a bulk-extractor dump into a structured feature listing.
pub fn extract(text: &str) -> Result<ExtractedText, ExtractionError> {
    let mut recorder = String::new();
    let mut source_image = String::new();
    let mut features = Vec::new();
    let mut feature_types: BTreeMap<String, usize> = BTreeMap::new();

    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("# Feature-Recorder:") {
            recorder = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("# Filename:") {
            source_image = rest.trim().to_string();
        } else if line.starts_with('#') {
            continue;
        } else {
            let mut parts = line.split('\t');
            let offset = parts.next().unwrap_or_default();
            let Some(feature) = parts.next() else {
                continue;
            };
            let context = parts.next().unwrap_or_default();

            let ftype = match feature.split_once(':') {
                Some((prefix, _)) => prefix,
                None => "unknown",
            };
            *feature_types.entry(ftype.to_string()).or_insert(0) += 1;

            features.push(Feature {
                offset: offset.to_string(),
                feature: feature.to_string(),
                context: context.chars().take(CONTEXT_LIMIT).collect(),
            });
        }
    }

    if features.is_empty() && recorder.is_empty() && source_image.is_empty() {
        return Err(ExtractionError::Malformed(
            "Bulk-Extractor-Marker erkannt, aber keine Features gefunden".to_string(),
        ));
    }

    // Most frequent feature types first
    let mut type_counts: Vec<(String, usize)> = feature_types.into_iter().collect();
    type_counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let output = render(&features, &type_counts, &recorder, &source_image);
    let feature_count = features.len();

    Ok(ExtractedText::new(
        output,
        FormatMetadata::Forensic {
            recorder,
            source_image,
            feature_count,
            feature_types: type_counts,
        },
    ))
}

fn render(
    features: &[Feature],
    type_counts: &[(String, usize)],
    recorder: &str,
    source_image: &str,
) -> String {
    let mut out = String::new();
    out.push_str("BULK EXTRACTOR ANALYSE\n");
    out.push_str(&"=".repeat(50));
    out.push('\n');
    out.push_str(&format!("Quell-Image: {}\n", source_image));
    out.push_str(&format!("Feature-Recorder: {}\n", recorder));
    out.push_str(&format!("Gefundene Features: {}\n\n", features.len()));

    out.push_str("Feature-Typen:\n");
    for (ftype, count) in type_counts {
        out.push_str(&format!("  - {}: {}\n", ftype, count));
    }

    out.push_str(&format!("\n{}\nEXTRAHIERTE FEATURES:\n{}\n\n", "=".repeat(50), "=".repeat(50)));

    for feature in features.iter().take(FEATURE_PREVIEW_LIMIT) {
        out.push_str(&format!("[{}] {}\n", feature.offset, feature.feature));
        if !feature.context.is_empty() {
            let preview: String = feature.context.chars().take(100).collect();
            out.push_str(&format!("    Kontext: {}...\n", preview));
        }
        out.push('\n');
    }

    if features.len() > FEATURE_PREVIEW_LIMIT {
        out.push_str(&format!(
            "\n... und {} weitere Features\n",
            features.len() - FEATURE_PREVIEW_LIMIT
        ));
    }

    out
}
