//! Lenient parser for labeled-field completion responses
//!
//! The response source is a language model, so the input is best-effort
//! text rather than a grammar. The parser therefore never fails: lines it
//! does not recognize are skipped, missing fields keep their defaults, and
//! empty-value sentinels collapse to empty lists.

use crate::labels::{Field, LabelTable};
use fallakte_domain::{Analysis, DocumentCategory, RelevanceTier};

/// Parse a raw completion response into a structured [`Analysis`]
///
/// Total over all inputs. A response with no recognizable labels yields
/// `Analysis::default()` (category Sonstiges, relevance mittel, all lists
/// empty).
pub fn parse_analysis(response: &str, labels: &LabelTable) -> Analysis {
    let mut analysis = Analysis::default();
    let mut summary_lines: Vec<String> = Vec::new();
    let mut in_summary = false;

    for raw_line in response.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        match labels.match_line(line) {
            Some((field, value)) => {
                in_summary = false;
                match field {
                    Field::Category => analysis.category = DocumentCategory::parse(value),
                    Field::Relevance => analysis.relevance = RelevanceTier::parse(value),
                    Field::Summary => {
                        in_summary = true;
                        if !labels.is_sentinel(value) {
                            summary_lines.push(value.to_string());
                        }
                    }
                    Field::Organizations => {
                        analysis.organizations = parse_list(value, labels);
                    }
                    Field::People => analysis.people = parse_list(value, labels),
                    Field::Amounts => analysis.amounts = parse_list(value, labels),
                    Field::Dates => analysis.dates = parse_list(value, labels),
                    Field::Anomalies => analysis.anomalies = parse_list(value, labels),
                }
            }
            None if in_summary => summary_lines.push(line.to_string()),
            None => {}
        }
    }

    analysis.summary = summary_lines.join(" ");
    analysis
}

/// Split a list-valued field into cleaned items
///
/// Strips surrounding brackets and per-item quotes, splits on commas, and
/// drops empty or sentinel items.
fn parse_list(value: &str, labels: &LabelTable) -> Vec<String> {
    if labels.is_sentinel(value) {
        return Vec::new();
    }

    value
        .trim_matches(|c| c == '[' || c == ']')
        .split(',')
        .map(|item| item.trim().trim_matches(|c| c == '"' || c == '\'').trim())
        .filter(|item| !labels.is_sentinel(item))
        .map(str::to_string)
        .collect()
}

/// Render an [`Analysis`] back into the labeled-field format
///
/// The inverse of [`parse_analysis`] for well-formed values: parsing the
/// rendered text reproduces the analysis as long as no list item contains
/// a comma.
pub fn render_analysis(analysis: &Analysis) -> String {
    let mut out = String::new();

    out.push_str(&format!("KATEGORIE: {}\n", analysis.category.as_str()));
    out.push_str(&format!("RELEVANZ: {}\n\n", analysis.relevance.as_str()));
    out.push_str("ZUSAMMENFASSUNG:\n");
    if !analysis.summary.is_empty() {
        out.push_str(&analysis.summary);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&format!("FIRMEN: {}\n", render_list(&analysis.organizations)));
    out.push_str(&format!("PERSONEN: {}\n", render_list(&analysis.people)));
    out.push_str(&format!("GELDBETRAEGE: {}\n", render_list(&analysis.amounts)));
    out.push_str(&format!("DATEN: {}\n", render_list(&analysis.dates)));
    out.push_str(&format!("AUFFAELLIGKEITEN: {}\n", render_list(&analysis.anomalies)));

    out
}

fn render_list(items: &[String]) -> String {
    if items.is_empty() {
        "keine".to_string()
    } else {
        items.join(", ")
    }
}
