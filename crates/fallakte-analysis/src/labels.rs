//! Field labels and empty-value sentinels for the structured response format
//!
//! Models can render umlauts either natively (GELDBETRÄGE) or in ASCII
//! transliteration (GELDBETRAEGE), so each field carries every spelling
//! that occurs in practice. Matching is case-insensitive on the line
//! prefix.

/// The fields a structured response can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Document category, single value
    Category,
    /// Relevance tier, single value
    Relevance,
    /// Multi-line summary block
    Summary,
    /// Organization names, list
    Organizations,
    /// Person names, list
    People,
    /// Monetary amounts, list
    Amounts,
    /// Dates, list
    Dates,
    /// Anomalies worth an investigator's attention, list
    Anomalies,
}

/// Label variants per field plus the sentinel set marking an empty value
#[derive(Debug, Clone)]
pub struct LabelTable {
    labels: Vec<(Field, &'static str)>,
    sentinels: Vec<&'static str>,
}

impl Default for LabelTable {
    fn default() -> Self {
        Self {
            labels: vec![
                (Field::Category, "KATEGORIE"),
                (Field::Relevance, "RELEVANZ"),
                (Field::Summary, "ZUSAMMENFASSUNG"),
                (Field::Organizations, "FIRMEN"),
                (Field::People, "PERSONEN"),
                (Field::Amounts, "GELDBETRÄGE"),
                (Field::Amounts, "GELDBETRAEGE"),
                (Field::Dates, "DATEN"),
                (Field::Anomalies, "AUFFÄLLIGKEITEN"),
                (Field::Anomalies, "AUFFAELLIGKEITEN"),
            ],
            sentinels: vec!["keine", "keine gefunden", "none", "none found", "-", "[]", "n/a"],
        }
    }
}

impl LabelTable {
    /// Match a response line against the table
    ///
    /// Returns the field and the remainder after the colon when the line
    /// starts with one of the known labels immediately followed by `:`
    /// (case-insensitive). The colon is mandatory; ordinary prose that
    /// merely begins with a label word ("Personen aus dem Umfeld ...")
    /// is not a field line.
    pub fn match_line<'a>(&self, line: &'a str) -> Option<(Field, &'a str)> {
        let upper = line.to_uppercase();
        for (field, label) in &self.labels {
            if upper.starts_with(label) && upper[label.len()..].starts_with(':') {
                // labels contain no colon, so the first colon is the
                // label separator
                let value = line.split_once(':').map(|(_, rest)| rest).unwrap_or("");
                return Some((*field, value.trim()));
            }
        }
        None
    }

    /// Whether a trimmed value means "nothing found"
    pub fn is_sentinel(&self, value: &str) -> bool {
        let lowered = value.trim().to_lowercase();
        lowered.is_empty() || self.sentinels.iter().any(|s| *s == lowered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_canonical_labels() {
        let table = LabelTable::default();
        assert_eq!(
            table.match_line("KATEGORIE: Rechnung"),
            Some((Field::Category, "Rechnung"))
        );
        assert_eq!(
            table.match_line("FIRMEN: ABC GmbH, XYZ AG"),
            Some((Field::Organizations, "ABC GmbH, XYZ AG"))
        );
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let table = LabelTable::default();
        assert_eq!(
            table.match_line("relevanz: hoch"),
            Some((Field::Relevance, "hoch"))
        );
    }

    #[test]
    fn test_umlaut_and_ascii_variants() {
        let table = LabelTable::default();
        assert_eq!(
            table.match_line("GELDBETRÄGE: 50.000 EUR"),
            Some((Field::Amounts, "50.000 EUR"))
        );
        assert_eq!(
            table.match_line("GELDBETRAEGE: 50.000 EUR"),
            Some((Field::Amounts, "50.000 EUR"))
        );
        assert_eq!(
            table.match_line("AUFFAELLIGKEITEN: keine"),
            Some((Field::Anomalies, "keine"))
        );
    }

    #[test]
    fn test_unlabeled_line_does_not_match() {
        let table = LabelTable::default();
        assert_eq!(table.match_line("Der Text handelt von Rechnungen."), None);
    }

    #[test]
    fn test_label_without_colon_does_not_match() {
        let table = LabelTable::default();
        assert_eq!(table.match_line("ZUSAMMENFASSUNG"), None);
    }

    #[test]
    fn test_prose_starting_with_label_word_does_not_match() {
        let table = LabelTable::default();
        assert_eq!(
            table.match_line("Personen aus dem Umfeld der Firma wurden befragt."),
            None
        );
        assert_eq!(table.match_line("Daten zu den Konten liegen vor."), None);
    }

    #[test]
    fn test_sentinels() {
        let table = LabelTable::default();
        for value in ["keine", "Keine", "KEINE GEFUNDEN", "none", "None found", "-", "[]", "N/A", "", "  "] {
            assert!(table.is_sentinel(value), "expected sentinel: {value:?}");
        }
        assert!(!table.is_sentinel("ABC GmbH"));
    }
}
