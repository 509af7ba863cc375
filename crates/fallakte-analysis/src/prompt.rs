//! Prompt construction for document analysis
//!
//! The prompt is fully deterministic: the same filename and text always
//! produce the same prompt, so completions are reproducible up to the
//! model's own sampling.

const INSTRUCTION: &str = "Du bist ein Analyse-Assistent für die Steuerfahndung. \
Analysiere das folgende Dokument und gib eine strukturierte Antwort.";

const SUMMARY_INSTRUCTION: &str = "Fasse das folgende Dokument in 4-5 prägnanten Sätzen zusammen.\n\
Fokussiere auf: Hauptthema, beteiligte Parteien, wichtige Zahlen und Daten, Kernaussagen.";

const FORMAT_BLOCK: &str = "Antworte exakt im folgenden Format:

KATEGORIE: [E-Mail/Rechnung/Vertrag/Protokoll/Finanzbericht/Sonstiges]
RELEVANZ: [hoch/mittel/niedrig]

ZUSAMMENFASSUNG:
[3-4 Sätze zum Inhalt des Dokuments]

FIRMEN: [Liste der Firmennamen oder \"keine\"]
PERSONEN: [Liste der Personennamen oder \"keine\"]
GELDBETRAEGE: [Liste der Geldbeträge oder \"keine\"]
DATEN: [Liste der Datumsangaben oder \"keine\"]
AUFFAELLIGKEITEN: [Liste ungewöhnlicher oder verdächtiger Aspekte oder \"keine\"]";

/// Builds the analysis prompt for one document
#[derive(Debug, Clone)]
pub struct PromptBuilder<'a> {
    filename: &'a str,
    text: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a builder for a document's filename and (already truncated) text
    pub fn new(filename: &'a str, text: &'a str) -> Self {
        Self { filename, text }
    }

    /// Render the full structured-analysis prompt
    pub fn build(&self) -> String {
        format!(
            "{INSTRUCTION}\n\nDOKUMENT ({filename}):\n{text}\n\n{FORMAT_BLOCK}\n\nAnalyse:",
            filename = self.filename,
            text = self.text,
        )
    }

    /// Render the free-text summary prompt
    pub fn build_summary(&self) -> String {
        format!(
            "{SUMMARY_INSTRUCTION}\n\nDOKUMENT ({filename}):\n{text}\n\nZusammenfassung:",
            filename = self.filename,
            text = self.text,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_document_and_format() {
        let prompt = PromptBuilder::new("rechnung.pdf", "Rechnungstext hier").build();

        assert!(prompt.contains("DOKUMENT (rechnung.pdf):"));
        assert!(prompt.contains("Rechnungstext hier"));
        assert!(prompt.contains("KATEGORIE:"));
        assert!(prompt.contains("AUFFAELLIGKEITEN:"));
        assert!(prompt.ends_with("Analyse:"));
    }

    #[test]
    fn test_summary_prompt_has_no_format_block() {
        let prompt = PromptBuilder::new("vertrag.docx", "Vertragstext").build_summary();

        assert!(prompt.contains("DOKUMENT (vertrag.docx):"));
        assert!(prompt.contains("Vertragstext"));
        assert!(!prompt.contains("KATEGORIE:"));
        assert!(prompt.ends_with("Zusammenfassung:"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = PromptBuilder::new("a.txt", "Inhalt").build();
        let b = PromptBuilder::new("a.txt", "Inhalt").build();
        assert_eq!(a, b);
    }
}
