//! Document category classification

use serde::{Deserialize, Serialize};

/// Fixed category set for analyzed documents
///
/// The completion service answers with the German category names; anything
/// it invents beyond this set resolves to [`DocumentCategory::Other`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentCategory {
    /// E-Mail
    #[serde(rename = "E-Mail")]
    Email,

    /// Rechnung
    #[serde(rename = "Rechnung")]
    Invoice,

    /// Vertrag
    #[serde(rename = "Vertrag")]
    Contract,

    /// Protokoll
    #[serde(rename = "Protokoll")]
    Minutes,

    /// Finanzbericht
    #[serde(rename = "Finanzbericht")]
    FinancialReport,

    /// Sonstiges - the fallback for unrecognized answers
    #[default]
    #[serde(rename = "Sonstiges")]
    Other,
}

impl DocumentCategory {
    /// Get the German category name used on the wire and in prompts
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentCategory::Email => "E-Mail",
            DocumentCategory::Invoice => "Rechnung",
            DocumentCategory::Contract => "Vertrag",
            DocumentCategory::Minutes => "Protokoll",
            DocumentCategory::FinancialReport => "Finanzbericht",
            DocumentCategory::Other => "Sonstiges",
        }
    }

    /// Lenient parse of a completion-service answer. Never fails: anything
    /// unrecognized is `Other`.
    pub fn parse(value: &str) -> Self {
        let normalized = value
            .trim()
            .trim_matches(|c| c == '[' || c == ']' || c == '"' || c == '\'')
            .to_lowercase();
        match normalized.as_str() {
            "e-mail" | "email" | "mail" => DocumentCategory::Email,
            "rechnung" | "invoice" => DocumentCategory::Invoice,
            "vertrag" | "contract" => DocumentCategory::Contract,
            "protokoll" | "minutes" => DocumentCategory::Minutes,
            "finanzbericht" | "financial report" => DocumentCategory::FinancialReport,
            _ => DocumentCategory::Other,
        }
    }
}
