//! Relevance tier - per-document priority classification

use serde::{Deserialize, Serialize};

/// Three-valued priority a document receives in its analysis
///
/// Documents with an unrecognized or missing tier count as `Medium`
/// everywhere downstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelevanceTier {
    /// High priority for the investigation
    #[serde(rename = "hoch")]
    High,

    /// Default priority
    #[default]
    #[serde(rename = "mittel")]
    Medium,

    /// Low priority
    #[serde(rename = "niedrig")]
    Low,
}

impl RelevanceTier {
    /// Get the German tier name used on the wire and in prompts
    pub fn as_str(&self) -> &'static str {
        match self {
            RelevanceTier::High => "hoch",
            RelevanceTier::Medium => "mittel",
            RelevanceTier::Low => "niedrig",
        }
    }

    /// Lenient parse of a completion-service answer; unrecognized values
    /// resolve to `Medium`.
    pub fn parse(value: &str) -> Self {
        let normalized = value
            .trim()
            .trim_matches(|c| c == '[' || c == ']' || c == '"' || c == '\'')
            .to_lowercase();
        match normalized.as_str() {
            "hoch" | "high" => RelevanceTier::High,
            "niedrig" | "low" => RelevanceTier::Low,
            _ => RelevanceTier::Medium,
        }
    }

    /// Report ordering: high before medium before low
    pub fn rank(&self) -> u8 {
        match self {
            RelevanceTier::High => 0,
            RelevanceTier::Medium => 1,
            RelevanceTier::Low => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(RelevanceTier::parse("hoch"), RelevanceTier::High);
        assert_eq!(RelevanceTier::parse("HOCH"), RelevanceTier::High);
        assert_eq!(RelevanceTier::parse("[niedrig]"), RelevanceTier::Low);
        assert_eq!(RelevanceTier::parse("low"), RelevanceTier::Low);
    }

    #[test]
    fn test_unknown_defaults_to_medium() {
        assert_eq!(RelevanceTier::parse("dringend"), RelevanceTier::Medium);
        assert_eq!(RelevanceTier::parse(""), RelevanceTier::Medium);
    }

    #[test]
    fn test_rank_ordering() {
        assert!(RelevanceTier::High.rank() < RelevanceTier::Medium.rank());
        assert!(RelevanceTier::Medium.rank() < RelevanceTier::Low.rank());
    }
}
