//! Cross-document entity indexing
//!
//! Builds the inverted entity index over one batch's successful analyses.
//! Matching is exact string equality after normalization; the index never
//! outlives its batch.

use fallakte_domain::{Analysis, AnalysisOutcome, CrossReference, CrossReferenceIndex};
use std::collections::BTreeMap;

/// Normalization applied to entity values before matching
///
/// Case folding is off by default: German proper names ("ABC GmbH" vs
/// "abc gmbh") are kept distinct unless an operator opts in.
#[derive(Debug, Clone, Copy)]
pub struct EntityNormalizer {
    /// Strip surrounding whitespace
    pub trim: bool,
    /// Lowercase before matching
    pub case_fold: bool,
}

impl Default for EntityNormalizer {
    fn default() -> Self {
        Self {
            trim: true,
            case_fold: false,
        }
    }
}

impl EntityNormalizer {
    /// Normalize one entity value
    pub fn normalize(&self, value: &str) -> String {
        let value = if self.trim { value.trim() } else { value };
        if self.case_fold {
            value.to_lowercase()
        } else {
            value.to_string()
        }
    }
}

/// Builds a [`CrossReferenceIndex`] from batch outcomes
#[derive(Debug, Clone, Default)]
pub struct CrossReferenceIndexer {
    normalizer: EntityNormalizer,
}

impl CrossReferenceIndexer {
    /// Create an indexer with an explicit normalizer
    pub fn new(normalizer: EntityNormalizer) -> Self {
        Self { normalizer }
    }

    /// Index the successful analyses of one batch
    ///
    /// Failed outcomes contribute nothing. Only entities referenced by at
    /// least two distinct documents are retained; entries come out sorted
    /// by entity value, with documents in outcome order.
    pub fn index(&self, outcomes: &[AnalysisOutcome]) -> CrossReferenceIndex {
        CrossReferenceIndex {
            organizations: self.collect(outcomes, |a| a.organizations.as_slice()),
            people: self.collect(outcomes, |a| a.people.as_slice()),
            amounts: self.collect(outcomes, |a| a.amounts.as_slice()),
        }
    }

    fn collect(
        &self,
        outcomes: &[AnalysisOutcome],
        field: fn(&Analysis) -> &[String],
    ) -> Vec<CrossReference> {
        let mut entities: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for outcome in outcomes {
            if let AnalysisOutcome::Success {
                filename, analysis, ..
            } = outcome
            {
                for value in field(analysis) {
                    let key = self.normalizer.normalize(value);
                    if key.is_empty() {
                        continue;
                    }
                    let documents = entities.entry(key).or_default();
                    if !documents.contains(filename) {
                        documents.push(filename.clone());
                    }
                }
            }
        }

        entities
            .into_iter()
            .filter(|(_, documents)| documents.len() >= 2)
            .map(|(value, documents)| CrossReference { value, documents })
            .collect()
    }
}
