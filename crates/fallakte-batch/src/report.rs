//! Human-readable batch synthesis
//!
//! Renders the investigator-facing German report. The rendering is
//! deterministic: sections are sorted by tier, filename, or entity value,
//! never by task-completion order.

use fallakte_domain::{AnalysisOutcome, CrossReference, CrossReferenceIndex, RelevanceTier};

/// Renders a [`CrossReferenceIndex`] and batch outcomes into a report
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    /// Character cap for summary previews
    pub summary_cap: usize,
    /// Maximum cross-reference entries listed per category
    pub crossref_cap: usize,
    /// Maximum anomalies listed per document
    pub anomaly_cap: usize,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self {
            summary_cap: 200,
            crossref_cap: 10,
            anomaly_cap: 5,
        }
    }
}

impl ReportBuilder {
    /// Render the report for one batch
    pub fn build(&self, outcomes: &[AnalysisOutcome], index: &CrossReferenceIndex) -> String {
        let processed = outcomes.iter().filter(|o| o.is_success()).count();
        let failed = outcomes.len() - processed;

        let mut report = String::new();
        report.push_str("ERMITTLUNGSBERICHT\n");
        report.push_str("==================\n\n");
        report.push_str(&format!(
            "Dokumente: {} übermittelt, {} verarbeitet, {} fehlgeschlagen\n\n",
            outcomes.len(),
            processed,
            failed
        ));

        if processed == 0 {
            report.push_str("Keine Dokumente erfolgreich verarbeitet.\n");
            self.push_failures(&mut report, outcomes);
            return report;
        }

        self.push_relevance_counts(&mut report, outcomes);
        self.push_high_relevance(&mut report, outcomes);
        self.push_cross_references(&mut report, index);
        self.push_anomalies(&mut report, outcomes);
        self.push_failures(&mut report, outcomes);

        report
    }

    fn push_relevance_counts(&self, report: &mut String, outcomes: &[AnalysisOutcome]) {
        let mut counts = [0usize; 3];
        for outcome in outcomes {
            if let Some(analysis) = outcome.analysis() {
                counts[analysis.relevance.rank() as usize] += 1;
            }
        }

        report.push_str("RELEVANZ\n--------\n");
        for (tier, count) in [RelevanceTier::High, RelevanceTier::Medium, RelevanceTier::Low]
            .iter()
            .zip(counts)
        {
            report.push_str(&format!("{}: {}\n", tier.as_str(), count));
        }
        report.push('\n');
    }

    fn push_high_relevance(&self, report: &mut String, outcomes: &[AnalysisOutcome]) {
        let mut high: Vec<_> = outcomes
            .iter()
            .filter_map(|o| match o {
                AnalysisOutcome::Success {
                    filename, analysis, ..
                } if analysis.relevance == RelevanceTier::High => Some((filename, analysis)),
                _ => None,
            })
            .collect();

        if high.is_empty() {
            return;
        }
        high.sort_by_key(|(filename, _)| filename.as_str());

        report.push_str("DOKUMENTE MIT HOHER RELEVANZ\n----------------------------\n");
        for (filename, analysis) in high {
            report.push_str(&format!("- {} [{}]\n", filename, analysis.category.as_str()));
            if !analysis.summary.is_empty() {
                report.push_str(&format!("  {}\n", clip(&analysis.summary, self.summary_cap)));
            }
        }
        report.push('\n');
    }

    fn push_cross_references(&self, report: &mut String, index: &CrossReferenceIndex) {
        if index.is_empty() {
            return;
        }

        report.push_str("QUERVERWEISE\n------------\n");
        self.push_crossref_category(report, "Firmen", &index.organizations);
        self.push_crossref_category(report, "Personen", &index.people);
        self.push_crossref_category(report, "Geldbeträge", &index.amounts);
        report.push('\n');
    }

    fn push_crossref_category(&self, report: &mut String, title: &str, entries: &[CrossReference]) {
        if entries.is_empty() {
            return;
        }
        report.push_str(&format!("{}:\n", title));
        for entry in entries.iter().take(self.crossref_cap) {
            report.push_str(&format!(
                "- {} ({})\n",
                entry.value,
                entry.documents.join(", ")
            ));
        }
    }

    fn push_anomalies(&self, report: &mut String, outcomes: &[AnalysisOutcome]) {
        let mut flagged: Vec<_> = outcomes
            .iter()
            .filter_map(|o| match o {
                AnalysisOutcome::Success {
                    filename, analysis, ..
                } if !analysis.anomalies.is_empty() => Some((filename, analysis)),
                _ => None,
            })
            .collect();

        if flagged.is_empty() {
            return;
        }
        flagged.sort_by_key(|(filename, _)| filename.as_str());

        report.push_str("AUFFÄLLIGKEITEN\n---------------\n");
        for (filename, analysis) in flagged {
            report.push_str(&format!("- {}:\n", filename));
            for anomaly in analysis.anomalies.iter().take(self.anomaly_cap) {
                report.push_str(&format!("  * {}\n", anomaly));
            }
        }
        report.push('\n');
    }

    fn push_failures(&self, report: &mut String, outcomes: &[AnalysisOutcome]) {
        let mut failures: Vec<_> = outcomes
            .iter()
            .filter_map(|o| match o {
                AnalysisOutcome::Failure { filename, reason } => Some((filename, reason)),
                _ => None,
            })
            .collect();

        if failures.is_empty() {
            return;
        }
        failures.sort_by_key(|(filename, _)| filename.as_str());

        report.push_str("FEHLGESCHLAGENE DOKUMENTE\n-------------------------\n");
        for (filename, reason) in failures {
            report.push_str(&format!("- {}: {}\n", filename, reason));
        }
    }
}

/// Clip a text to `cap` characters, char-boundary safe
fn clip(text: &str, cap: usize) -> String {
    if text.chars().count() <= cap {
        text.to_string()
    } else {
        let clipped: String = text.chars().take(cap).collect();
        format!("{clipped}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fallakte_domain::{Analysis, DocumentCategory, FailureReason};

    fn success(filename: &str, relevance: RelevanceTier, anomalies: &[&str]) -> AnalysisOutcome {
        AnalysisOutcome::Success {
            filename: filename.to_string(),
            stats: Default::default(),
            analysis: Analysis {
                category: DocumentCategory::Invoice,
                relevance,
                summary: "Eine Rechnung mit Auffälligkeiten.".to_string(),
                anomalies: anomalies.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            },
            elapsed_secs: 0.1,
        }
    }

    #[test]
    fn test_all_failed_batch() {
        let outcomes = vec![AnalysisOutcome::Failure {
            filename: "kaputt.pdf".to_string(),
            reason: FailureReason::Timeout,
        }];
        let report = ReportBuilder::default().build(&outcomes, &CrossReferenceIndex::default());

        assert!(report.contains("Keine Dokumente erfolgreich verarbeitet."));
        assert!(report.contains("kaputt.pdf"));
        assert!(!report.contains("QUERVERWEISE"));
        assert!(!report.contains("RELEVANZ\n"));
    }

    #[test]
    fn test_relevance_counts() {
        let outcomes = vec![
            success("a.pdf", RelevanceTier::High, &[]),
            success("b.pdf", RelevanceTier::High, &[]),
            success("c.pdf", RelevanceTier::Medium, &[]),
        ];
        let report = ReportBuilder::default().build(&outcomes, &CrossReferenceIndex::default());

        assert!(report.contains("hoch: 2"));
        assert!(report.contains("mittel: 1"));
        assert!(report.contains("niedrig: 0"));
    }

    #[test]
    fn test_high_relevance_sorted_by_filename() {
        let outcomes = vec![
            success("zeta.pdf", RelevanceTier::High, &[]),
            success("alpha.pdf", RelevanceTier::High, &[]),
        ];
        let report = ReportBuilder::default().build(&outcomes, &CrossReferenceIndex::default());

        let alpha = report.find("- alpha.pdf").unwrap();
        let zeta = report.find("- zeta.pdf").unwrap();
        assert!(alpha < zeta);
    }

    #[test]
    fn test_deterministic_regardless_of_outcome_order() {
        let a = success("a.pdf", RelevanceTier::High, &["Auffälligkeit 1"]);
        let b = success("b.pdf", RelevanceTier::Low, &[]);

        let builder = ReportBuilder::default();
        let forward = builder.build(&[a.clone(), b.clone()], &CrossReferenceIndex::default());
        let backward = builder.build(&[b, a], &CrossReferenceIndex::default());
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_anomaly_cap() {
        let anomalies: Vec<String> = (0..8).map(|i| format!("Anomalie {i}")).collect();
        let refs: Vec<&str> = anomalies.iter().map(String::as_str).collect();
        let outcomes = vec![success("a.pdf", RelevanceTier::Medium, &refs)];

        let report = ReportBuilder::default().build(&outcomes, &CrossReferenceIndex::default());
        assert!(report.contains("Anomalie 4"));
        assert!(!report.contains("Anomalie 5"));
    }

    #[test]
    fn test_summary_clipped() {
        let mut outcome = success("a.pdf", RelevanceTier::High, &[]);
        if let AnalysisOutcome::Success { analysis, .. } = &mut outcome {
            analysis.summary = "ä".repeat(300);
        }
        let report = ReportBuilder::default().build(&[outcome], &CrossReferenceIndex::default());

        let preview_line = report
            .lines()
            .find(|l| l.trim_start().starts_with('ä'))
            .unwrap();
        assert!(preview_line.trim().chars().count() <= 203);
        assert!(preview_line.ends_with("..."));
    }

    #[test]
    fn test_cross_reference_section() {
        let index = CrossReferenceIndex {
            organizations: vec![CrossReference {
                value: "ABC GmbH".to_string(),
                documents: vec!["a.pdf".to_string(), "b.txt".to_string()],
            }],
            ..Default::default()
        };
        let outcomes = vec![success("a.pdf", RelevanceTier::Medium, &[])];
        let report = ReportBuilder::default().build(&outcomes, &index);

        assert!(report.contains("QUERVERWEISE"));
        assert!(report.contains("- ABC GmbH (a.pdf, b.txt)"));
        assert!(!report.contains("Personen:"));
    }
}
