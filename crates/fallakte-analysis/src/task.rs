//! The per-document analysis task
//!
//! Runs one document through the fixed pipeline: extract, truncate, build
//! prompt, complete, parse. Failures never escape as errors; every run
//! resolves to an [`AnalysisOutcome`] so the scheduler can aggregate
//! without special cases.
//!
//! Raw document bytes are dropped as soon as extraction finishes; only the
//! extracted text travels further.

use crate::config::AnalysisConfig;
use crate::labels::LabelTable;
use crate::parser::parse_analysis;
use crate::prompt::PromptBuilder;
use crate::truncate::truncate_middle;
use fallakte_domain::{
    AnalysisOutcome, CompletionError, Document, ExtractedText, ExtractionError, FailureReason,
    SummaryOutcome, TextCompletion, TextExtractor,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{info, warn};

/// One document's journey from raw bytes to a structured outcome
///
/// Generic over the two external boundaries so tests can substitute mocks
/// for either side.
pub struct DocumentAnalysisTask<E, C> {
    extractor: Arc<E>,
    completion: Arc<C>,
    config: AnalysisConfig,
    labels: LabelTable,
}

impl<E, C> DocumentAnalysisTask<E, C>
where
    E: TextExtractor + 'static,
    C: TextCompletion,
{
    /// Create a task runner with the default label table
    pub fn new(extractor: Arc<E>, completion: Arc<C>, config: AnalysisConfig) -> Self {
        Self {
            extractor,
            completion,
            config,
            labels: LabelTable::default(),
        }
    }

    /// The active configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the pipeline for one document
    ///
    /// Total: every path ends in an outcome carrying the document's
    /// filename.
    pub async fn run(&self, document: Document) -> AnalysisOutcome {
        let filename = document.filename.clone();
        let start = Instant::now();

        let extracted = match self.extract(document).await {
            Ok(extracted) => extracted,
            Err(reason) => {
                warn!(filename = %filename, reason = %reason, "document failed");
                return AnalysisOutcome::Failure { filename, reason };
            }
        };

        let truncated = truncate_middle(&extracted.text, self.config.max_text_length);
        let prompt = PromptBuilder::new(&filename, &truncated).build();

        let completion = match timeout(
            self.config.completion_timeout(),
            self.completion.complete(&prompt, self.config.max_tokens),
        )
        .await
        {
            Err(_) => {
                warn!(filename = %filename, "completion deadline exceeded");
                return AnalysisOutcome::Failure {
                    filename,
                    reason: FailureReason::Timeout,
                };
            }
            Ok(Err(e)) => {
                warn!(filename = %filename, error = %e, "completion failed");
                return AnalysisOutcome::Failure {
                    filename,
                    reason: completion_failure(e),
                };
            }
            Ok(Ok(completion)) => completion,
        };

        let analysis = parse_analysis(&completion.text, &self.labels);
        let elapsed_secs = start.elapsed().as_secs_f64();

        info!(
            filename = %filename,
            category = analysis.category.as_str(),
            relevance = analysis.relevance.as_str(),
            elapsed_ms = (elapsed_secs * 1000.0) as u64,
            "document analyzed"
        );

        AnalysisOutcome::Success {
            filename,
            stats: extracted.stats,
            analysis,
            elapsed_secs,
        }
    }

    /// Summarize one document into free prose
    ///
    /// Same extraction, truncation, and deadline handling as [`run`], but
    /// with the summary prompt and without response parsing.
    ///
    /// [`run`]: DocumentAnalysisTask::run
    pub async fn summarize(&self, document: Document) -> SummaryOutcome {
        let filename = document.filename.clone();
        let start = Instant::now();

        let extracted = match self.extract(document).await {
            Ok(extracted) => extracted,
            Err(reason) => {
                warn!(filename = %filename, reason = %reason, "document failed");
                return SummaryOutcome::Failure { filename, reason };
            }
        };

        let truncated = truncate_middle(&extracted.text, self.config.max_text_length);
        let prompt = PromptBuilder::new(&filename, &truncated).build_summary();

        let completion = match timeout(
            self.config.completion_timeout(),
            self.completion.complete(&prompt, self.config.max_tokens),
        )
        .await
        {
            Err(_) => {
                warn!(filename = %filename, "completion deadline exceeded");
                return SummaryOutcome::Failure {
                    filename,
                    reason: FailureReason::Timeout,
                };
            }
            Ok(Err(e)) => {
                warn!(filename = %filename, error = %e, "completion failed");
                return SummaryOutcome::Failure {
                    filename,
                    reason: completion_failure(e),
                };
            }
            Ok(Ok(completion)) => completion,
        };

        let elapsed_secs = start.elapsed().as_secs_f64();
        info!(
            filename = %filename,
            elapsed_ms = (elapsed_secs * 1000.0) as u64,
            "document summarized"
        );

        SummaryOutcome::Success {
            filename,
            stats: extracted.stats,
            summary: completion.text.trim().to_string(),
            elapsed_secs,
        }
    }

    /// Extraction is synchronous and CPU-bound; run it on a blocking thread
    /// under its own deadline. The document's bytes are consumed here.
    async fn extract(&self, document: Document) -> Result<ExtractedText, FailureReason> {
        let extractor = Arc::clone(&self.extractor);
        let result = timeout(
            self.config.extraction_timeout(),
            tokio::task::spawn_blocking(move || extractor.extract(&document)),
        )
        .await;

        match result {
            Err(_) => Err(FailureReason::Extraction {
                detail: "Zeitüberschreitung bei der Text-Extraktion".to_string(),
            }),
            Ok(Err(join_error)) => Err(FailureReason::Internal {
                detail: join_error.to_string(),
            }),
            Ok(Ok(Err(e))) => Err(extraction_failure(e)),
            Ok(Ok(Ok(extracted))) => Ok(extracted),
        }
    }
}

fn extraction_failure(e: ExtractionError) -> FailureReason {
    match e {
        ExtractionError::UnsupportedFormat(format) => FailureReason::UnsupportedFormat { format },
        other => FailureReason::Extraction {
            detail: other.to_string(),
        },
    }
}

fn completion_failure(e: CompletionError) -> FailureReason {
    match e {
        CompletionError::Timeout => FailureReason::Timeout,
        CompletionError::Unreachable(detail) => FailureReason::Unreachable { detail },
        CompletionError::Status { code, .. } => FailureReason::Service { status: code },
        CompletionError::InvalidResponse(detail) => FailureReason::Internal { detail },
    }
}
