//! Bounded-concurrency scheduler for document analysis tasks
//!
//! Fans one task per accepted document out over a semaphore-gated
//! [`JoinSet`] and collects outcomes in completion order. The scheduler
//! guarantees exactly one outcome per submitted document; a panicking task
//! costs only its own document.

use crate::config::BatchConfig;
use crate::error::BatchError;
use fallakte_analysis::DocumentAnalysisTask;
use fallakte_domain::{AnalysisOutcome, Document, FailureReason, TextCompletion, TextExtractor};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, warn};

/// Runs a batch of documents through the per-document pipeline
pub struct BatchScheduler<E, C> {
    task: Arc<DocumentAnalysisTask<E, C>>,
    config: BatchConfig,
}

impl<E, C> BatchScheduler<E, C>
where
    E: TextExtractor + 'static,
    C: TextCompletion + 'static,
{
    /// Create a scheduler around a task runner
    pub fn new(task: DocumentAnalysisTask<E, C>, config: BatchConfig) -> Self {
        Self::shared(Arc::new(task), config)
    }

    /// Create a scheduler around an already shared task runner
    ///
    /// Lets callers reuse the same runner for single-document requests
    /// outside the batch path.
    pub fn shared(task: Arc<DocumentAnalysisTask<E, C>>, config: BatchConfig) -> Self {
        Self { task, config }
    }

    /// The active configuration
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Run one batch to completion
    ///
    /// Rejects empty and oversized batches wholesale before anything is
    /// scheduled. Documents with an unaccepted format tag become immediate
    /// failures without consuming a worker slot. Returns one outcome per
    /// submitted document, in no guaranteed order; callers key by filename.
    pub async fn run(&self, documents: Vec<Document>) -> Result<Vec<AnalysisOutcome>, BatchError> {
        if documents.is_empty() {
            return Err(BatchError::EmptyBatch);
        }
        if documents.len() > self.config.max_documents {
            return Err(BatchError::TooManyDocuments {
                submitted: documents.len(),
                limit: self.config.max_documents,
            });
        }

        let total = documents.len();
        let mut outcomes = Vec::with_capacity(total);
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let mut tasks = JoinSet::new();

        for document in documents {
            if document.resolved_format().is_none() {
                warn!(
                    filename = %document.filename,
                    format = %document.format,
                    "document rejected before scheduling"
                );
                outcomes.push(AnalysisOutcome::Failure {
                    filename: document.filename,
                    reason: FailureReason::UnsupportedFormat {
                        format: document.format,
                    },
                });
                continue;
            }

            let task = Arc::clone(&self.task);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(run_isolated(task, semaphore, document));
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                // Panics are converted inside run_isolated; a join error
                // here would mean external cancellation, which the
                // scheduler never issues.
                Err(e) => error!(error = %e, "analysis task join failed"),
            }
        }

        debug_assert_eq!(outcomes.len(), total);
        Ok(outcomes)
    }
}

/// Run one task under a concurrency permit, converting a panic into a
/// per-document failure
async fn run_isolated<E, C>(
    task: Arc<DocumentAnalysisTask<E, C>>,
    semaphore: Arc<Semaphore>,
    document: Document,
) -> AnalysisOutcome
where
    E: TextExtractor + 'static,
    C: TextCompletion,
{
    let filename = document.filename.clone();

    let _permit = match semaphore.acquire_owned().await {
        Ok(permit) => permit,
        Err(_) => {
            return AnalysisOutcome::Failure {
                filename,
                reason: FailureReason::Internal {
                    detail: "Scheduler wurde geschlossen".to_string(),
                },
            }
        }
    };

    match AssertUnwindSafe(task.run(document)).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(panic) => {
            error!(filename = %filename, "analysis task panicked");
            AnalysisOutcome::Failure {
                filename,
                reason: FailureReason::Internal {
                    detail: panic_message(panic),
                },
            }
        }
    }
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unbekannte Panik".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fallakte_analysis::AnalysisConfig;
    use fallakte_domain::{
        Completion, CompletionError, ExtractedText, ExtractionError, FormatMetadata,
    };
    use fallakte_llm::MockCompletion;

    struct Utf8Extractor;

    impl TextExtractor for Utf8Extractor {
        fn extract(&self, document: &Document) -> Result<ExtractedText, ExtractionError> {
            let text = String::from_utf8(document.content.clone())
                .map_err(|e| ExtractionError::Malformed(e.to_string()))?;
            Ok(ExtractedText::new(
                text,
                FormatMetadata::Plain {
                    encoding: "utf-8".to_string(),
                },
            ))
        }
    }

    /// Panics on prompts containing the trigger, for isolation tests
    struct PanickingCompletion {
        trigger: &'static str,
    }

    #[async_trait]
    impl TextCompletion for PanickingCompletion {
        async fn complete(
            &self,
            prompt: &str,
            _max_tokens: u32,
        ) -> Result<Completion, CompletionError> {
            if prompt.contains(self.trigger) {
                panic!("Testpanik");
            }
            Ok(Completion {
                text: "KATEGORIE: Sonstiges".to_string(),
                elapsed: std::time::Duration::from_millis(1),
            })
        }
    }

    fn scheduler<C: TextCompletion + 'static>(
        completion: C,
        config: BatchConfig,
    ) -> BatchScheduler<Utf8Extractor, C> {
        let task = DocumentAnalysisTask::new(
            Arc::new(Utf8Extractor),
            Arc::new(completion),
            AnalysisConfig::default(),
        );
        BatchScheduler::new(task, config)
    }

    fn txt(filename: &str) -> Document {
        Document::from_filename(filename, b"Inhalt des Dokuments".to_vec())
    }

    #[tokio::test]
    async fn test_empty_batch_rejected() {
        let scheduler = scheduler(MockCompletion::new("x"), BatchConfig::default());
        assert_eq!(scheduler.run(vec![]).await, Err(BatchError::EmptyBatch));
    }

    #[tokio::test]
    async fn test_oversized_batch_rejected_before_any_task() {
        let mock = MockCompletion::new("KATEGORIE: Sonstiges");
        let scheduler = scheduler(mock.clone(), BatchConfig::default());

        let documents: Vec<_> = (0..51).map(|i| txt(&format!("doc_{i}.txt"))).collect();
        let err = scheduler.run(documents).await.unwrap_err();

        assert_eq!(
            err,
            BatchError::TooManyDocuments {
                submitted: 51,
                limit: 50
            }
        );
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_one_outcome_per_document() {
        let scheduler = scheduler(
            MockCompletion::new("KATEGORIE: Rechnung"),
            BatchConfig::default(),
        );
        let documents = vec![txt("a.txt"), txt("b.txt"), txt("c.txt")];

        let outcomes = scheduler.run(documents).await.unwrap();

        assert_eq!(outcomes.len(), 3);
        let mut names: Vec<_> = outcomes.iter().map(|o| o.filename().to_string()).collect();
        names.sort();
        assert_eq!(names, ["a.txt", "b.txt", "c.txt"]);
        assert!(outcomes.iter().all(|o| o.is_success()));
    }

    #[tokio::test]
    async fn test_unsupported_format_skips_scheduling() {
        let mock = MockCompletion::new("KATEGORIE: Sonstiges");
        let scheduler = scheduler(mock.clone(), BatchConfig::default());

        let documents = vec![
            txt("gut.txt"),
            Document::from_filename("virus.exe", vec![0x4d, 0x5a]),
        ];
        let outcomes = scheduler.run(documents).await.unwrap();

        assert_eq!(outcomes.len(), 2);
        let rejected = outcomes
            .iter()
            .find(|o| o.filename() == "virus.exe")
            .unwrap();
        assert!(matches!(
            rejected,
            AnalysisOutcome::Failure {
                reason: FailureReason::UnsupportedFormat { .. },
                ..
            }
        ));
        // only the accepted document reached the completion service
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_panic_isolated_to_its_document() {
        let scheduler = scheduler(
            PanickingCompletion { trigger: "bombe.txt" },
            BatchConfig::default(),
        );
        let documents = vec![txt("a.txt"), txt("bombe.txt"), txt("c.txt")];

        let outcomes = scheduler.run(documents).await.unwrap();

        assert_eq!(outcomes.len(), 3);
        let poisoned = outcomes
            .iter()
            .find(|o| o.filename() == "bombe.txt")
            .unwrap();
        assert!(matches!(
            poisoned,
            AnalysisOutcome::Failure {
                reason: FailureReason::Internal { .. },
                ..
            }
        ));
        assert_eq!(outcomes.iter().filter(|o| o.is_success()).count(), 2);
    }

    #[tokio::test]
    async fn test_concurrency_never_exceeds_limit() {
        let mock = MockCompletion::new("KATEGORIE: Sonstiges")
            .with_delay(std::time::Duration::from_millis(25));
        let config = BatchConfig {
            concurrency: 3,
            max_documents: 50,
        };
        let scheduler = scheduler(mock.clone(), config);

        let documents: Vec<_> = (0..10).map(|i| txt(&format!("doc_{i}.txt"))).collect();
        let outcomes = scheduler.run(documents).await.unwrap();

        assert_eq!(outcomes.len(), 10);
        assert_eq!(mock.call_count(), 10);
        assert!(
            mock.max_in_flight() <= 3,
            "high-water mark {} exceeded the permit count",
            mock.max_in_flight()
        );
    }
}
