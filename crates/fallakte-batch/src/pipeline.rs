//! End-to-end batch execution
//!
//! Glues scheduler, indexer, and report builder into the single entry
//! point the HTTP layer and the CLI both call.

use crate::crossref::CrossReferenceIndexer;
use crate::error::BatchError;
use crate::report::ReportBuilder;
use crate::scheduler::BatchScheduler;
use crate::BatchConfig;
use fallakte_analysis::{AnalysisConfig, DocumentAnalysisTask};
use fallakte_domain::{BatchResult, Document, TextCompletion, TextExtractor};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Runs a batch from documents to a [`BatchResult`]
pub struct BatchPipeline<E, C> {
    scheduler: BatchScheduler<E, C>,
    indexer: CrossReferenceIndexer,
    report: ReportBuilder,
}

impl<E, C> BatchPipeline<E, C>
where
    E: TextExtractor + 'static,
    C: TextCompletion + 'static,
{
    /// Assemble a pipeline from the two boundary implementations
    pub fn new(
        extractor: Arc<E>,
        completion: Arc<C>,
        analysis_config: AnalysisConfig,
        batch_config: BatchConfig,
    ) -> Self {
        let task = DocumentAnalysisTask::new(extractor, completion, analysis_config);
        Self::from_task(Arc::new(task), batch_config)
    }

    /// Assemble a pipeline around an already shared task runner
    pub fn from_task(task: Arc<DocumentAnalysisTask<E, C>>, batch_config: BatchConfig) -> Self {
        Self {
            scheduler: BatchScheduler::shared(task, batch_config),
            indexer: CrossReferenceIndexer::default(),
            report: ReportBuilder::default(),
        }
    }

    /// Run one batch
    ///
    /// Fails only on wholesale rejection (empty or oversized batch); any
    /// mix of per-document successes and failures is a structurally
    /// successful result.
    pub async fn run(&self, documents: Vec<Document>) -> Result<BatchResult, BatchError> {
        let start = Instant::now();
        let submitted = documents.len();

        let outcomes = self.scheduler.run(documents).await?;
        let cross_references = self.indexer.index(&outcomes);
        let report = self.report.build(&outcomes, &cross_references);
        let result = BatchResult::new(
            outcomes,
            cross_references,
            report,
            start.elapsed().as_secs_f64(),
        );

        info!(
            batch_id = %result.batch_id,
            submitted,
            processed = result.processed,
            failed = result.failed,
            elapsed_ms = (result.elapsed_secs * 1000.0) as u64,
            "batch finished"
        );

        Ok(result)
    }
}
