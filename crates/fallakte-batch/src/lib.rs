//! Fallakte Batch Layer
//!
//! Executes a whole batch of documents against the per-document analysis
//! pipeline: bounded-concurrency scheduling with per-task failure
//! isolation, cross-document entity indexing, and the rendered
//! investigator report.
//!
//! One batch is one request; no state survives between batches.

#![warn(missing_docs)]

pub mod config;
pub mod crossref;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod scheduler;

pub use config::BatchConfig;
pub use crossref::{CrossReferenceIndexer, EntityNormalizer};
pub use error::BatchError;
pub use pipeline::BatchPipeline;
pub use report::ReportBuilder;
pub use scheduler::BatchScheduler;
