//! Fallakte Domain Layer
//!
//! Core data model for batch evidence analysis: documents, extracted text,
//! per-document analyses, batch outcomes, and the trait interfaces that the
//! infrastructure layers implement.
//!
//! ## Key Concepts
//!
//! - **Document**: one submitted evidence file (filename + bytes + declared
//!   format tag), owned by exactly one analysis task
//! - **Analysis**: the structured result of one document's LLM pass
//! - **AnalysisOutcome**: success or categorized failure, exactly one per
//!   accepted document
//! - **BatchResult**: everything a batch returns; nothing survives the request
//!
//! ## Architecture
//!
//! This crate holds data types and trait definitions only. Extraction,
//! completion-service, scheduling, and HTTP concerns live in other crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod batch;
pub mod category;
pub mod document;
pub mod extracted;
pub mod outcome;
pub mod relevance;
pub mod traits;

// Re-exports for convenience
pub use analysis::Analysis;
pub use batch::{BatchResult, CrossReference, CrossReferenceIndex};
pub use category::DocumentCategory;
pub use document::{Document, DocumentFormat};
pub use extracted::{ExtractedText, FormatMetadata, TextStats};
pub use outcome::{AnalysisOutcome, FailureReason, SummaryOutcome};
pub use relevance::RelevanceTier;
pub use traits::{Completion, CompletionError, ExtractionError, TextCompletion, TextExtractor};
