//! Fallakte Analysis Layer
//!
//! The per-document pipeline: middle-out truncation, deterministic prompt
//! construction, the lenient labeled-field response parser, and the
//! [`DocumentAnalysisTask`] tying them together between the two external
//! boundaries (text extraction and the completion service).
//!
//! The parser is a pure text-to-struct transform and is testable without
//! any network call; the response source is probabilistic, so the parser
//! degrades to defaults instead of failing.

#![warn(missing_docs)]

pub mod config;
pub mod labels;
pub mod parser;
pub mod prompt;
pub mod task;
pub mod truncate;

pub use config::AnalysisConfig;
pub use labels::LabelTable;
pub use parser::{parse_analysis, render_analysis};
pub use prompt::PromptBuilder;
pub use task::DocumentAnalysisTask;
pub use truncate::{truncate_middle, TRUNCATION_MARKER};
