//! Core orchestration for CareerGuide.
//!
//! Ties scraping, prompt construction, command recognition, and the Gemini
//! bridge into the end-to-end flows: full-site context aggregation,
//! per-career summaries, and question answering.

pub mod aggregate;
pub mod pipeline;
pub mod prompt;

pub use aggregate::{FailurePolicy, ProgressReporter, SilentProgress, build_context};
pub use pipeline::{AskOutcome, ask_about_career, summarize_career};
