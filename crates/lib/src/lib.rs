//! # Text Summarization Core
//!
//! This crate turns pasted text and a caller-supplied Groq API key into a
//! summary. It validates the submission, splits the text into chunks, wraps the
//! chunks into documents, and drives a map-reduce summarization chain against a
//! hosted chat-completion model.

pub mod chain;
pub mod errors;
pub mod orchestrator;
pub mod prompts;
pub mod providers;
pub mod types;
pub mod validation;

pub use chain::{ChainConfig, MapReduceSummarizer, Summarizer};
pub use errors::PromptError;
pub use orchestrator::{Orchestrator, Outcome};
pub use types::{Document, RawInput};
pub use validation::{validate_input, ValidationOutcome};

/// Shown in place of a summary when no model handle could be built.
pub const INVALID_KEY_SENTINEL: &str = "Invalid or missing API key.";
