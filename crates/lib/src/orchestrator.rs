//! # Request Orchestrator
//!
//! Drives one submission from validation to a terminal outcome:
//!
//! 1. Validate the text and credential. Failures end in [`Outcome::Rejected`]
//!    and no model call is made.
//! 2. Build a model handle from the credential. If none can be built the
//!    submission ends in [`Outcome::InvalidKey`].
//! 3. Split the text into chunks, wrap them into documents, and run the
//!    summarizer. Success ends in [`Outcome::Completed`]; any pipeline error
//!    is returned as-is with no retry.
//!
//! Nothing is retained between submissions.

use crate::{
    chain::Summarizer,
    errors::PromptError,
    providers::factory::ProviderFactory,
    types::{wrap_chunks, Document, RawInput},
    validation::{validate_input, ValidationOutcome},
    INVALID_KEY_SENTINEL,
};
use std::sync::Arc;
use textsum_text::TextSplitter;
use tracing::{info, warn};

/// The terminal state of a submission that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Rejected(ValidationOutcome),
    InvalidKey,
    Completed(String),
}

impl Outcome {
    /// The text shown to the user for this outcome.
    pub fn message(&self) -> &str {
        match self {
            Outcome::Rejected(validation) => validation.message().unwrap_or_default(),
            Outcome::InvalidKey => INVALID_KEY_SENTINEL,
            Outcome::Completed(summary) => summary,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Outcome::Rejected(_) => "rejected",
            Outcome::InvalidKey => "invalid_key",
            Outcome::Completed(_) => "completed",
        }
    }

    /// Rejections are rendered as warnings, everything else as information.
    pub fn is_warning(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }
}

/// Runs submissions through validation, chunking, and summarization.
#[derive(Clone, Debug)]
pub struct Orchestrator {
    splitter: TextSplitter,
    summarizer: Arc<dyn Summarizer>,
    providers: Arc<dyn ProviderFactory>,
}

impl Orchestrator {
    pub fn new(
        splitter: TextSplitter,
        summarizer: Arc<dyn Summarizer>,
        providers: Arc<dyn ProviderFactory>,
    ) -> Self {
        Self {
            splitter,
            summarizer,
            providers,
        }
    }

    /// Splits text and wraps every chunk into a document.
    pub fn prepare_documents(&self, text: &str) -> Vec<Document> {
        wrap_chunks(self.splitter.split_text(text))
    }

    /// Handles a submission with the factory's default model.
    pub async fn handle(&self, input: &RawInput) -> Result<Outcome, PromptError> {
        self.handle_with_model(input, None).await
    }

    /// Handles a submission, optionally overriding the model identifier.
    pub async fn handle_with_model(
        &self,
        input: &RawInput,
        model: Option<&str>,
    ) -> Result<Outcome, PromptError> {
        let validation = validate_input(&input.text, &input.credential);
        if !validation.is_valid() {
            info!(?validation, "Submission rejected by input validation");
            return Ok(Outcome::Rejected(validation));
        }

        let Some(llm) = self.providers.create(&input.credential, model) else {
            warn!("No model handle could be built for the submitted key");
            return Ok(Outcome::InvalidKey);
        };

        let documents = self.prepare_documents(&input.text);
        info!(
            documents = documents.len(),
            model = %llm.model_name(),
            "Submitting documents for summarization"
        );

        let summary = self.summarizer.summarize(&documents, llm.as_ref()).await?;
        Ok(Outcome::Completed(summary))
    }
}
