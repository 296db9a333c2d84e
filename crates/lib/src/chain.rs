//! # Map-Reduce Summarization Chain
//!
//! Summarizes an ordered list of documents in two stages. The map stage asks
//! the model for a partial summary of every document; the reduce stage folds
//! those partial summaries into one final summary. When the partial summaries
//! are too large for one call they are collapsed in groups first, repeatedly,
//! until they fit.
//!
//! The orchestrator only sees the [`Summarizer`] trait, so the chain can be
//! replaced wholesale (e.g. by a deterministic mock in tests).

use crate::{
    errors::PromptError,
    prompts::TaskPrompt,
    providers::ai::AiProvider,
    types::Document,
};
use async_trait::async_trait;
use futures::{stream, StreamExt, TryStreamExt};
use std::fmt::Debug;
use tracing::{debug, info};

/// Upper bound on the estimated tokens sent to one reduce call.
pub const DEFAULT_TOKEN_MAX: usize = 3000;
/// How many map-stage calls may be in flight at once.
pub const DEFAULT_MAP_CONCURRENCY: usize = 4;
/// How many collapse rounds are attempted before giving up.
pub const DEFAULT_MAX_COLLAPSE_ROUNDS: usize = 8;
/// Joins partial summaries before they are handed to the combine prompt.
pub const DOCUMENT_SEPARATOR: &str = "\n\n";

/// Rough token estimate (about four characters per token).
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

fn total_tokens(texts: &[String]) -> usize {
    texts.iter().map(|t| estimate_tokens(t)).sum()
}

/// An opaque `(documents, model handle) -> summary` function.
#[async_trait]
pub trait Summarizer: Send + Sync + Debug {
    async fn summarize(
        &self,
        documents: &[Document],
        llm: &dyn AiProvider,
    ) -> Result<String, PromptError>;
}

/// Tunables for [`MapReduceSummarizer`].
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub token_max: usize,
    pub map_concurrency: usize,
    pub max_collapse_rounds: usize,
    pub map_prompt: TaskPrompt,
    pub combine_prompt: TaskPrompt,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            token_max: DEFAULT_TOKEN_MAX,
            map_concurrency: DEFAULT_MAP_CONCURRENCY,
            max_collapse_rounds: DEFAULT_MAX_COLLAPSE_ROUNDS,
            map_prompt: TaskPrompt::default_map(),
            combine_prompt: TaskPrompt::default_combine(),
        }
    }
}

/// The classic map-reduce summarization chain.
#[derive(Debug, Clone, Default)]
pub struct MapReduceSummarizer {
    config: ChainConfig,
}

impl MapReduceSummarizer {
    pub fn new(config: ChainConfig) -> Self {
        Self { config }
    }

    /// Produces one partial summary per document, in document order.
    async fn map(
        &self,
        documents: &[Document],
        llm: &dyn AiProvider,
    ) -> Result<Vec<String>, PromptError> {
        let prompt = &self.config.map_prompt;
        let concurrency = self.config.map_concurrency.max(1);

        let calls: Vec<_> = documents
            .iter()
            .enumerate()
            .map(|(index, document)| async move {
                debug!(document = index, "Map stage: summarizing document");
                llm.generate(&prompt.system_prompt, &prompt.render_user(&document.content))
                    .await
            })
            .collect();

        stream::iter(calls)
            .buffered(concurrency)
            .try_collect()
            .await
    }

    /// Summarizes a group of texts with a single combine call.
    async fn combine(&self, texts: &[String], llm: &dyn AiProvider) -> Result<String, PromptError> {
        let prompt = &self.config.combine_prompt;
        let joined = texts.join(DOCUMENT_SEPARATOR);
        llm.generate(&prompt.system_prompt, &prompt.render_user(&joined))
            .await
    }

    /// Collapses partial summaries until they fit `token_max`, then combines them.
    async fn reduce(
        &self,
        mut summaries: Vec<String>,
        llm: &dyn AiProvider,
    ) -> Result<String, PromptError> {
        let token_max = self.config.token_max;
        let mut rounds = 0;

        while total_tokens(&summaries) > token_max {
            if rounds >= self.config.max_collapse_rounds {
                return Err(PromptError::CollapseLimit { rounds, token_max });
            }
            rounds += 1;

            let groups = group_by_token_max(&summaries, token_max)?;
            info!(
                round = rounds,
                summaries = summaries.len(),
                groups = groups.len(),
                "Collapsing partial summaries"
            );

            let mut collapsed = Vec::with_capacity(groups.len());
            for group in &groups {
                collapsed.push(self.combine(group, llm).await?);
            }
            summaries = collapsed;
        }

        debug!(summaries = summaries.len(), "Reduce stage: combining partial summaries");
        self.combine(&summaries, llm).await
    }
}

#[async_trait]
impl Summarizer for MapReduceSummarizer {
    async fn summarize(
        &self,
        documents: &[Document],
        llm: &dyn AiProvider,
    ) -> Result<String, PromptError> {
        if documents.is_empty() {
            return Err(PromptError::NoDocuments);
        }

        info!(
            documents = documents.len(),
            model = %llm.model_name(),
            "Starting map-reduce summarization"
        );
        let partial_summaries = self.map(documents, llm).await?;
        self.reduce(partial_summaries, llm).await
    }
}

/// Partitions texts, in order, into groups whose estimated tokens fit `token_max`.
pub fn group_by_token_max(
    texts: &[String],
    token_max: usize,
) -> Result<Vec<Vec<String>>, PromptError> {
    let mut groups = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_tokens = 0;

    for text in texts {
        let tokens = estimate_tokens(text);
        if tokens > token_max {
            return Err(PromptError::DocumentTooLong { tokens, token_max });
        }
        if current_tokens + tokens > token_max && !current.is_empty() {
            groups.push(std::mem::take(&mut current));
            current_tokens = 0;
        }
        current.push(text.clone());
        current_tokens += tokens;
    }

    if !current.is_empty() {
        groups.push(current);
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_tokens_counts_chars() {
        assert_eq!(estimate_tokens(""), 1);
        assert_eq!(estimate_tokens("abcd"), 2);
        assert_eq!(estimate_tokens("ああああ"), 2);
    }

    #[test]
    fn grouping_keeps_order_and_bounds() {
        // Each text is 39 chars -> 10 tokens.
        let texts: Vec<String> = (0..5).map(|i| format!("{i}{}", "x".repeat(38))).collect();
        let groups = group_by_token_max(&texts, 25).unwrap();

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0], texts[0..2].to_vec());
        assert_eq!(groups[1], texts[2..4].to_vec());
        assert_eq!(groups[2], texts[4..5].to_vec());
    }

    #[test]
    fn grouping_rejects_oversized_text() {
        let texts = vec!["y".repeat(400)];
        let err = group_by_token_max(&texts, 50).unwrap_err();
        assert!(matches!(
            err,
            PromptError::DocumentTooLong {
                tokens: 101,
                token_max: 50
            }
        ));
    }
}
