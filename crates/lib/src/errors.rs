use textsum_text::TextSplitError;
use thiserror::Error;

/// Custom error types for the summarization pipeline.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("No documents were provided to summarize")]
    NoDocuments,
    #[error("A single document was longer than the context length ({tokens} > {token_max} tokens)")]
    DocumentTooLong { tokens: usize, token_max: usize },
    #[error("Partial summaries still exceed {token_max} tokens after {rounds} collapse rounds")]
    CollapseLimit { rounds: usize, token_max: usize },
    #[error("Text splitting failed: {0}")]
    TextSplit(#[from] TextSplitError),
}
