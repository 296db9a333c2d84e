//! # Request and Document Types

use std::fmt;

/// A single form submission. Lives only for the duration of one request.
#[derive(Clone, Default)]
pub struct RawInput {
    pub text: String,
    pub credential: String,
}

impl RawInput {
    pub fn new(text: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            credential: credential.into(),
        }
    }
}

// The credential must never reach the logs.
impl fmt::Debug for RawInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawInput")
            .field("text_chars", &self.text.chars().count())
            .field("credential", &"<redacted>")
            .finish()
    }
}

/// The uniform record consumed by the summarization chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub content: String,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Wraps each chunk into a `Document`, preserving order.
pub fn wrap_chunks(chunks: Vec<String>) -> Vec<Document> {
    chunks.into_iter().map(Document::new).collect()
}
