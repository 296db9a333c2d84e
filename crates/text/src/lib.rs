//! # `textsum-text`: Character Text Splitting
//!
//! This crate splits raw text into an ordered sequence of bounded-size chunks
//! for the `textsum` summarization pipeline. Splitting prefers a fixed
//! separator (blank lines by default) and falls back to a hard cut when a
//! single piece is longer than the chunk size. All lengths are measured in
//! characters, not bytes.

use serde::Deserialize;
use std::collections::VecDeque;
use thiserror::Error;
use tracing::{debug, warn};

/// The separator used to find natural split points.
pub const DEFAULT_SEPARATOR: &str = "\n\n";
/// The target maximum size for a single chunk in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 4000;
/// The character overlap carried between consecutive chunks.
pub const DEFAULT_CHUNK_OVERLAP: usize = 0;

/// Custom error types for the splitting process.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TextSplitError {
    #[error("Invalid splitter configuration: {0}")]
    InvalidConfig(String),
}

/// Tunables for [`TextSplitter`], deserializable from the server config.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SplitterConfig {
    #[serde(default = "default_separator")]
    pub separator: String,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_chunk_overlap() -> usize {
    DEFAULT_CHUNK_OVERLAP
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

/// Splits text on a separator and greedily merges the pieces into chunks.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    config: SplitterConfig,
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self {
            config: SplitterConfig::default(),
        }
    }
}

impl TextSplitter {
    /// Creates a new `TextSplitter`, rejecting configurations that could never
    /// produce a bounded chunk.
    pub fn new(config: SplitterConfig) -> Result<Self, TextSplitError> {
        if config.separator.is_empty() {
            return Err(TextSplitError::InvalidConfig(
                "separator must not be empty".to_string(),
            ));
        }
        if config.chunk_size == 0 {
            return Err(TextSplitError::InvalidConfig(
                "chunk_size must be greater than zero".to_string(),
            ));
        }
        if config.chunk_overlap >= config.chunk_size {
            return Err(TextSplitError::InvalidConfig(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                config.chunk_overlap, config.chunk_size
            )));
        }
        Ok(Self { config })
    }

    /// Splits `text` into ordered chunks of at most `chunk_size` characters.
    ///
    /// Whitespace at chunk boundaries is trimmed and empty chunks are dropped,
    /// so empty or whitespace-only input yields an empty vector.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        let pieces: Vec<String> = text
            .split(self.config.separator.as_str())
            .filter(|piece| !piece.is_empty())
            .flat_map(|piece| self.hard_cut(piece))
            .collect();

        let chunks = self.merge_pieces(pieces);
        debug!(
            input_chars = text.chars().count(),
            chunks = chunks.len(),
            "Split text into chunks"
        );
        chunks
    }

    /// Cuts a piece that has no natural split point into `chunk_size` slices.
    fn hard_cut(&self, piece: &str) -> Vec<String> {
        let len = piece.chars().count();
        if len <= self.config.chunk_size {
            return vec![piece.to_string()];
        }

        warn!(
            "Piece exceeds chunk size limit ({} > {}). Splitting by character.",
            len, self.config.chunk_size
        );
        let chars: Vec<char> = piece.chars().collect();
        chars
            .chunks(self.config.chunk_size)
            .map(|slice| slice.iter().collect())
            .collect()
    }

    /// Greedily joins pieces with the separator while the result still fits,
    /// carrying trailing pieces forward as overlap.
    fn merge_pieces(&self, pieces: Vec<String>) -> Vec<String> {
        let separator = self.config.separator.as_str();
        let separator_len = separator.chars().count();
        let chunk_size = self.config.chunk_size;
        let chunk_overlap = self.config.chunk_overlap;
        let joiner_len = |current: &VecDeque<String>| {
            if current.is_empty() {
                0
            } else {
                separator_len
            }
        };

        let mut chunks = Vec::new();
        let mut current: VecDeque<String> = VecDeque::new();
        let mut total = 0;

        for piece in pieces {
            let len = piece.chars().count();

            if total + len + joiner_len(&current) > chunk_size && !current.is_empty() {
                if let Some(chunk) = join_trimmed(&current, separator) {
                    chunks.push(chunk);
                }
                while total > chunk_overlap
                    || (total > 0 && total + len + joiner_len(&current) > chunk_size)
                {
                    let Some(front) = current.pop_front() else {
                        break;
                    };
                    total -= front.chars().count() + joiner_len(&current);
                }
            }

            total += len + joiner_len(&current);
            current.push_back(piece);
        }

        if let Some(chunk) = join_trimmed(&current, separator) {
            chunks.push(chunk);
        }
        chunks
    }
}

fn join_trimmed(pieces: &VecDeque<String>, separator: &str) -> Option<String> {
    let joined = pieces.iter().cloned().collect::<Vec<_>>().join(separator);
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Chunks text with the default splitter settings.
pub fn chunk_text(text: &str) -> Vec<String> {
    TextSplitter::default().split_text(text)
}
