//! # Default Task Prompts
//!
//! These are loaded programmatically and can be overridden by `config.yml` or
//! `prompt.yml`. An empty system prompt sends only the user message.

// --- Map Stage ---
pub const SUMMARIZE_MAP_SYSTEM_PROMPT: &str = "";
pub const SUMMARIZE_MAP_USER_PROMPT: &str = r#"Write a concise summary of the following:


"{text}"


CONCISE SUMMARY:"#;

// --- Reduce Stage ---
pub const SUMMARIZE_COMBINE_SYSTEM_PROMPT: &str = "";
pub const SUMMARIZE_COMBINE_USER_PROMPT: &str = r#"Write a concise summary of the following:


"{text}"


CONCISE SUMMARY:"#;
