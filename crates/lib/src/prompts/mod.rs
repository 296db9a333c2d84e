//! # Prompt Templates
//!
//! This module organizes the prompt templates used by the summarization chain.
//! Defaults live in [`tasks`]; the server can override them from `config.yml`
//! or `prompt.yml`.

pub mod tasks;

/// A system/user prompt pair for one model call.
///
/// The user prompt may contain a `{text}` placeholder that receives the
/// document (map stage) or the joined partial summaries (reduce stage).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPrompt {
    pub system_prompt: String,
    pub user_prompt: String,
}

impl TaskPrompt {
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
        }
    }

    /// The default prompt applied to each document in the map stage.
    pub fn default_map() -> Self {
        Self::new(tasks::SUMMARIZE_MAP_SYSTEM_PROMPT, tasks::SUMMARIZE_MAP_USER_PROMPT)
    }

    /// The default prompt used to combine partial summaries.
    pub fn default_combine() -> Self {
        Self::new(
            tasks::SUMMARIZE_COMBINE_SYSTEM_PROMPT,
            tasks::SUMMARIZE_COMBINE_USER_PROMPT,
        )
    }

    /// Substitutes `{text}` in the user prompt.
    pub fn render_user(&self, text: &str) -> String {
        self.user_prompt.replace("{text}", text)
    }
}
