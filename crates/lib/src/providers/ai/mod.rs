pub mod groq;

use crate::errors::PromptError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a hosted text-generation model.
///
/// Any value implementing this trait is a "model handle": it is already bound
/// to a credential and a model identifier.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from a given system and user prompt.
    ///
    /// An empty system prompt means the model receives only the user message.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, PromptError>;

    /// The model identifier this handle talks to.
    fn model_name(&self) -> &str;
}

dyn_clone::clone_trait_object!(AiProvider);
