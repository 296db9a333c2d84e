use crate::{errors::PromptError, providers::ai::AiProvider};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Groq's OpenAI-compatible chat completions endpoint.
pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// The model used when the caller does not name one.
pub const DEFAULT_GROQ_MODEL: &str = "llama3-70b-8192";
/// Sampling temperature applied by the client when nothing else is configured.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

// --- OpenAI-compatible request and response structures ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    stream: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatMessage,
}

// --- Groq Provider implementation ---

/// A model handle bound to one Groq API key and one model identifier.
///
/// Building a handle performs no network I/O; an invalid key is only
/// discovered when `generate` is called.
#[derive(Clone)]
pub struct GroqProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl fmt::Debug for GroqProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroqProvider")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

impl GroqProvider {
    /// Creates a new `GroqProvider` that shares the given HTTP client.
    pub fn new(
        client: ReqwestClient,
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

}

/// Builds the HTTP client shared by every model handle.
pub fn build_http_client() -> Result<ReqwestClient, PromptError> {
    ReqwestClient::builder()
        .build()
        .map_err(PromptError::ReqwestClientBuild)
}

/// Builds a model handle from a credential.
///
/// Returns `None` when the credential is empty. This check is narrower than
/// the prefix check in [`crate::validation`] and runs independently of it.
pub fn load_llm(
    client: &ReqwestClient,
    api_url: &str,
    api_key: &str,
    model: Option<&str>,
) -> Option<GroqProvider> {
    if api_key.is_empty() {
        warn!("Please provide a valid Groq API key.");
        return None;
    }
    let model = model.unwrap_or(DEFAULT_GROQ_MODEL);
    Some(GroqProvider::new(client.clone(), api_url, api_key, model))
}

#[async_trait]
impl AiProvider for GroqProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        let mut messages = Vec::with_capacity(2);
        if !system_prompt.is_empty() {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system_prompt.to_string(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: user_prompt.to_string(),
        });

        let request_body = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            stream: false,
        };

        debug!(model = %self.model, prompt_chars = user_prompt.chars().count(), "--> Sending prompt to Groq");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(PromptError::AiRequest)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(PromptError::AiApi(format!("{status}: {error_text}")));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(PromptError::AiDeserialization)?;

        let content = chat_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default();

        debug!(response_chars = content.chars().count(), "<-- Received completion from Groq");
        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
