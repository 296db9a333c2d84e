//! # Shared Test Doubles
//!
//! Mock model handles, factories, and summarizers used by the `textsum`
//! integration tests. None of them perform network I/O.

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use textsum::{
    chain::Summarizer,
    errors::PromptError,
    providers::{ai::AiProvider, factory::ProviderFactory},
    types::Document,
};

// --- Mock AI Provider ---

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    model: String,
    responses: Arc<Mutex<Vec<(String, String)>>>,
    fallback: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            model: "mock-chat-model".to_string(),
            responses: Arc::new(Mutex::new(Vec::new())),
            fallback: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pre-programs a response for any user prompt containing `key`.
    /// Keys are checked in the order they were added.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.push((key.to_string(), response.to_string()));
    }

    /// The response returned when no key matches.
    pub fn set_fallback(&self, response: &str) {
        *self.fallback.lock().unwrap() = Some(response.to_string());
    }

    /// Retrieves the recorded `(system_prompt, user_prompt)` calls.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        let responses = self.responses.lock().unwrap();
        if let Some((_, response)) = responses.iter().find(|(key, _)| user_prompt.contains(key)) {
            return Ok(response.clone());
        }
        if let Some(fallback) = self.fallback.lock().unwrap().clone() {
            return Ok(fallback);
        }

        Err(PromptError::AiApi(format!(
            "MockAiProvider: No response programmed for user prompt. Got: '{user_prompt}'"
        )))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// --- Mock Provider Factory ---

/// Hands out clones of one `MockAiProvider`, or nothing for an empty credential.
#[derive(Clone, Debug, Default)]
pub struct MockProviderFactory {
    pub provider: MockAiProvider,
    refuse_all: bool,
    created: Arc<AtomicUsize>,
}

impl MockProviderFactory {
    pub fn new(provider: MockAiProvider) -> Self {
        Self {
            provider,
            refuse_all: false,
            created: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A factory that never builds a handle.
    pub fn refusing() -> Self {
        Self {
            refuse_all: true,
            ..Self::default()
        }
    }

    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl ProviderFactory for MockProviderFactory {
    fn create(&self, credential: &str, _model: Option<&str>) -> Option<Box<dyn AiProvider>> {
        if self.refuse_all || credential.is_empty() {
            return None;
        }
        self.created.fetch_add(1, Ordering::SeqCst);
        Some(Box::new(self.provider.clone()))
    }
}

// --- Mock Summarizer ---

/// A deterministic summarizer that returns a fixed result and records inputs.
#[derive(Clone, Debug)]
pub struct MockSummarizer {
    result: Result<String, String>,
    calls: Arc<Mutex<Vec<Vec<Document>>>>,
}

impl MockSummarizer {
    pub fn returning(summary: &str) -> Self {
        Self {
            result: Ok(summary.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A summarizer whose every call fails with `PromptError::AiApi(message)`.
    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_calls(&self) -> Vec<Vec<Document>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(
        &self,
        documents: &[Document],
        _llm: &dyn AiProvider,
    ) -> Result<String, PromptError> {
        self.calls.lock().unwrap().push(documents.to_vec());
        self.result.clone().map_err(PromptError::AiApi)
    }
}

