//! # Model Handle Factory
//!
//! The orchestrator never builds providers directly. It asks a
//! `ProviderFactory` for a handle bound to the submitted credential, which
//! keeps request handling independent of the concrete model API and lets
//! tests substitute a mock.

use crate::providers::ai::{
    groq::{load_llm, DEFAULT_GROQ_MODEL},
    AiProvider,
};
use reqwest::Client as ReqwestClient;
use std::fmt::Debug;
use tracing::info;

/// Creates model handles from request-scoped credentials.
pub trait ProviderFactory: Send + Sync + Debug {
    /// Returns `None` when no handle can be built for `credential`.
    fn create(&self, credential: &str, model: Option<&str>) -> Option<Box<dyn AiProvider>>;
}

/// A factory producing [`GroqProvider`](crate::providers::ai::groq::GroqProvider) handles.
#[derive(Clone, Debug)]
pub struct GroqProviderFactory {
    client: ReqwestClient,
    api_url: String,
    default_model: String,
}

impl GroqProviderFactory {
    pub fn new(
        client: ReqwestClient,
        api_url: impl Into<String>,
        default_model: Option<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            default_model: default_model.unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
        }
    }
}

impl ProviderFactory for GroqProviderFactory {
    fn create(&self, credential: &str, model: Option<&str>) -> Option<Box<dyn AiProvider>> {
        let model = model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(&self.default_model);
        let provider = load_llm(&self.client, &self.api_url, credential, Some(model))?;
        info!(model = %model, "Built model handle for submission");
        Some(Box::new(provider))
    }
}
