//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The `AppState` holds the configuration and the
//! request orchestrator. Nothing request-scoped lives here: the Groq API key
//! arrives with each submission and is dropped when the request ends.

use crate::config::{AppConfig, TaskConfig, SUMMARIZE_COMBINE_TASK, SUMMARIZE_MAP_TASK};
use std::sync::Arc;
use textsum::{
    prompts::TaskPrompt,
    providers::{
        ai::groq::build_http_client,
        factory::{GroqProviderFactory, ProviderFactory},
    },
    ChainConfig, MapReduceSummarizer, Orchestrator, Summarizer,
};
use textsum_text::TextSplitter;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The application's configuration, loaded from `config.yml`.
    pub config: Arc<AppConfig>,
    /// Drives every submission from validation to a terminal outcome.
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(config: AppConfig, orchestrator: Orchestrator) -> Self {
        Self {
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
        }
    }
}

/// Resolves a task's prompts, falling back to `default` for unset fields.
fn resolve_prompt(task: Option<&TaskConfig>, default: TaskPrompt) -> TaskPrompt {
    let Some(task) = task else {
        return default;
    };
    TaskPrompt::new(
        task.system_prompt
            .clone()
            .unwrap_or(default.system_prompt),
        task.user_prompt.clone().unwrap_or(default.user_prompt),
    )
}

/// Builds the shared application state from the configuration.
///
/// This function wires the production pipeline:
/// - a character splitter from the `splitter` section,
/// - a map-reduce summarizer from the `chain` section and the task prompts,
/// - a Groq handle factory sharing one HTTP client across requests.
pub fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let splitter = TextSplitter::new(config.splitter.clone())?;

    let chain_config = ChainConfig {
        token_max: config.chain.token_max,
        map_concurrency: config.chain.map_concurrency,
        max_collapse_rounds: config.chain.max_collapse_rounds,
        map_prompt: resolve_prompt(config.tasks.get(SUMMARIZE_MAP_TASK), TaskPrompt::default_map()),
        combine_prompt: resolve_prompt(
            config.tasks.get(SUMMARIZE_COMBINE_TASK),
            TaskPrompt::default_combine(),
        ),
    };
    let summarizer: Arc<dyn Summarizer> = Arc::new(MapReduceSummarizer::new(chain_config));

    let client = build_http_client()?;
    let providers: Arc<dyn ProviderFactory> = Arc::new(GroqProviderFactory::new(
        client,
        config.groq.api_url.clone(),
        Some(config.groq.default_model.clone()),
    ));

    info!(
        api_url = %config.groq.api_url,
        model = %config.groq.default_model,
        chunk_size = config.splitter.chunk_size,
        "Summarization pipeline initialized"
    );

    let orchestrator = Orchestrator::new(splitter, summarizer, providers);
    Ok(AppState::new(config, orchestrator))
}
