//! # Application Configuration
//!
//! This module defines the configuration structure for the `textsum-server` and
//! provides the logic for loading it from a `config.yml` file and environment
//! variables. Every value has a programmatic default, so the server runs
//! without any configuration file at all.
//!
//! The Groq API key is not part of the configuration. It only arrives with a
//! request.

use config::{
    Config as ConfigBuilder, Environment, File, FileFormat, Value as ConfigValue,
    ValueKind as ConfigValueKind,
};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use textsum::chain::{DEFAULT_MAP_CONCURRENCY, DEFAULT_MAX_COLLAPSE_ROUNDS, DEFAULT_TOKEN_MAX};
use textsum::prompts::tasks::*;
use textsum::providers::ai::groq::{DEFAULT_GROQ_MODEL, GROQ_API_URL};
use textsum_text::SplitterConfig;
use tracing::info;

/// The task name of the per-document summarization prompt.
pub const SUMMARIZE_MAP_TASK: &str = "summarize_map";
/// The task name of the prompt that combines partial summaries.
pub const SUMMARIZE_COMBINE_TASK: &str = "summarize_combine";

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Where and how to reach the hosted model.
    #[serde(default)]
    pub groq: GroqConfig,
    /// How submitted text is cut into chunks.
    #[serde(default)]
    pub splitter: SplitterConfig,
    /// Limits of the map-reduce summarization chain.
    #[serde(default)]
    pub chain: ChainSettings,
    /// Prompt templates keyed by task name.
    #[serde(default)]
    pub tasks: HashMap<String, TaskConfig>,
}

/// Provides a default value for the `port` field if not set in the environment.
fn default_port() -> u16 {
    9090
}

/// Endpoint and model used for every model handle.
#[derive(Debug, Deserialize, Clone)]
pub struct GroqConfig {
    #[serde(default = "default_groq_api_url")]
    pub api_url: String,
    #[serde(default = "default_groq_model")]
    pub default_model: String,
}

fn default_groq_api_url() -> String {
    GROQ_API_URL.to_string()
}

fn default_groq_model() -> String {
    DEFAULT_GROQ_MODEL.to_string()
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_url: default_groq_api_url(),
            default_model: default_groq_model(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChainSettings {
    #[serde(default = "default_token_max")]
    pub token_max: usize,
    #[serde(default = "default_map_concurrency")]
    pub map_concurrency: usize,
    #[serde(default = "default_max_collapse_rounds")]
    pub max_collapse_rounds: usize,
}

fn default_token_max() -> usize {
    DEFAULT_TOKEN_MAX
}

fn default_map_concurrency() -> usize {
    DEFAULT_MAP_CONCURRENCY
}

fn default_max_collapse_rounds() -> usize {
    DEFAULT_MAX_COLLAPSE_ROUNDS
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            token_max: default_token_max(),
            map_concurrency: default_map_concurrency(),
            max_collapse_rounds: default_max_collapse_rounds(),
        }
    }
}

/// The prompts for one task. Unset fields fall back to the built-in defaults.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TaskConfig {
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub user_prompt: Option<String>,
}

/// Constructs a `config::Value` map of the default, hardcoded tasks from the library.
/// This serves as the base layer of configuration.
fn build_default_tasks() -> HashMap<String, ConfigValue> {
    let tasks = vec![
        (
            SUMMARIZE_MAP_TASK,
            (SUMMARIZE_MAP_SYSTEM_PROMPT, SUMMARIZE_MAP_USER_PROMPT),
        ),
        (
            SUMMARIZE_COMBINE_TASK,
            (SUMMARIZE_COMBINE_SYSTEM_PROMPT, SUMMARIZE_COMBINE_USER_PROMPT),
        ),
    ];

    tasks
        .into_iter()
        .map(|(name, (sys, user))| {
            let mut table = HashMap::new();
            table.insert("system_prompt".to_string(), ConfigValue::from(sys));
            table.insert("user_prompt".to_string(), ConfigValue::from(user));
            (
                name.to_string(),
                ConfigValue::new(None, ConfigValueKind::Table(table)),
            )
        })
        .collect()
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(format!("Invalid substitution pattern: {e}")))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from files and environment variables.
///
/// Layers, lowest priority first:
/// 1. Programmatic defaults (including the default task prompts).
/// 2. The main config file: `config_path_override` if given (it must exist),
///    otherwise `config.yml` next to this crate's manifest, if present.
/// 3. Optional prompt overrides from `prompt.yml`.
/// 4. Plain environment variables for top-level keys like `PORT`.
/// 5. `TEXTSUM_` prefixed variables for nested keys
///    (e.g., `TEXTSUM_SPLITTER__CHUNK_SIZE`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder()
        // Layer 1: Programmatic defaults from the library.
        .set_default("tasks", build_default_tasks())?;

    // Layer 2: Main Config
    match config_path_override {
        Some(override_path) => {
            let content = read_and_substitute(override_path)?.ok_or_else(|| {
                ConfigError::NotFound(format!(
                    "Config file not found at '{override_path}'."
                ))
            })?;
            info!("Loading configuration from '{override_path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None => {
            let user_config_path = format!("{base_path}/config.yml");
            if let Some(content) = read_and_substitute(&user_config_path)? {
                info!("Loading user-defined configuration from '{user_config_path}'.");
                builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
            } else {
                info!("'{user_config_path}' not found. Using built-in defaults.");
            }
        }
    }

    // Layer 3: User Prompt Overrides (Optional)
    let user_prompt_path = format!("{base_path}/prompt.yml");
    if let Some(user_prompts_content) = read_and_substitute(&user_prompt_path)? {
        info!("Loading user prompt overrides from '{user_prompt_path}'.");
        builder = builder.add_source(File::from_str(&user_prompts_content, FileFormat::Yaml));
    }

    let settings = builder
        // Layer 4: Load environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Layer 5: Load prefixed environment variables for deeper overrides.
        .add_source(
            Environment::with_prefix("TEXTSUM")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
