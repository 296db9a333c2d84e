//! # JSON Summarization Handler
//!
//! The programmatic counterpart of the HTML form. Outcomes that are not
//! failures (rejections, an unusable key, a summary) are all returned with
//! `200 OK` and distinguished by `status`.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use textsum::RawInput;
use tracing::info;

// --- API Payloads ---

#[derive(Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub api_key: String,
    /// Overrides the configured default model.
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SummarizeResponse {
    pub status: String,
    pub message: String,
}

/// The handler for the `/summarize` endpoint.
pub async fn summarize_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
    Json(payload): Json<SummarizeRequest>,
) -> Result<Json<ApiResponse<SummarizeResponse>>, AppError> {
    let text_chars = payload.text.chars().count();
    let model = payload
        .model
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| app_state.config.groq.default_model.clone());
    info!(text_chars, model = %model, "Received summarize request");

    let input = RawInput::new(payload.text, payload.api_key);
    let outcome = app_state
        .orchestrator
        .handle_with_model(&input, Some(&model))
        .await?;

    let debug_info = if debug_params.debug.unwrap_or(false) {
        let chunks = app_state.orchestrator.prepare_documents(&input.text).len();
        Some(json!({
            "text_chars": text_chars,
            "chunks": chunks,
            "model": model,
        }))
    } else {
        None
    };

    Ok(wrap_response(
        SummarizeResponse {
            status: outcome.status().to_string(),
            message: outcome.message().to_string(),
        },
        debug_params,
        debug_info,
    ))
}
