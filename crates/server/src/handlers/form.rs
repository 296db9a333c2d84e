//! # HTML Form Handlers
//!
//! Serves the single-page form and handles its submissions. The page is
//! re-rendered on every submit with the text preserved and the key field empty.

use super::{AppError, AppState};
use crate::views::render_page;
use axum::{extract::State, response::Html, Form};
use serde::Deserialize;
use textsum::RawInput;
use tracing::info;

/// The fields posted by the HTML form.
#[derive(Deserialize)]
pub struct SummarizeForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub groq_api_key: String,
}

/// Renders the empty form (`GET /`).
pub async fn form_page() -> Html<String> {
    Html(render_page("", None))
}

/// Handles a form submission (`POST /`).
pub async fn form_submit(
    State(app_state): State<AppState>,
    Form(form): Form<SummarizeForm>,
) -> Result<Html<String>, AppError> {
    info!(
        text_chars = form.text.chars().count(),
        "Received form submission"
    );
    let input = RawInput::new(form.text, form.groq_api_key);
    let outcome = app_state.orchestrator.handle(&input).await?;
    Ok(Html(render_page(&input.text, Some(&outcome))))
}
