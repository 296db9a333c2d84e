use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use textsum::PromptError;
use tracing::error;

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the server,
/// allowing them to be converted into appropriate HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors originating from the summarization pipeline.
    Prompt(PromptError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<PromptError> for AppError {
    fn from(err: PromptError) -> Self {
        AppError::Prompt(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl AppError {
    /// The status code and user-facing message for this error.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Prompt(err) => match err {
                PromptError::AiRequest(e) => (
                    StatusCode::BAD_GATEWAY,
                    format!("Request to AI provider failed: {e}"),
                ),
                PromptError::AiDeserialization(e) => (
                    StatusCode::BAD_GATEWAY,
                    format!("Failed to deserialize AI provider response: {e}"),
                ),
                PromptError::AiApi(e) => {
                    (StatusCode::BAD_GATEWAY, format!("AI provider error: {e}"))
                }
                PromptError::ReqwestClientBuild(e) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to build HTTP client: {e}"),
                ),
                PromptError::NoDocuments
                | PromptError::DocumentTooLong { .. }
                | PromptError::CollapseLimit { .. }
                | PromptError::TextSplit(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Summarization failed: {err}"),
                ),
            },
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred.".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Prompt(err) => error!("PromptError: {:?}", err),
            AppError::Internal(err) => error!("Internal server error: {:?}", err),
        }
        let (status_code, error_message) = self.status_and_message();

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
