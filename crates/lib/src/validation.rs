//! # Input Validation
//!
//! Checks a submission before any network call is made. Text emptiness is
//! checked before the credential format, so only one message is ever shown.

/// Every Groq API key starts with this literal prefix.
pub const CREDENTIAL_PREFIX: &str = "gsk";

/// The result of validating a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    EmptyText,
    InvalidCredentialFormat,
}

impl ValidationOutcome {
    /// The warning shown to the user, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::EmptyText => Some("Please enter some text."),
            ValidationOutcome::InvalidCredentialFormat => {
                Some("Please enter a valid Groq API Key.")
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }
}

/// Validates the text and credential of a submission.
pub fn validate_input(text: &str, credential: &str) -> ValidationOutcome {
    if text.trim().is_empty() {
        ValidationOutcome::EmptyText
    } else if !credential.starts_with(CREDENTIAL_PREFIX) {
        ValidationOutcome::InvalidCredentialFormat
    } else {
        ValidationOutcome::Valid
    }
}
