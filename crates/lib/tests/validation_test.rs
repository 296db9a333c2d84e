//! # Input Validation Tests
//!
//! Validates the pure checks that run before any model call: text emptiness
//! first, then the credential prefix.

use textsum::validation::{validate_input, ValidationOutcome};

#[test]
fn test_whitespace_only_text_is_empty_regardless_of_credential() {
    for text in ["", " ", "\n\n", "\t  \r\n"] {
        for credential in ["", "gsk-live-abc", "invalid-key"] {
            assert_eq!(
                validate_input(text, credential),
                ValidationOutcome::EmptyText,
                "text {text:?} with credential {credential:?}"
            );
        }
    }
}

#[test]
fn test_credentials_without_prefix_are_rejected() {
    for credential in ["", "invalid-key", "GSK-upper", " gsk-leading-space", "sk-openai", "gs"] {
        assert_eq!(
            validate_input("Hello world.", credential),
            ValidationOutcome::InvalidCredentialFormat,
            "credential {credential:?}"
        );
    }
}

#[test]
fn test_prefixed_credential_with_text_is_valid() {
    assert_eq!(
        validate_input("Hello world.", "gsk-live-validformat"),
        ValidationOutcome::Valid
    );
    // The prefix alone is enough; nothing else about the key is checked.
    assert_eq!(validate_input("x", "gsk"), ValidationOutcome::Valid);
}

#[test]
fn test_messages_match_each_outcome() {
    assert_eq!(ValidationOutcome::Valid.message(), None);
    assert_eq!(
        ValidationOutcome::EmptyText.message(),
        Some("Please enter some text.")
    );
    assert_eq!(
        ValidationOutcome::InvalidCredentialFormat.message(),
        Some("Please enter a valid Groq API Key.")
    );
}
