//! Unified error types for scrivener.
//!
//! This module provides the error hierarchy covering:
//! - Model client errors (authentication, rate limiting, transport)
//! - Pre-flight failures (missing credentials, invalid configuration)
//! - Fail-fast input validation
//! - Transcript persistence

pub use crate::llms::error::LlmError;

/// Result type alias for scrivener operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for scrivener.
///
/// Every variant aborts the current workflow run; nothing here is retried
/// except the transient [`LlmError`] kinds, and only when a
/// [`RetryPolicy`](crate::config::RetryPolicy) allows it.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Model client error.
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// No API key could be resolved before the first model call.
    #[error("Missing credentials: {0}")]
    CredentialMissing(String),

    /// Caller supplied input that can never produce a meaningful run.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be loaded or failed validation.
    #[error("Config error: {0}")]
    Config(String),

    /// Prompt template failed to render.
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a missing credentials error.
    #[must_use]
    pub fn credential_missing(msg: impl Into<String>) -> Self {
        Self::CredentialMissing(msg.into())
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the model client error if this error came from the model.
    #[must_use]
    pub const fn as_llm(&self) -> Option<&LlmError> {
        match self {
            Self::Llm(err) => Some(err),
            _ => None,
        }
    }
}

impl From<minijinja::Error> for Error {
    fn from(err: minijinja::Error) -> Self {
        Self::Prompt(err.to_string())
    }
}
