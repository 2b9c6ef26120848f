//! Error types for model client operations.
//!
//! [`LlmError`] covers every failure mode at the model client boundary
//! (authentication, rate limiting, transport, malformed responses).
//! It integrates into the crate-wide [`Error`](crate::Error) via `Error::Llm`
//! and is never caught by the agents or the orchestrator.

/// Error type for model client operations.
///
/// Each variant is a distinct failure mode so callers can pattern-match
/// on specific cases (e.g., retrying transient errors).
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum LlmError {
    /// Authentication or authorization failure.
    #[error("[{provider}] {message}")]
    Auth {
        /// Provider name (e.g., "openai", "deepseek").
        provider: String,
        /// Error description.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("[{provider}] Rate limit exceeded. Please retry after some time.")]
    RateLimited {
        /// Provider name.
        provider: String,
    },

    /// Context length exceeded.
    #[error("Context length exceeded: {0}")]
    ContextExceeded(String),

    /// Response format error.
    #[error("Expected {expected}, got {got}")]
    ResponseFormat {
        /// Expected format description.
        expected: String,
        /// Actual format received.
        got: String,
    },

    /// Network or connection error.
    #[error("{0}")]
    Network(String),

    /// HTTP status error.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Provider-specific error.
    #[error("[{provider}] {message}")]
    Provider {
        /// Provider name.
        provider: String,
        /// Error description.
        message: String,
        /// Optional error code from the provider.
        code: Option<String>,
    },

    /// Internal error.
    #[error("{0}")]
    Internal(String),
}

impl LlmError {
    /// Create an authentication error.
    #[must_use]
    pub fn auth(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Auth {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a rate limit error.
    #[must_use]
    pub fn rate_limited(provider: impl Into<String>) -> Self {
        Self::RateLimited {
            provider: provider.into(),
        }
    }

    /// Create a context exceeded error.
    #[must_use]
    pub fn context_exceeded(message: impl Into<String>) -> Self {
        Self::ContextExceeded(message.into())
    }

    /// Create a response format error.
    #[must_use]
    pub fn response_format(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Self::ResponseFormat {
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Create a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create an HTTP status error.
    #[must_use]
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a provider-specific error.
    #[must_use]
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
            code: None,
        }
    }

    /// Create a provider error with an error code.
    #[must_use]
    pub fn provider_code(
        provider: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
            code: Some(code.into()),
        }
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a transient error worth retrying.
    ///
    /// Rate limits, transport failures and 5xx responses qualify.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Network(_) => true,
            Self::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network("Request timed out")
        } else if err.is_connect() {
            Self::network(format!("Connection failed: {err}"))
        } else {
            Self::network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_display_includes_provider() {
        let err = LlmError::auth("deepseek", "Invalid API key");
        assert_eq!(err.to_string(), "[deepseek] Invalid API key");
    }

    #[test]
    fn http_status_display() {
        let err = LlmError::http_status(502, "Bad Gateway");
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn retryable_kinds() {
        assert!(LlmError::rate_limited("openai").is_retryable());
        assert!(LlmError::network("reset by peer").is_retryable());
        assert!(LlmError::http_status(503, "unavailable").is_retryable());
    }

    #[test]
    fn non_retryable_kinds() {
        assert!(!LlmError::auth("openai", "bad key").is_retryable());
        assert!(!LlmError::http_status(400, "bad request").is_retryable());
        assert!(!LlmError::internal("bug").is_retryable());
        assert!(!LlmError::response_format("json", "text").is_retryable());
    }

    #[test]
    fn provider_code_keeps_code() {
        let err = LlmError::provider_code("openai", "model_not_found", "no such model");
        assert!(matches!(
            err,
            LlmError::Provider { code: Some(ref c), .. } if c == "model_not_found"
        ));
    }
}
