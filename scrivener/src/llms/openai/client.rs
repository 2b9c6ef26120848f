//! OpenAI-compatible API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::chat::ChatRequest;
use crate::error::{LlmError, Result};
use crate::message::Message;

use super::config::OpenAIConfig;
use super::types::{OpenAIChatRequest, OpenAIErrorResponse, OpenAIMessage};

/// OpenAI-compatible API client (DeepSeek, OpenAI).
#[derive(Debug, Clone)]
pub struct OpenAI {
    pub(crate) config: Arc<OpenAIConfig>,
    pub(crate) client: Client,
}

impl OpenAI {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Fails with an auth error when the API key is empty, or an internal
    /// error when the HTTP client cannot be built.
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        if config.credentials.api_key.is_empty() {
            return Err(LlmError::auth(config.provider().as_str(), "API key is required").into());
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        let client = builder
            .build()
            .map_err(|e| LlmError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// Create a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CredentialMissing`](crate::Error::CredentialMissing)
    /// when no key is set.
    pub fn from_env() -> Result<Self> {
        Self::new(OpenAIConfig::from_env()?)
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.credentials.base_url
    }

    /// Get the default model.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Build the chat completions URL.
    pub(crate) fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url().trim_end_matches('/'))
    }

    /// Build request headers for JSON requests.
    pub(crate) fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.credentials.api_key),
            )
            .header("Content-Type", "application/json")
    }

    /// Convert Message to wire format.
    pub(crate) fn convert_message(msg: &Message) -> OpenAIMessage {
        OpenAIMessage {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone(),
        }
    }

    /// Build the request body.
    pub(crate) fn build_body(&self, request: &ChatRequest) -> OpenAIChatRequest {
        let model = if request.model.is_empty() {
            self.config.model.clone()
        } else {
            request.model.clone()
        };

        OpenAIChatRequest {
            model,
            messages: request.messages.iter().map(Self::convert_message).collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream: false,
        }
    }

    /// Parse an error response.
    pub(crate) fn parse_error(&self, status: u16, body: &str) -> LlmError {
        let provider = self.config.provider().as_str();

        if let Ok(error_response) = serde_json::from_str::<OpenAIErrorResponse>(body) {
            let error = error_response.error;

            return match status {
                401 | 403 => LlmError::auth(provider, error.message),
                429 => LlmError::rate_limited(provider),
                400 if error.message.contains("context_length")
                    || error.message.contains("maximum context length") =>
                {
                    LlmError::context_exceeded(error.message)
                }
                s if s >= 500 => LlmError::http_status(s, error.message),
                _ => match error.code.or(error.error_type) {
                    Some(code) => LlmError::provider_code(provider, code, error.message),
                    None => LlmError::provider(provider, error.message),
                },
            };
        }

        match status {
            401 | 403 => LlmError::auth(provider, body.to_owned()),
            429 => LlmError::rate_limited(provider),
            _ => LlmError::http_status(status, body.to_owned()),
        }
    }
}
