//! Chat types and the model client boundary.
//!
//! This module provides:
//! - [`ChatRequest`]: Request parameters for chat completions
//! - [`ChatResponse`]: Response from chat completions
//! - [`ChatProvider`]: The one operation every model backend implements
//!
//! # Example
//!
//! ```rust,ignore
//! use scrivener::prelude::*;
//!
//! let request = ChatRequest::new("deepseek-chat")
//!     .system("You are an expert researcher.")
//!     .user("Research the following topic: tides")
//!     .max_tokens(2048)
//!     .temperature(0.7);
//!
//! let response = provider.chat(&request).await?;
//! println!("{}", response.text().unwrap_or_default());
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::Message;
use crate::usage::Usage;

/// Metadata key carrying the agent role tag (`research`, `fact_check`, `write`).
pub const ROLE_METADATA_KEY: &str = "role";

/// Metadata key carrying the agent operation name (e.g. `cross_check`).
pub const TASK_METADATA_KEY: &str = "task";

/// A chat completion request to an LLM.
///
/// Metadata is local routing information for providers and logs; it is
/// never sent over the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier (e.g., "deepseek-chat", "gpt-4o").
    #[serde(default)]
    pub model: String,

    /// Conversation messages.
    #[serde(default)]
    pub messages: Vec<Message>,

    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Local key-value tags.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl ChatRequest {
    /// Creates a new request with the specified model.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Adds a system message.
    #[must_use]
    pub fn system(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::system(content));
        self
    }

    /// Adds a user message.
    #[must_use]
    pub fn user(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::user(content));
        self
    }

    /// Sets max tokens.
    #[must_use]
    pub const fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sets temperature.
    #[must_use]
    pub const fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Adds a metadata tag.
    #[must_use]
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Returns the role tag, if set.
    #[must_use]
    pub fn role_tag(&self) -> Option<&str> {
        self.metadata.get(ROLE_METADATA_KEY).map(String::as_str)
    }

    /// Returns the task tag, if set.
    #[must_use]
    pub fn task_tag(&self) -> Option<&str> {
        self.metadata.get(TASK_METADATA_KEY).map(String::as_str)
    }

    /// Total characters across all message contents.
    #[must_use]
    pub fn prompt_len(&self) -> usize {
        self.messages
            .iter()
            .filter_map(Message::text)
            .map(str::len)
            .sum()
    }
}

/// Why the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum StopReason {
    /// Natural stop (end of response).
    #[default]
    Stop,
    /// Maximum token limit reached.
    Length,
    /// Content was filtered by safety systems.
    ContentFilter,
}

impl StopReason {
    /// Parse a provider finish reason (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "length" | "max_tokens" => Self::Length,
            "content_filter" => Self::ContentFilter,
            _ => Self::Stop,
        }
    }

    /// Returns `true` if the response was truncated due to length.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        matches!(self, Self::Length)
    }
}

/// A chat completion response from an LLM.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The generated message.
    pub message: Message,

    /// Why the model stopped generating.
    pub stop_reason: StopReason,

    /// Token usage statistics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,

    /// Model identifier used for this response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Unique completion ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ChatResponse {
    /// Creates a new response with a message.
    #[must_use]
    pub const fn new(message: Message) -> Self {
        Self {
            message,
            stop_reason: StopReason::Stop,
            usage: None,
            model: None,
            id: None,
        }
    }

    /// Creates a response from text content.
    #[must_use]
    pub fn from_text(content: impl Into<String>) -> Self {
        Self::new(Message::assistant(content))
    }

    /// Sets the stop reason.
    #[must_use]
    pub const fn with_stop_reason(mut self, reason: StopReason) -> Self {
        self.stop_reason = reason;
        self
    }

    /// Sets usage statistics.
    #[must_use]
    pub const fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Returns the text content of the response.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.message.text()
    }
}

/// The model client boundary.
///
/// Implementations accept a role-specific prompt plus sampling settings and
/// return a completion. Errors are surfaced as [`LlmError`](crate::LlmError)
/// inside [`Error::Llm`](crate::Error::Llm); callers never see them swallowed.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a chat completion request and receive a complete response.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;

    /// Get the name of this provider.
    ///
    /// Used for error messages and logging.
    fn provider_name(&self) -> &'static str;

    /// Get the default model for this provider.
    fn default_model(&self) -> &str;
}

/// Type alias for an Arc-wrapped ChatProvider.
pub type SharedChatProvider = Arc<dyn ChatProvider>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::message::Role;

    mod chat_request {
        use super::*;

        #[test]
        fn new_creates_with_model() {
            let req = ChatRequest::new("deepseek-chat");
            assert_eq!(req.model, "deepseek-chat");
            assert!(req.messages.is_empty());
            assert!(req.metadata.is_empty());
        }

        #[test]
        fn system_then_user_keeps_order() {
            let req = ChatRequest::new("m").system("sys").user("hi");
            assert_eq!(req.messages.len(), 2);
            assert_eq!(req.messages[0].role, Role::System);
            assert_eq!(req.messages[1].role, Role::User);
        }

        #[test]
        fn sampling_settings() {
            let req = ChatRequest::new("m").max_tokens(100).temperature(0.3);
            assert_eq!(req.max_tokens, Some(100));
            assert_eq!(req.temperature, Some(0.3));
        }

        #[test]
        fn tags_are_readable() {
            let req = ChatRequest::new("m")
                .tag(ROLE_METADATA_KEY, "fact_check")
                .tag(TASK_METADATA_KEY, "cross_check");
            assert_eq!(req.role_tag(), Some("fact_check"));
            assert_eq!(req.task_tag(), Some("cross_check"));
        }

        #[test]
        fn prompt_len_sums_messages() {
            let req = ChatRequest::new("m").system("abc").user("de");
            assert_eq!(req.prompt_len(), 5);
        }
    }

    mod chat_response {
        use super::*;

        #[test]
        fn from_text_is_assistant() {
            let resp = ChatResponse::from_text("hello");
            assert_eq!(resp.message.role, Role::Assistant);
            assert_eq!(resp.text(), Some("hello"));
            assert_eq!(resp.stop_reason, StopReason::Stop);
        }

        #[test]
        fn builders_set_fields() {
            let resp = ChatResponse::from_text("x")
                .with_model("gpt-4o")
                .with_usage(Usage::new(1, 2))
                .with_stop_reason(StopReason::Length);
            assert_eq!(resp.model.as_deref(), Some("gpt-4o"));
            assert_eq!(resp.usage.unwrap().total_tokens, 3);
            assert!(resp.stop_reason.is_truncated());
        }
    }

    #[test]
    fn stop_reason_parse() {
        assert_eq!(StopReason::parse("length"), StopReason::Length);
        assert_eq!(StopReason::parse("MAX_TOKENS"), StopReason::Length);
        assert_eq!(StopReason::parse("content_filter"), StopReason::ContentFilter);
        assert_eq!(StopReason::parse("stop"), StopReason::Stop);
        assert_eq!(StopReason::parse("whatever"), StopReason::Stop);
    }
}
