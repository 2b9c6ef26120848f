//! OpenAI-compatible ChatProvider implementation.

use async_trait::async_trait;
use tracing::trace;

use crate::chat::{ChatProvider, ChatRequest, ChatResponse, StopReason};
use crate::error::{LlmError, Result};
use crate::message::{Message, Role};

use super::client::OpenAI;
use super::types::OpenAIChatResponse;

impl OpenAI {
    /// Parse the response into ChatResponse.
    pub(crate) fn parse_response(response: OpenAIChatResponse) -> Result<ChatResponse> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::response_format("at least one choice", "empty choices"))?;

        let stop_reason = choice
            .finish_reason
            .as_deref()
            .map_or(StopReason::Stop, StopReason::parse);

        // A refusal is still text the caller should see verbatim.
        let content = choice.message.content.or(choice.message.refusal);

        Ok(ChatResponse {
            message: Message {
                role: Role::Assistant,
                content,
            },
            stop_reason,
            usage: response.usage,
            model: Some(response.model),
            id: Some(response.id),
        })
    }
}

#[async_trait]
impl ChatProvider for OpenAI {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = self.chat_url();
        let body = self.build_body(request);
        trace!(url = %url, model = %body.model, "sending chat completion");

        let response = self
            .build_request(&url)
            .json(&body)
            .send()
            .await
            .map_err(LlmError::from)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(self.parse_error(status.as_u16(), &error_text).into());
        }

        let response_text = response.text().await.map_err(LlmError::from)?;
        let parsed: OpenAIChatResponse = serde_json::from_str(&response_text).map_err(|e| {
            LlmError::response_format(
                "valid chat completion response",
                format!("parse error: {e}, response: {response_text}"),
            )
        })?;

        Self::parse_response(parsed)
    }

    fn provider_name(&self) -> &'static str {
        self.config.provider().as_str()
    }

    fn default_model(&self) -> &str {
        self.model()
    }
}
