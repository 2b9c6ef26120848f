//! Scripted model client for tests and offline runs.
//!
//! [`MockProvider`] answers requests from canned replies keyed by the
//! request's task tag or role tag, records every request it sees, and can be
//! told to fail on a specific call.
//!
//! # Example
//!
//! ```rust,ignore
//! use scrivener::mock::MockProvider;
//!
//! let model = MockProvider::new()
//!     .with_response("research", "R")
//!     .with_response("fact_check", "F")
//!     .with_response("write", "W");
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::chat::{ChatProvider, ChatRequest, ChatResponse};
use crate::error::{LlmError, Result};

/// Reply used when no script matches the request.
pub const FALLBACK_RESPONSE: &str = "No response";

#[derive(Debug, Default)]
struct MockState {
    requests: Vec<ChatRequest>,
    cursors: HashMap<String, usize>,
}

/// A scripted [`ChatProvider`].
///
/// Replies are looked up by the request's `task` tag first, then its `role`
/// tag. A key with several replies cycles through them in order.
#[derive(Debug)]
pub struct MockProvider {
    model_id: String,
    scripts: HashMap<String, Vec<String>>,
    failures: HashMap<usize, LlmError>,
    delays: HashMap<usize, Duration>,
    state: Mutex<MockState>,
}

impl MockProvider {
    /// Create a mock with no scripted replies.
    #[must_use]
    pub fn new() -> Self {
        Self {
            model_id: "mock-model".to_owned(),
            scripts: HashMap::new(),
            failures: HashMap::new(),
            delays: HashMap::new(),
            state: Mutex::new(MockState::default()),
        }
    }

    /// Set the model ID reported as the default model.
    #[must_use]
    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    /// Reply with `text` to every request tagged `key`.
    #[must_use]
    pub fn with_response(self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.with_responses(key, [text])
    }

    /// Reply to requests tagged `key` with each of `texts` in turn, cycling.
    #[must_use]
    pub fn with_responses<I, S>(mut self, key: impl Into<String>, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scripts
            .insert(key.into(), texts.into_iter().map(Into::into).collect());
        self
    }

    /// Fail the `call`-th request (1-based) with `error`.
    #[must_use]
    pub fn fail_on_call(mut self, call: usize, error: LlmError) -> Self {
        self.failures.insert(call, error);
        self
    }

    /// Delay the `call`-th request (1-based) before replying.
    #[must_use]
    pub fn delay_call(mut self, call: usize, delay: Duration) -> Self {
        self.delays.insert(call, delay);
        self
    }

    /// Every request received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.lock().requests.clone()
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Role tags of every request received so far, in arrival order.
    #[must_use]
    pub fn role_sequence(&self) -> Vec<String> {
        self.lock()
            .requests
            .iter()
            .map(|r| r.role_tag().unwrap_or_default().to_owned())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_reply(
        state: &mut MockState,
        scripts: &HashMap<String, Vec<String>>,
        request: &ChatRequest,
    ) -> String {
        let key = [request.task_tag(), request.role_tag()]
            .into_iter()
            .flatten()
            .find(|k| scripts.contains_key(*k));

        let Some(key) = key else {
            return FALLBACK_RESPONSE.to_owned();
        };

        let replies = &scripts[key];
        let cursor = state.cursors.entry(key.to_owned()).or_insert(0);
        let reply = replies
            .get(*cursor % replies.len().max(1))
            .cloned()
            .unwrap_or_else(|| FALLBACK_RESPONSE.to_owned());
        *cursor += 1;
        reply
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let (call, reply) = {
            let mut state = self.lock();
            state.requests.push(request.clone());
            let call = state.requests.len();
            let reply = Self::next_reply(&mut state, &self.scripts, request);
            (call, reply)
        };

        if let Some(delay) = self.delays.get(&call) {
            tokio::time::sleep(*delay).await;
        }

        if let Some(error) = self.failures.get(&call) {
            return Err(error.clone().into());
        }

        Ok(ChatResponse::from_text(reply).with_model(self.model_id.clone()))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn default_model(&self) -> &str {
        &self.model_id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::chat::{ROLE_METADATA_KEY, TASK_METADATA_KEY};

    fn tagged(role: &str) -> ChatRequest {
        ChatRequest::new("m").user("x").tag(ROLE_METADATA_KEY, role)
    }

    #[tokio::test]
    async fn routes_by_role_tag() {
        let model = MockProvider::new()
            .with_response("research", "R")
            .with_response("write", "W");

        let r = model.chat(&tagged("research")).await.unwrap();
        let w = model.chat(&tagged("write")).await.unwrap();
        assert_eq!(r.text(), Some("R"));
        assert_eq!(w.text(), Some("W"));
        assert_eq!(model.role_sequence(), vec!["research", "write"]);
    }

    #[tokio::test]
    async fn task_tag_takes_precedence() {
        let model = MockProvider::new()
            .with_response("fact_check", "F")
            .with_response("cross_check", "X");

        let req = tagged("fact_check").tag(TASK_METADATA_KEY, "cross_check");
        assert_eq!(model.chat(&req).await.unwrap().text(), Some("X"));
        assert_eq!(
            model.chat(&tagged("fact_check")).await.unwrap().text(),
            Some("F")
        );
    }

    #[tokio::test]
    async fn cycles_responses_per_key() {
        let model = MockProvider::new().with_responses("research", ["first", "second"]);

        let mut texts = Vec::new();
        for _ in 0..3 {
            let resp = model.chat(&tagged("research")).await.unwrap();
            texts.push(resp.text().unwrap().to_owned());
        }
        assert_eq!(texts, vec!["first", "second", "first"]);
    }

    #[tokio::test]
    async fn unscripted_request_gets_fallback() {
        let model = MockProvider::new();
        let resp = model.chat(&tagged("research")).await.unwrap();
        assert_eq!(resp.text(), Some(FALLBACK_RESPONSE));
    }

    #[tokio::test]
    async fn fails_on_requested_call() {
        let model = MockProvider::new()
            .with_response("research", "R")
            .fail_on_call(2, LlmError::rate_limited("mock"));

        assert!(model.chat(&tagged("research")).await.is_ok());
        let err = model.chat(&tagged("research")).await.unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Llm(LlmError::RateLimited { .. })
        ));
        assert!(model.chat(&tagged("research")).await.is_ok());
        assert_eq!(model.call_count(), 3);
    }

    #[test]
    fn custom_model_id() {
        let model = MockProvider::new().with_model_id("custom-mock");
        assert_eq!(model.default_model(), "custom-mock");
        assert_eq!(model.provider_name(), "mock");
    }
}
