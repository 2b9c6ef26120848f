//! Shared request path for the three agents.

use tracing::{debug, warn};

use crate::chat::{ChatRequest, ROLE_METADATA_KEY, SharedChatProvider, TASK_METADATA_KEY};
use crate::config::{AgentProfile, RetryPolicy, Settings};
use crate::error::{Error, Result};
use crate::prompts::PromptRender;

use super::AgentRole;

/// Provider, sampling profile and templates for one role.
#[derive(Clone)]
pub(crate) struct AgentCore {
    pub(crate) role: AgentRole,
    provider: SharedChatProvider,
    model: String,
    profile: AgentProfile,
    retry: RetryPolicy,
    pub(crate) prompts: PromptRender,
}

impl std::fmt::Debug for AgentCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentCore")
            .field("role", &self.role)
            .field("provider", &self.provider.provider_name())
            .field("model", &self.model)
            .field("profile", &self.profile)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl AgentCore {
    pub(crate) fn new(role: AgentRole, provider: SharedChatProvider) -> Self {
        let model = provider.default_model().to_owned();
        Self {
            role,
            provider,
            model,
            profile: AgentProfile::with_temperature(role.default_temperature()),
            retry: RetryPolicy::none(),
            prompts: PromptRender::default(),
        }
    }

    pub(crate) fn from_settings(
        role: AgentRole,
        provider: SharedChatProvider,
        settings: &Settings,
    ) -> Result<Self> {
        let mut core = Self::new(role, provider);
        if let Some(model) = &settings.provider.model {
            core.model.clone_from(model);
        }
        core.retry = settings.retry;
        core.set_profile(*role.profile_in(settings))?;
        Ok(core)
    }

    pub(crate) fn set_profile(&mut self, profile: AgentProfile) -> Result<()> {
        validate_profile(&profile)?;
        self.profile = profile;
        Ok(())
    }

    pub(crate) fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    pub(crate) const fn set_retry(&mut self, retry: RetryPolicy) {
        self.retry = retry;
    }

    pub(crate) fn model(&self) -> &str {
        &self.model
    }

    pub(crate) const fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    /// Send one completion for `task` and return the reply text verbatim.
    ///
    /// Transient failures are retried per the retry policy; anything else,
    /// and the last transient failure, is returned unchanged.
    pub(crate) async fn complete(&self, task: &str, prompt: String) -> Result<String> {
        let mut request = ChatRequest::new(self.model.clone())
            .system(self.prompts.system(self.role))
            .user(prompt)
            .temperature(self.profile.temperature)
            .tag(ROLE_METADATA_KEY, self.role.tag())
            .tag(TASK_METADATA_KEY, task);
        if let Some(max_tokens) = self.profile.max_tokens {
            request = request.max_tokens(max_tokens);
        }

        debug!(
            role = self.role.tag(),
            task,
            model = %self.model,
            prompt_len = request.prompt_len(),
            "sending agent request"
        );

        let mut attempt = 0;
        let response = loop {
            match self.provider.chat(&request).await {
                Ok(response) => break response,
                Err(Error::Llm(err)) if err.is_retryable() && attempt < self.retry.max_retries => {
                    let backoff = self.retry.backoff(attempt);
                    attempt += 1;
                    warn!(
                        role = self.role.tag(),
                        task,
                        attempt,
                        backoff_ms = u64::try_from(backoff.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "retrying model call"
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(err) => return Err(err),
            }
        };

        if response.stop_reason.is_truncated() {
            warn!(role = self.role.tag(), task, "model output was truncated");
        }

        let text = response.text().unwrap_or_default().to_owned();
        debug!(role = self.role.tag(), task, reply_len = text.len(), "agent reply received");
        Ok(text)
    }
}

/// Builder and accessor methods shared by the three agent types.
macro_rules! agent_common {
    ($agent:ident, $role:expr) => {
        impl $agent {
            /// Create an agent with its role defaults: the provider's default
            /// model, the role's default temperature, and no retries.
            #[must_use]
            pub fn new(provider: $crate::chat::SharedChatProvider) -> Self {
                Self {
                    core: $crate::agent::base::AgentCore::new($role, provider),
                }
            }

            /// Create an agent from settings.
            ///
            /// # Errors
            ///
            /// Returns [`Error::InvalidInput`]($crate::Error::InvalidInput)
            /// when this role's profile is out of range.
            pub fn from_settings(
                provider: $crate::chat::SharedChatProvider,
                settings: &$crate::config::Settings,
            ) -> $crate::Result<Self> {
                Ok(Self {
                    core: $crate::agent::base::AgentCore::from_settings($role, provider, settings)?,
                })
            }

            /// Set the model identifier.
            #[must_use]
            pub fn with_model(mut self, model: impl Into<String>) -> Self {
                self.core.set_model(model);
                self
            }

            /// Set the retry policy.
            #[must_use]
            pub const fn with_retry(mut self, retry: $crate::config::RetryPolicy) -> Self {
                self.core.set_retry(retry);
                self
            }

            /// Set the sampling profile.
            ///
            /// # Errors
            ///
            /// Returns [`Error::InvalidInput`]($crate::Error::InvalidInput)
            /// when the temperature is outside `[0, 2]` or `max_tokens` is 0.
            pub fn with_profile(
                mut self,
                profile: $crate::config::AgentProfile,
            ) -> $crate::Result<Self> {
                self.core.set_profile(profile)?;
                Ok(self)
            }

            /// Replace the prompt templates.
            #[must_use]
            pub fn with_templates(mut self, templates: $crate::prompts::PromptTemplates) -> Self {
                self.core.prompts = $crate::prompts::PromptRender::new(templates);
                self
            }

            /// Agent name recorded in results.
            #[must_use]
            pub const fn name(&self) -> &'static str {
                self.core.role.name()
            }

            /// Model identifier sent with requests.
            #[must_use]
            pub fn model(&self) -> &str {
                self.core.model()
            }

            /// Sampling profile.
            #[must_use]
            pub const fn profile(&self) -> &$crate::config::AgentProfile {
                self.core.profile()
            }
        }
    };
}

pub(crate) use agent_common;

fn validate_profile(profile: &AgentProfile) -> Result<()> {
    if !(0.0..=2.0).contains(&profile.temperature) {
        return Err(Error::invalid_input(format!(
            "temperature {} is outside [0, 2]",
            profile.temperature
        )));
    }
    if profile.max_tokens == Some(0) {
        return Err(Error::invalid_input("max_tokens must be at least 1"));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::LlmError;
    use crate::mock::MockProvider;

    #[tokio::test]
    async fn request_carries_profile_and_tags() {
        let mock = Arc::new(MockProvider::new().with_response("summary", "S"));
        let mut core = AgentCore::new(AgentRole::Writer, mock.clone());
        core.set_profile(AgentProfile::with_temperature(0.5).max_tokens(900))
            .unwrap();

        let text = core.complete("summary", "Summarise".to_owned()).await.unwrap();
        assert_eq!(text, "S");

        let request = &mock.requests()[0];
        assert_eq!(request.model, "mock-model");
        assert_eq!(request.temperature, Some(0.5));
        assert_eq!(request.max_tokens, Some(900));
        assert_eq!(request.role_tag(), Some("write"));
        assert_eq!(request.task_tag(), Some("summary"));
        assert_eq!(request.messages.len(), 2);
    }

    #[test]
    fn rejects_out_of_range_profile() {
        let mut core = AgentCore::new(AgentRole::Researcher, Arc::new(MockProvider::new()));
        let err = core
            .set_profile(AgentProfile::with_temperature(-0.1))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(core
            .set_profile(AgentProfile::with_temperature(1.0).max_tokens(0))
            .is_err());
        assert!(core.set_profile(AgentProfile::with_temperature(2.0)).is_ok());
    }

    #[tokio::test]
    async fn no_retry_by_default() {
        let mock = Arc::new(
            MockProvider::new()
                .with_response("research", "R")
                .fail_on_call(1, LlmError::network("connection reset")),
        );
        let core = AgentCore::new(AgentRole::Researcher, mock.clone());

        let err = core.complete("research", "x".to_owned()).await.unwrap_err();
        assert!(matches!(err, Error::Llm(LlmError::Network(_))));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn retries_transient_errors() {
        let mock = Arc::new(
            MockProvider::new()
                .with_response("research", "R")
                .fail_on_call(1, LlmError::rate_limited("mock"))
                .fail_on_call(2, LlmError::network("reset")),
        );
        let mut core = AgentCore::new(AgentRole::Researcher, mock.clone());
        core.set_retry(
            RetryPolicy::none()
                .with_max_retries(2)
                .with_initial_backoff_ms(1),
        );

        let text = core.complete("research", "x".to_owned()).await.unwrap();
        assert_eq!(text, "R");
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let mock = Arc::new(
            MockProvider::new()
                .fail_on_call(1, LlmError::network("a"))
                .fail_on_call(2, LlmError::network("b")),
        );
        let mut core = AgentCore::new(AgentRole::FactChecker, mock.clone());
        core.set_retry(
            RetryPolicy::none()
                .with_max_retries(1)
                .with_initial_backoff_ms(1),
        );

        let err = core.complete("fact_check", "x".to_owned()).await.unwrap_err();
        assert!(matches!(err, Error::Llm(LlmError::Network(ref m)) if m == "b"));
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn auth_errors_are_not_retried() {
        let mock = Arc::new(MockProvider::new().fail_on_call(1, LlmError::auth("mock", "bad key")));
        let mut core = AgentCore::new(AgentRole::Writer, mock.clone());
        core.set_retry(RetryPolicy::none().with_max_retries(3));

        assert!(core.complete("write", "x".to_owned()).await.is_err());
        assert_eq!(mock.call_count(), 1);
    }
}
