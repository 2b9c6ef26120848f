//! Research step.

use chrono::Utc;

use crate::error::Result;

use super::base::{AgentCore, agent_common};
use super::{AgentRole, ResearchResult, require_items, require_text};

/// Context substituted when the caller supplies none.
pub const DEFAULT_RESEARCH_CONTEXT: &str = "General overview needed";

/// Gathers structured findings on a topic.
#[derive(Debug, Clone)]
pub struct Researcher {
    core: AgentCore,
}

agent_common!(Researcher, AgentRole::Researcher);

impl Researcher {
    /// Research `topic`, optionally steered by free-form `context`.
    ///
    /// A blank context is replaced with a request for a general overview.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) for a
    /// blank topic, or the model error unchanged.
    pub async fn research(&self, topic: &str, context: &str) -> Result<ResearchResult> {
        require_text("topic", topic)?;
        let context = if context.trim().is_empty() {
            DEFAULT_RESEARCH_CONTEXT
        } else {
            context
        };

        let prompt = self.core.prompts.research(topic, context)?;
        let findings = self.core.complete("research", prompt).await?;

        Ok(self.result(topic, findings, None))
    }

    /// Research `topic` by answering each of `questions` in turn.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) for a
    /// blank topic or an empty question list, or the model error unchanged.
    pub async fn focused_research(
        &self,
        topic: &str,
        questions: &[String],
    ) -> Result<ResearchResult> {
        require_text("topic", topic)?;
        require_items("questions", questions)?;

        let prompt = self.core.prompts.focused_research(topic, questions)?;
        let findings = self.core.complete("focused_research", prompt).await?;

        Ok(self.result(topic, findings, Some(questions.to_vec())))
    }

    fn result(
        &self,
        topic: &str,
        findings: String,
        questions: Option<Vec<String>>,
    ) -> ResearchResult {
        ResearchResult {
            agent: self.name().to_owned(),
            topic: topic.to_owned(),
            findings,
            questions,
            needs_fact_checking: true,
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::clone_on_ref_ptr)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::Error;
    use crate::config::{AgentProfile, Settings};
    use crate::error::LlmError;
    use crate::mock::MockProvider;

    fn user_prompt(mock: &MockProvider, call: usize) -> String {
        mock.requests()[call].messages[1]
            .text()
            .unwrap_or_default()
            .to_owned()
    }

    #[tokio::test]
    async fn research_returns_findings_verbatim() {
        let mock = Arc::new(MockProvider::new().with_response("research", "  Tides: lunar.  "));
        let researcher = Researcher::new(mock.clone());

        let result = researcher.research("tides", "").await.unwrap();
        assert_eq!(result.agent, "Researcher");
        assert_eq!(result.topic, "tides");
        assert_eq!(result.findings, "  Tides: lunar.  ");
        assert!(result.needs_fact_checking);
        assert!(result.questions.is_none());

        let prompt = user_prompt(&mock, 0);
        assert!(prompt.contains("Additional context: General overview needed"));
        assert_eq!(mock.requests()[0].temperature, Some(0.7));
    }

    #[tokio::test]
    async fn context_is_passed_through() {
        let mock = Arc::new(MockProvider::new());
        Researcher::new(mock.clone())
            .research("tides", "Focus on this perspective: coastal")
            .await
            .unwrap();
        assert!(user_prompt(&mock, 0).contains("Additional context: Focus on this perspective: coastal"));
    }

    #[tokio::test]
    async fn focused_research_keeps_questions() {
        let mock = Arc::new(MockProvider::new().with_response("focused_research", "answers"));
        let questions = vec!["Why?".to_owned(), "How often?".to_owned()];

        let result = Researcher::new(mock.clone())
            .focused_research("tides", &questions)
            .await
            .unwrap();
        assert_eq!(result.findings, "answers");
        assert_eq!(result.questions.as_deref(), Some(questions.as_slice()));
        assert!(user_prompt(&mock, 0).contains("1. Why?\n2. How often?"));
    }

    #[tokio::test]
    async fn blank_inputs_fail_before_any_call() {
        let mock = Arc::new(MockProvider::new());
        let researcher = Researcher::new(mock.clone());

        assert!(matches!(
            researcher.research(" ", "ctx").await,
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            researcher.focused_research("tides", &[]).await,
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn model_errors_pass_through() {
        let mock = Arc::new(MockProvider::new().fail_on_call(1, LlmError::rate_limited("mock")));
        let err = Researcher::new(mock)
            .research("tides", "")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Llm(LlmError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn settings_drive_model_and_profile() {
        let mut settings = Settings::default();
        settings.provider.model = Some("deepseek-reasoner".to_owned());
        settings.agents.researcher = AgentProfile::with_temperature(0.2).max_tokens(512);

        let mock = Arc::new(MockProvider::new());
        let researcher = Researcher::from_settings(mock.clone(), &settings).unwrap();
        assert_eq!(researcher.model(), "deepseek-reasoner");

        researcher.research("tides", "").await.unwrap();
        let request = &mock.requests()[0];
        assert_eq!(request.model, "deepseek-reasoner");
        assert_eq!(request.max_tokens, Some(512));
    }

    #[tokio::test]
    async fn unset_model_keeps_client_default() {
        let mock = Arc::new(MockProvider::new());
        let researcher = Researcher::from_settings(mock.clone(), &Settings::default()).unwrap();
        assert_eq!(researcher.model(), "mock-model");

        researcher.research("tides", "").await.unwrap();
        assert_eq!(mock.requests()[0].model, "mock-model");
    }

    #[test]
    fn invalid_profile_is_rejected() {
        let result = Researcher::new(Arc::new(MockProvider::new()))
            .with_profile(AgentProfile::with_temperature(2.5));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn repeated_research_is_identical_apart_from_timestamp() {
        let mock = Arc::new(
            MockProvider::new()
                .with_response("research", "R")
                .with_response("focused_research", "Q"),
        );
        let researcher = Researcher::new(mock);
        let questions = ["Why two tides a day?".to_owned()];

        let first = researcher.research("tides", "coastal").await.unwrap();
        let mut second = researcher.research("tides", "coastal").await.unwrap();
        second.generated_at = first.generated_at;
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );

        let first = researcher.focused_research("tides", &questions).await.unwrap();
        let mut second = researcher.focused_research("tides", &questions).await.unwrap();
        second.generated_at = first.generated_at;
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
