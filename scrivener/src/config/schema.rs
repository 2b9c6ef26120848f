//! Configuration schema definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::llms::OpenAIConfig;

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Model endpoint settings.
    pub provider: ProviderSettings,
    /// Per-role sampling settings.
    pub agents: AgentsSettings,
    /// Retry behaviour for transient model errors.
    pub retry: RetryPolicy,
    /// Workflow behaviour.
    pub workflow: WorkflowSettings,
}

/// Model endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Model identifier sent with every request. When unset, each agent
    /// uses its client's default, which depends on the resolved provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Endpoint override, taking precedence over the environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            model: None,
            timeout_secs: OpenAIConfig::DEFAULT_TIMEOUT_SECS,
            base_url: None,
        }
    }
}

/// Sampling settings for each of the three roles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentsSettings {
    /// Research step.
    pub researcher: AgentProfile,
    /// Fact-check step. Runs cooler for more consistent verdicts.
    pub fact_checker: AgentProfile,
    /// Writer step.
    pub writer: AgentProfile,
}

impl Default for AgentsSettings {
    fn default() -> Self {
        Self {
            researcher: AgentProfile::with_temperature(0.7),
            fact_checker: AgentProfile::with_temperature(0.3),
            writer: AgentProfile::with_temperature(0.7),
        }
    }
}

/// Sampling parameters for one agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentProfile {
    /// Sampling temperature in `[0, 2]`.
    pub temperature: f32,
    /// Completion budget. `None` leaves it to the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl AgentProfile {
    /// A profile with the given temperature and no token cap.
    #[must_use]
    pub const fn with_temperature(temperature: f32) -> Self {
        Self {
            temperature,
            max_tokens: None,
        }
    }

    /// Set the completion budget.
    #[must_use]
    pub const fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    fn check(&self, path: &str, issues: &mut Vec<ConfigIssue>) {
        if !(0.0..=2.0).contains(&self.temperature) {
            issues.push(ConfigIssue::error(
                format!("{path}.temperature"),
                format!("temperature {} is outside [0, 2]", self.temperature),
            ));
        }
        if self.max_tokens == Some(0) {
            issues.push(ConfigIssue::error(
                format!("{path}.max_tokens"),
                "max_tokens must be at least 1",
            ));
        }
    }
}

impl Default for AgentProfile {
    fn default() -> Self {
        Self::with_temperature(0.7)
    }
}

/// Retry policy for transient model errors.
///
/// Only errors where [`LlmError::is_retryable`](crate::LlmError::is_retryable)
/// holds are retried. The default performs no retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Backoff before the first retry.
    pub initial_backoff_ms: u64,
    /// Upper bound on any single backoff.
    pub max_backoff_ms: u64,
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            initial_backoff_ms: 500,
            max_backoff_ms: 8_000,
        }
    }

    /// Set the retry count.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the initial backoff.
    #[must_use]
    pub const fn with_initial_backoff_ms(mut self, ms: u64) -> Self {
        self.initial_backoff_ms = ms;
        self
    }

    /// Backoff before retry number `retry` (0-based): `initial × 2^retry`,
    /// capped at `max_backoff_ms`.
    #[must_use]
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 1_u64.checked_shl(retry).unwrap_or(u64::MAX);
        let ms = self
            .initial_backoff_ms
            .saturating_mul(factor)
            .min(self.max_backoff_ms);
        Duration::from_millis(ms)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// Workflow behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowSettings {
    /// Run comparative perspective research concurrently.
    pub parallel_research: bool,
    /// Paragraph cap for workflow summaries.
    pub summary_paragraphs: u32,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            parallel_research: true,
            summary_paragraphs: 3,
        }
    }
}

impl Settings {
    /// Validate the configuration and return any issues found.
    #[must_use]
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self
            .provider
            .model
            .as_deref()
            .is_some_and(|model| model.trim().is_empty())
        {
            issues.push(ConfigIssue::error("provider.model", "model must not be empty"));
        }
        if self.provider.timeout_secs == 0 {
            issues.push(ConfigIssue::warning(
                "provider.timeout_secs",
                "timeout is 0, requests will time out immediately",
            ));
        }

        self.agents.researcher.check("agents.researcher", &mut issues);
        self.agents.fact_checker.check("agents.fact_checker", &mut issues);
        self.agents.writer.check("agents.writer", &mut issues);

        if self.retry.max_backoff_ms < self.retry.initial_backoff_ms {
            issues.push(ConfigIssue::warning(
                "retry.max_backoff_ms",
                "max backoff is below the initial backoff, every wait is capped",
            ));
        }

        if self.workflow.summary_paragraphs == 0 {
            issues.push(ConfigIssue::error(
                "workflow.summary_paragraphs",
                "summary must allow at least one paragraph",
            ));
        }

        issues
    }

    /// Check if configuration is valid (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate()
            .iter()
            .all(|issue| !issue.is_error())
    }
}

/// Configuration validation issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// Issue severity level.
    pub level: IssueLevel,
    /// Configuration path (e.g., "agents.writer.temperature").
    pub path: String,
    /// Human-readable message.
    pub message: String,
}

impl ConfigIssue {
    /// Create an error-level issue.
    #[must_use]
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Error,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a warning-level issue.
    #[must_use]
    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Warning,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl ConfigIssue {
    /// Whether this issue blocks a run.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == IssueLevel::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.level {
            IssueLevel::Error => "ERROR",
            IssueLevel::Warning => "WARN",
        };
        write!(f, "[{prefix}] {}: {}", self.path, self.message)
    }
}

/// Issue severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueLevel {
    /// Must be fixed before running.
    Error,
    /// Suspicious but usable.
    Warning,
}
