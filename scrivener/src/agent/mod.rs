//! The three step agents.
//!
//! Each agent is one role-specific system prompt plus one task template per
//! operation, sent through a shared [`ChatProvider`](crate::chat::ChatProvider):
//!
//! - **[`Researcher`]** gathers findings on a topic
//! - **[`FactChecker`]** reviews findings and reports an accuracy rating
//! - **[`Writer`]** turns reviewed findings into finished prose
//!
//! Every operation makes exactly one model call (plus configured retries),
//! validates its inputs before that call, and returns model errors unchanged.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use scrivener::agent::{FactChecker, Researcher};
//!
//! let provider = Arc::new(OpenAI::from_env()?);
//! let research = Researcher::new(provider.clone()).research("tides", "").await?;
//! let review = FactChecker::new(provider).fact_check(&research.findings, "tides").await?;
//! println!("{}", review.status);
//! ```

mod base;
mod fact_checker;
mod researcher;
pub mod result;
mod writer;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{AgentProfile, Settings};
use crate::error::{Error, Result};

pub use fact_checker::{FactChecker, parse_accuracy_rating};
pub use researcher::Researcher;
pub use result::{
    AccuracyRating, ClaimVerificationResult, ContentLength, ContentType, CrossCheckResult,
    FactCheckResult, Perspective, ResearchResult, ReviewStatus, StepResult, WriterResult,
    WritingStyle,
};
pub use writer::Writer;

/// The three agent roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Gathers findings.
    Researcher,
    /// Reviews findings.
    FactChecker,
    /// Produces prose.
    Writer,
}

impl AgentRole {
    /// Agent name recorded in results and audit records.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Researcher => "Researcher",
            Self::FactChecker => "FactChecker",
            Self::Writer => "Writer",
        }
    }

    /// Role tag attached to every request.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Researcher => "research",
            Self::FactChecker => "fact_check",
            Self::Writer => "write",
        }
    }

    /// Sampling temperature used when none is configured.
    #[must_use]
    pub const fn default_temperature(&self) -> f32 {
        match self {
            Self::FactChecker => 0.3,
            Self::Researcher | Self::Writer => 0.7,
        }
    }

    /// This role's profile within `settings`.
    #[must_use]
    pub const fn profile_in<'a>(&self, settings: &'a Settings) -> &'a AgentProfile {
        match self {
            Self::Researcher => &settings.agents.researcher,
            Self::FactChecker => &settings.agents.fact_checker,
            Self::Writer => &settings.agents.writer,
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fail unless `value` has non-whitespace content.
pub(crate) fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_input(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Fail unless `items` is non-empty and every entry has content.
pub(crate) fn require_items(field: &str, items: &[String]) -> Result<()> {
    if items.is_empty() {
        return Err(Error::invalid_input(format!(
            "{field} must contain at least one entry"
        )));
    }
    if let Some(pos) = items.iter().position(|item| item.trim().is_empty()) {
        return Err(Error::invalid_input(format!(
            "{field}[{pos}] must not be empty"
        )));
    }
    Ok(())
}

/// Fail unless `names` is non-empty, has no blank entry and no duplicate.
pub(crate) fn require_unique_names(field: &str, names: &[String]) -> Result<()> {
    require_items(field, names)?;
    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        if !seen.insert(name.trim()) {
            return Err(Error::invalid_input(format!(
                "{field} contains duplicate entry: {name}"
            )));
        }
    }
    Ok(())
}
