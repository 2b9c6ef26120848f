//! Fact-check step.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;

use crate::error::Result;
use crate::prompts::source_label;

use super::base::{AgentCore, agent_common};
use super::{
    AccuracyRating, AgentRole, ClaimVerificationResult, CrossCheckResult, FactCheckResult,
    Perspective, ReviewStatus, require_items, require_text,
};

/// Context substituted when claim verification gets none.
pub const DEFAULT_VERIFICATION_CONTEXT: &str = "General verification";

static RATING_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b(HIGH|MEDIUM|LOW|UNVERIFIABLE)\b").ok());

/// Find the first rating token in a fact-check report.
///
/// Tokens must be upper-case whole words; the earliest one wins.
#[must_use]
pub fn parse_accuracy_rating(report: &str) -> Option<AccuracyRating> {
    RATING_RE
        .as_ref()?
        .find(report)
        .and_then(|m| m.as_str().parse().ok())
}

/// Reviews findings and reports the model's own accuracy rating.
#[derive(Debug, Clone)]
pub struct FactChecker {
    core: AgentCore,
}

agent_common!(FactChecker, AgentRole::FactChecker);

impl FactChecker {
    /// Review `content` about `topic`.
    ///
    /// The status is derived from the first rating token in the reply;
    /// a reply without one yields [`ReviewStatus::Unknown`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) for a
    /// blank topic, or the model error unchanged.
    pub async fn fact_check(&self, content: &str, topic: &str) -> Result<FactCheckResult> {
        require_text("topic", topic)?;

        let prompt = self.core.prompts.fact_check(topic, content)?;
        let report = self.core.complete("fact_check", prompt).await?;
        let accuracy_rating = parse_accuracy_rating(&report);

        Ok(FactCheckResult {
            agent: self.name().to_owned(),
            topic: topic.to_owned(),
            fact_check_report: report,
            status: ReviewStatus::from_rating(accuracy_rating),
            accuracy_rating,
            generated_at: Utc::now(),
        })
    }

    /// Verify each of `claims`, optionally within `context`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) for an
    /// empty claim list or a blank claim, or the model error unchanged.
    pub async fn verify_specific_claims(
        &self,
        claims: &[String],
        context: &str,
    ) -> Result<ClaimVerificationResult> {
        require_items("claims", claims)?;
        let context = if context.trim().is_empty() {
            DEFAULT_VERIFICATION_CONTEXT
        } else {
            context
        };

        let prompt = self.core.prompts.verify_claims(claims, context)?;
        let report = self.core.complete("verify_claims", prompt).await?;

        Ok(ClaimVerificationResult {
            agent: self.name().to_owned(),
            claims_analyzed: claims.to_vec(),
            verification_report: report,
            generated_at: Utc::now(),
        })
    }

    /// Compare two research texts on `topic` for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) for a
    /// blank topic, or the model error unchanged.
    pub async fn cross_check(
        &self,
        research_a: &str,
        research_b: &str,
        topic: &str,
    ) -> Result<CrossCheckResult> {
        require_text("topic", topic)?;
        let sources = [(None, research_a), (None, research_b)];
        let labels = vec![source_label(0), source_label(1)];
        self.run_cross_check(topic, &sources, labels).await
    }

    /// Compare any number of named research texts on `topic` in one call.
    ///
    /// Sources are labelled A, B, C and so on in the order given. A single
    /// source is still checked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) for a
    /// blank topic or no sources, or the model error unchanged.
    pub async fn cross_check_all(
        &self,
        sources: &[Perspective],
        topic: &str,
    ) -> Result<CrossCheckResult> {
        require_text("topic", topic)?;
        if sources.is_empty() {
            return Err(crate::Error::invalid_input(
                "cross-check needs at least one source",
            ));
        }

        let views: Vec<(Option<&str>, &str)> = sources
            .iter()
            .map(|p| (Some(p.name.as_str()), p.findings.as_str()))
            .collect();
        let names = sources.iter().map(|p| p.name.clone()).collect();
        self.run_cross_check(topic, &views, names).await
    }

    async fn run_cross_check(
        &self,
        topic: &str,
        sources: &[(Option<&str>, &str)],
        names: Vec<String>,
    ) -> Result<CrossCheckResult> {
        let prompt = self.core.prompts.cross_check(topic, sources)?;
        let report = self.core.complete("cross_check", prompt).await?;

        Ok(CrossCheckResult {
            agent: self.name().to_owned(),
            topic: topic.to_owned(),
            sources: names,
            cross_check_report: report,
            generated_at: Utc::now(),
        })
    }
}
