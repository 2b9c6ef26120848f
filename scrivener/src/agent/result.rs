//! Step result types.
//!
//! Every agent operation returns one immutable record carrying the role
//! that produced it, its text payload, and the time it was generated.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Overall accuracy rating reported by the fact-checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccuracyRating {
    /// Well-researched, accurate, balanced.
    High,
    /// Generally accurate with some gaps.
    Medium,
    /// Significant inaccuracies.
    Low,
    /// Claims cannot be verified.
    Unverifiable,
}

impl AccuracyRating {
    /// The token the model is asked to emit.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Unverifiable => "UNVERIFIABLE",
        }
    }
}

impl fmt::Display for AccuracyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccuracyRating {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HIGH" => Ok(Self::High),
            "MEDIUM" => Ok(Self::Medium),
            "LOW" => Ok(Self::Low),
            "UNVERIFIABLE" => Ok(Self::Unverifiable),
            other => Err(Error::invalid_input(format!(
                "unknown accuracy rating: {other}"
            ))),
        }
    }
}

/// Review outcome of a fact check.
///
/// Derived from the rating the model reports about its own review; the
/// content itself is never judged here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Rated HIGH or MEDIUM.
    Reviewed,
    /// Rated LOW.
    Flagged,
    /// Rated UNVERIFIABLE.
    Unverifiable,
    /// No rating token in the reply.
    #[default]
    Unknown,
}

impl ReviewStatus {
    /// Map an optional rating to a status.
    #[must_use]
    pub const fn from_rating(rating: Option<AccuracyRating>) -> Self {
        match rating {
            Some(AccuracyRating::High | AccuracyRating::Medium) => Self::Reviewed,
            Some(AccuracyRating::Low) => Self::Flagged,
            Some(AccuracyRating::Unverifiable) => Self::Unverifiable,
            None => Self::Unknown,
        }
    }

    /// Lowercase label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reviewed => "reviewed",
            Self::Flagged => "flagged",
            Self::Unverifiable => "unverifiable",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of text the writer produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// Full article.
    Article,
    /// Paragraph-capped summary.
    Summary,
    /// Comparison across perspectives.
    Comparison,
    /// Revised version of earlier content.
    RefinedContent,
}

/// Writing style for articles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WritingStyle {
    /// Plain explanatory prose.
    #[default]
    Informative,
    /// Casual, reader-facing tone.
    Conversational,
    /// Precise, domain vocabulary.
    Technical,
    /// News-style reporting.
    Journalistic,
    /// Argument-driven analysis.
    Analytical,
}

impl WritingStyle {
    /// Every style, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Informative,
        Self::Conversational,
        Self::Technical,
        Self::Journalistic,
        Self::Analytical,
    ];

    /// Lowercase label, as substituted into prompts.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Informative => "informative",
            Self::Conversational => "conversational",
            Self::Technical => "technical",
            Self::Journalistic => "journalistic",
            Self::Analytical => "analytical",
        }
    }
}

impl fmt::Display for WritingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WritingStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == wanted)
            .ok_or_else(|| Error::invalid_input(format!("unknown writing style: {s}")))
    }
}

/// Target length for articles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentLength {
    /// 500-800 words.
    Short,
    /// 1000-1500 words.
    #[default]
    Medium,
    /// 2000+ words.
    Long,
}

impl ContentLength {
    /// Lowercase label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    /// Length hint substituted into the article prompt.
    #[must_use]
    pub const fn guidance(&self) -> &'static str {
        match self {
            Self::Short => "500-800 words, focus on key points",
            Self::Medium => "1000-1500 words, comprehensive coverage",
            Self::Long => "2000+ words, in-depth analysis",
        }
    }
}

impl fmt::Display for ContentLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentLength {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            _ => Err(Error::invalid_input(format!("unknown content length: {s}"))),
        }
    }
}

/// One named angle of analysis and the research gathered for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Perspective {
    /// Perspective name as supplied by the caller.
    pub name: String,
    /// Research findings for this perspective.
    pub findings: String,
}

impl Perspective {
    /// Create a perspective.
    #[must_use]
    pub fn new(name: impl Into<String>, findings: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            findings: findings.into(),
        }
    }
}

/// Output of [`Researcher::research`](super::Researcher::research) and
/// [`Researcher::focused_research`](super::Researcher::focused_research).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchResult {
    /// Producing role.
    pub agent: String,
    /// Topic researched.
    pub topic: String,
    /// Model output.
    pub findings: String,
    /// Questions answered, for focused research.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<String>>,
    /// Always true; research is never trusted unreviewed.
    pub needs_fact_checking: bool,
    /// Generation time.
    pub generated_at: DateTime<Utc>,
}

/// Output of [`FactChecker::fact_check`](super::FactChecker::fact_check).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactCheckResult {
    /// Producing role.
    pub agent: String,
    /// Topic checked.
    pub topic: String,
    /// Model output.
    pub fact_check_report: String,
    /// Status derived from the reported rating.
    pub status: ReviewStatus,
    /// First rating token found in the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy_rating: Option<AccuracyRating>,
    /// Generation time.
    pub generated_at: DateTime<Utc>,
}

/// Output of [`FactChecker::verify_specific_claims`](super::FactChecker::verify_specific_claims).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimVerificationResult {
    /// Producing role.
    pub agent: String,
    /// Claims submitted, in order.
    pub claims_analyzed: Vec<String>,
    /// Model output.
    pub verification_report: String,
    /// Generation time.
    pub generated_at: DateTime<Utc>,
}

/// Output of [`FactChecker::cross_check`](super::FactChecker::cross_check).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossCheckResult {
    /// Producing role.
    pub agent: String,
    /// Topic checked.
    pub topic: String,
    /// Source labels or names, in the order presented.
    pub sources: Vec<String>,
    /// Model output.
    pub cross_check_report: String,
    /// Generation time.
    pub generated_at: DateTime<Utc>,
}

/// Output of every [`Writer`](super::Writer) operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriterResult {
    /// Producing role.
    pub agent: String,
    /// Topic written about; absent for refinements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Style requested; present for articles only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<WritingStyle>,
    /// Kind of text produced.
    pub content_type: ContentType,
    /// Model output.
    pub content: String,
    /// Generation time.
    pub generated_at: DateTime<Utc>,
}

/// Any step result, as stored in an audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepResult {
    /// Research output.
    Research(ResearchResult),
    /// Fact-check output.
    FactCheck(FactCheckResult),
    /// Claim verification output.
    ClaimVerification(ClaimVerificationResult),
    /// Cross-check output.
    CrossCheck(CrossCheckResult),
    /// Writer output.
    Writer(WriterResult),
}

impl StepResult {
    /// Role that produced the result.
    #[must_use]
    pub fn agent(&self) -> &str {
        match self {
            Self::Research(r) => &r.agent,
            Self::FactCheck(r) => &r.agent,
            Self::ClaimVerification(r) => &r.agent,
            Self::CrossCheck(r) => &r.agent,
            Self::Writer(r) => &r.agent,
        }
    }

    /// Primary text payload.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Research(r) => &r.findings,
            Self::FactCheck(r) => &r.fact_check_report,
            Self::ClaimVerification(r) => &r.verification_report,
            Self::CrossCheck(r) => &r.cross_check_report,
            Self::Writer(r) => &r.content,
        }
    }

    /// Generation time.
    #[must_use]
    pub fn generated_at(&self) -> DateTime<Utc> {
        match self {
            Self::Research(r) => r.generated_at,
            Self::FactCheck(r) => r.generated_at,
            Self::ClaimVerification(r) => r.generated_at,
            Self::CrossCheck(r) => r.generated_at,
            Self::Writer(r) => r.generated_at,
        }
    }
}

impl From<ResearchResult> for StepResult {
    fn from(r: ResearchResult) -> Self {
        Self::Research(r)
    }
}

impl From<FactCheckResult> for StepResult {
    fn from(r: FactCheckResult) -> Self {
        Self::FactCheck(r)
    }
}

impl From<ClaimVerificationResult> for StepResult {
    fn from(r: ClaimVerificationResult) -> Self {
        Self::ClaimVerification(r)
    }
}

impl From<CrossCheckResult> for StepResult {
    fn from(r: CrossCheckResult) -> Self {
        Self::CrossCheck(r)
    }
}

impl From<WriterResult> for StepResult {
    fn from(r: WriterResult) -> Self {
        Self::Writer(r)
    }
}
