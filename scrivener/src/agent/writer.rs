//! Writer step.

use chrono::Utc;

use crate::error::{Error, Result};

use super::base::{AgentCore, agent_common};
use super::{
    AgentRole, ContentLength, ContentType, Perspective, WriterResult, WritingStyle,
    require_text, require_unique_names,
};

/// Turns reviewed findings into finished prose.
///
/// Output is accepted verbatim; length and style are requested, never
/// enforced.
#[derive(Debug, Clone)]
pub struct Writer {
    core: AgentCore,
}

agent_common!(Writer, AgentRole::Writer);

impl Writer {
    /// Write an article from research and its fact-check report.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for a blank topic, or the model
    /// error unchanged.
    pub async fn write_article(
        &self,
        topic: &str,
        research: &str,
        fact_check_report: &str,
        style: WritingStyle,
        length: ContentLength,
    ) -> Result<WriterResult> {
        require_text("topic", topic)?;

        let prompt = self
            .core
            .prompts
            .write_article(topic, research, fact_check_report, style, length)?;
        let content = self.core.complete("write_article", prompt).await?;

        Ok(self.result(Some(topic), Some(style), ContentType::Article, content))
    }

    /// Summarise research in at most `max_paragraphs` paragraphs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for a blank topic or a zero
    /// paragraph cap, or the model error unchanged.
    pub async fn write_summary(
        &self,
        topic: &str,
        research: &str,
        max_paragraphs: u32,
    ) -> Result<WriterResult> {
        require_text("topic", topic)?;
        if max_paragraphs == 0 {
            return Err(Error::invalid_input("max_paragraphs must be at least 1"));
        }

        let prompt = self
            .core
            .prompts
            .write_summary(topic, research, max_paragraphs)?;
        let content = self.core.complete("write_summary", prompt).await?;

        Ok(self.result(Some(topic), None, ContentType::Summary, content))
    }

    /// Compare perspectives, in the order given, optionally informed by a
    /// cross-check report.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for a blank topic, no perspectives,
    /// or blank or duplicate perspective names, or the model error
    /// unchanged.
    pub async fn write_comparison(
        &self,
        topic: &str,
        perspectives: &[Perspective],
        cross_check_report: Option<&str>,
    ) -> Result<WriterResult> {
        require_text("topic", topic)?;
        let names: Vec<String> = perspectives.iter().map(|p| p.name.clone()).collect();
        require_unique_names("perspectives", &names)?;

        let prompt = self
            .core
            .prompts
            .write_comparison(topic, perspectives, cross_check_report)?;
        let content = self.core.complete("write_comparison", prompt).await?;

        Ok(self.result(Some(topic), None, ContentType::Comparison, content))
    }

    /// Revise `original` against `feedback`, stressing any `focus_areas`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when the original or the feedback is
    /// blank, or the model error unchanged.
    pub async fn refine_content(
        &self,
        original: &str,
        feedback: &str,
        focus_areas: &[String],
    ) -> Result<WriterResult> {
        require_text("original content", original)?;
        require_text("feedback", feedback)?;

        let prompt = self
            .core
            .prompts
            .refine_content(original, feedback, focus_areas)?;
        let content = self.core.complete("refine_content", prompt).await?;

        Ok(self.result(None, None, ContentType::RefinedContent, content))
    }

    fn result(
        &self,
        topic: Option<&str>,
        style: Option<WritingStyle>,
        content_type: ContentType,
        content: String,
    ) -> WriterResult {
        WriterResult {
            agent: self.name().to_owned(),
            topic: topic.map(str::to_owned),
            style,
            content_type,
            content,
            generated_at: Utc::now(),
        }
    }
}
