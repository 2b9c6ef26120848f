//! Prompt renderer for the three agent roles.
//!
//! Wraps the template engine and the template set behind one method per
//! agent operation, so callers pass typed arguments and never build
//! template contexts themselves.

use minijinja::context;
use serde::Serialize;

use crate::agent::{AgentRole, ContentLength, Perspective, WritingStyle};
use crate::error::Result;

use super::engine::PromptEngine;
use super::templates::PromptTemplates;

/// A source handed to the cross-check template.
#[derive(Debug, Serialize)]
struct SourceView<'a> {
    label: String,
    name: Option<&'a str>,
    text: &'a str,
}

/// Label for the `index`-th (0-based) cross-check source: `A`..`Z`, then
/// `AA`, `AB` and so on.
#[must_use]
pub fn source_label(index: usize) -> String {
    let mut n = index + 1;
    let mut label = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + u8::try_from(rem).unwrap_or(0));
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

/// Unified prompt renderer that encapsulates the engine and templates.
///
/// # Example
///
/// ```rust,ignore
/// use scrivener::prompts::PromptRender;
///
/// let render = PromptRender::default();
/// let prompt = render.research("tides", "General overview needed")?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct PromptRender {
    engine: PromptEngine,
    templates: PromptTemplates,
}

impl PromptRender {
    /// Create a renderer with the given templates.
    #[must_use]
    pub fn new(templates: PromptTemplates) -> Self {
        Self {
            engine: PromptEngine::new(),
            templates,
        }
    }

    /// Get a reference to the underlying templates.
    #[must_use]
    pub const fn templates(&self) -> &PromptTemplates {
        &self.templates
    }

    /// System prompt for a role.
    #[must_use]
    pub fn system(&self, role: AgentRole) -> &str {
        match role {
            AgentRole::Researcher => &self.templates.researcher.system,
            AgentRole::FactChecker => &self.templates.fact_checker.system,
            AgentRole::Writer => &self.templates.writer.system,
        }
    }

    /// Open research prompt.
    ///
    /// # Errors
    ///
    /// Fails if the template does not render.
    pub fn research(&self, topic: &str, context: &str) -> Result<String> {
        self.engine.render(
            &self.templates.researcher.research,
            context! { topic, context },
        )
    }

    /// Research prompt embedding a numbered question list.
    ///
    /// # Errors
    ///
    /// Fails if the template does not render.
    pub fn focused_research(&self, topic: &str, questions: &[String]) -> Result<String> {
        self.engine.render(
            &self.templates.researcher.focused,
            context! { topic, questions },
        )
    }

    /// Rated fact-check prompt.
    ///
    /// # Errors
    ///
    /// Fails if the template does not render.
    pub fn fact_check(&self, topic: &str, content: &str) -> Result<String> {
        self.engine.render(
            &self.templates.fact_checker.fact_check,
            context! { topic, content },
        )
    }

    /// Per-claim verification prompt.
    ///
    /// # Errors
    ///
    /// Fails if the template does not render.
    pub fn verify_claims(&self, claims: &[String], context: &str) -> Result<String> {
        self.engine.render(
            &self.templates.fact_checker.verify_claims,
            context! { claims, context },
        )
    }

    /// Cross-check prompt over labelled sources, optionally named.
    ///
    /// # Errors
    ///
    /// Fails if the template does not render.
    pub fn cross_check(&self, topic: &str, sources: &[(Option<&str>, &str)]) -> Result<String> {
        let sources: Vec<SourceView<'_>> = sources
            .iter()
            .enumerate()
            .map(|(i, (name, text))| SourceView {
                label: source_label(i),
                name: *name,
                text,
            })
            .collect();

        self.engine.render(
            &self.templates.fact_checker.cross_check,
            context! { topic, sources },
        )
    }

    /// Article prompt.
    ///
    /// # Errors
    ///
    /// Fails if the template does not render.
    pub fn write_article(
        &self,
        topic: &str,
        research: &str,
        fact_check: &str,
        style: WritingStyle,
        length: ContentLength,
    ) -> Result<String> {
        self.engine.render(
            &self.templates.writer.article,
            context! {
                topic,
                research,
                fact_check,
                style => style.as_str(),
                length => length.guidance(),
            },
        )
    }

    /// Summary prompt.
    ///
    /// # Errors
    ///
    /// Fails if the template does not render.
    pub fn write_summary(&self, topic: &str, research: &str, paragraphs: u32) -> Result<String> {
        self.engine.render(
            &self.templates.writer.summary,
            context! { topic, research, paragraphs },
        )
    }

    /// Comparison prompt listing perspectives in order.
    ///
    /// # Errors
    ///
    /// Fails if the template does not render.
    pub fn write_comparison(
        &self,
        topic: &str,
        perspectives: &[Perspective],
        cross_check: Option<&str>,
    ) -> Result<String> {
        self.engine.render(
            &self.templates.writer.comparison,
            context! { topic, perspectives, cross_check },
        )
    }

    /// Refinement prompt; focus areas appear only when non-empty.
    ///
    /// # Errors
    ///
    /// Fails if the template does not render.
    pub fn refine_content(
        &self,
        content: &str,
        feedback: &str,
        focus_areas: &[String],
    ) -> Result<String> {
        self.engine.render(
            &self.templates.writer.refine,
            context! { content, feedback, focus_areas },
        )
    }
}
