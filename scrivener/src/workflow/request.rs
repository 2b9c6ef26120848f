//! Workflow inputs.

use serde::{Deserialize, Serialize};

use crate::agent::{ContentLength, WritingStyle, require_text, require_unique_names};
use crate::error::Result;

/// Input for the simple and iterative workflows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRequest {
    /// Topic to research and write about.
    pub topic: String,
    /// Extra research context; blank means a general overview.
    #[serde(default)]
    pub context: String,
    /// Article style.
    #[serde(default)]
    pub style: WritingStyle,
    /// Article length.
    #[serde(default)]
    pub length: ContentLength,
}

/// Input for [`Orchestrator::simple_workflow`](super::Orchestrator::simple_workflow).
pub type SimpleRequest = ArticleRequest;

/// Input for [`Orchestrator::iterative_workflow`](super::Orchestrator::iterative_workflow).
pub type IterativeRequest = ArticleRequest;

impl ArticleRequest {
    /// A request with default context, style and length.
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            context: String::new(),
            style: WritingStyle::default(),
            length: ContentLength::default(),
        }
    }

    /// Set the research context.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Set the article style.
    #[must_use]
    pub const fn with_style(mut self, style: WritingStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the article length.
    #[must_use]
    pub const fn with_length(mut self, length: ContentLength) -> Self {
        self.length = length;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require_text("topic", &self.topic)
    }
}

/// Input for [`Orchestrator::comparative_workflow`](super::Orchestrator::comparative_workflow).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparativeRequest {
    /// Topic to compare perspectives on.
    pub topic: String,
    /// Perspective names, researched and reported in this order.
    pub perspectives: Vec<String>,
}

impl ComparativeRequest {
    /// A request over the given perspectives.
    #[must_use]
    pub fn new<I, S>(topic: impl Into<String>, perspectives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            topic: topic.into(),
            perspectives: perspectives.into_iter().map(Into::into).collect(),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require_text("topic", &self.topic)?;
        require_unique_names("perspectives", &self.perspectives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn article_request_defaults() {
        let req = SimpleRequest::new("tides");
        assert_eq!(req.style, WritingStyle::Informative);
        assert_eq!(req.length, ContentLength::Medium);
        assert!(req.context.is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn blank_topic_is_invalid() {
        assert!(matches!(
            IterativeRequest::new("   ").validate(),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn perspectives_must_be_present_and_unique() {
        assert!(ComparativeRequest::new("t", ["a", "b"]).validate().is_ok());
        assert!(ComparativeRequest::new("t", Vec::<String>::new()).validate().is_err());
        assert!(ComparativeRequest::new("t", ["a", "a"]).validate().is_err());
        assert!(ComparativeRequest::new("t", ["a", ""]).validate().is_err());
        assert!(ComparativeRequest::new("", ["a"]).validate().is_err());
    }
}
