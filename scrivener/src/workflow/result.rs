//! Workflow output and transcript persistence.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::agent::{CrossCheckResult, FactCheckResult, Perspective, ResearchResult, WriterResult};
use crate::error::Result;

use super::audit::AuditRecord;

/// The three fixed workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowType {
    /// Research, fact-check, write.
    Simple,
    /// Two research and fact-check rounds, then write.
    Iterative,
    /// Per-perspective research, cross-check, fact-check, comparison.
    Comparative,
}

impl WorkflowType {
    /// Lowercase label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Iterative => "iterative",
            Self::Comparative => "comparative",
        }
    }

    /// Default transcript file name, e.g. `output_simple_workflow.json`.
    #[must_use]
    pub fn default_output_file(&self) -> String {
        format!("output_{}_workflow.json", self.as_str())
    }
}

impl fmt::Display for WorkflowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything one workflow run produced.
///
/// Simple and iterative runs fill `research`, `fact_check` and `article`;
/// an iterative run keeps only its second round under those keys.
/// Comparative runs fill `perspectives`, `cross_check`, `fact_check` and
/// `comparative_analysis`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowResult {
    /// Which workflow ran.
    pub workflow_type: WorkflowType,
    /// Topic of the run.
    pub topic: String,
    /// Final research round.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research: Option<ResearchResult>,
    /// Final fact check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fact_check: Option<FactCheckResult>,
    /// Final article.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article: Option<WriterResult>,
    /// Per-perspective findings, in input order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perspectives: Option<Vec<Perspective>>,
    /// Cross-check across all perspectives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_check: Option<CrossCheckResult>,
    /// Comparison across perspectives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparative_analysis: Option<WriterResult>,
    /// Every completed step, in order.
    pub workflow_history: Vec<AuditRecord>,
}

impl WorkflowResult {
    pub(crate) fn new(workflow_type: WorkflowType, topic: &str) -> Self {
        Self {
            workflow_type,
            topic: topic.to_owned(),
            research: None,
            fact_check: None,
            article: None,
            perspectives: None,
            cross_check: None,
            comparative_analysis: None,
            workflow_history: Vec::new(),
        }
    }

    /// The finished prose: the article, or the comparative analysis.
    #[must_use]
    pub fn final_content(&self) -> Option<&str> {
        self.article
            .as_ref()
            .or(self.comparative_analysis.as_ref())
            .map(|w| w.content.as_str())
    }

    /// Pretty-printed JSON transcript.
    ///
    /// # Errors
    ///
    /// Fails if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the transcript to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Fails on serialization or I/O errors.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(path, self.to_json_pretty()?).await?;
        info!(
            path = %path.display(),
            steps = self.workflow_history.len(),
            "saved workflow transcript"
        );
        Ok(())
    }

    /// Read a transcript written by [`WorkflowResult::save`].
    ///
    /// # Errors
    ///
    /// Fails on I/O or JSON errors.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        Ok(serde_json::from_str(&content)?)
    }
}
