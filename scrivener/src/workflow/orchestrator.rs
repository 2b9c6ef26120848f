//! Workflow sequencer.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, instrument};

use crate::agent::{FactChecker, Perspective, ResearchResult, Researcher, Writer};
use crate::chat::SharedChatProvider;
use crate::config::{Settings, WorkflowSettings};
use crate::error::Result;

use super::audit::{AuditLog, AuditRecord};
use super::request::{ComparativeRequest, IterativeRequest, SimpleRequest};
use super::result::{WorkflowResult, WorkflowType};

/// Separator between perspectives in the combined fact-check input.
pub const PERSPECTIVE_SEPARATOR: &str = "\n\n---\n\n";

/// Context for the second research round of an iterative run.
#[must_use]
pub fn refinement_context(fact_check_report: &str) -> String {
    format!("Previous research was fact-checked. Address these points:\n{fact_check_report}")
}

/// Research context for one comparative perspective.
#[must_use]
pub fn perspective_context(perspective: &str) -> String {
    format!("Focus on this perspective: {perspective}")
}

/// Join perspective findings as `name:\nfindings` blocks.
#[must_use]
pub fn combine_perspectives(perspectives: &[Perspective]) -> String {
    perspectives
        .iter()
        .map(|p| format!("{}:\n{}", p.name, p.findings))
        .collect::<Vec<_>>()
        .join(PERSPECTIVE_SEPARATOR)
}

/// Sequences the three agents into the fixed workflows.
///
/// Each run clears the audit log, appends one record per successful model
/// call, and stops at the first error. The records of a failed run stay
/// readable through [`Orchestrator::history`].
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use scrivener::prelude::*;
///
/// let provider: SharedChatProvider = Arc::new(OpenAI::from_env()?);
/// let mut orchestrator = Orchestrator::new(provider, &Settings::default())?;
///
/// let result = orchestrator
///     .simple_workflow(&SimpleRequest::new("How tides work"))
///     .await?;
/// println!("{}", result.final_content().unwrap_or_default());
/// ```
#[derive(Debug, Clone)]
pub struct Orchestrator {
    researcher: Researcher,
    fact_checker: FactChecker,
    writer: Writer,
    settings: WorkflowSettings,
    history: AuditLog,
}

impl Orchestrator {
    /// Build the three agents from `settings`, all sharing `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) when the settings
    /// fail validation.
    pub fn new(provider: SharedChatProvider, settings: &Settings) -> Result<Self> {
        settings.ensure_valid()?;
        Ok(Self::from_agents(
            Researcher::from_settings(Arc::clone(&provider), settings)?,
            FactChecker::from_settings(Arc::clone(&provider), settings)?,
            Writer::from_settings(provider, settings)?,
            settings.workflow,
        ))
    }

    /// Assemble an orchestrator from individually configured agents.
    #[must_use]
    pub const fn from_agents(
        researcher: Researcher,
        fact_checker: FactChecker,
        writer: Writer,
        settings: WorkflowSettings,
    ) -> Self {
        Self {
            researcher,
            fact_checker,
            writer,
            settings,
            history: AuditLog::new(),
        }
    }

    /// Records of the current or most recent run.
    #[must_use]
    pub fn history(&self) -> &[AuditRecord] {
        self.history.records()
    }

    /// Workflow settings in effect.
    #[must_use]
    pub const fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    /// Research, fact-check, write: three calls.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) for a
    /// blank topic, or the first model error unchanged.
    #[instrument(skip_all, fields(topic = %request.topic))]
    pub async fn simple_workflow(&mut self, request: &SimpleRequest) -> Result<WorkflowResult> {
        self.history.clear();
        request.validate()?;
        let topic = request.topic.as_str();
        info!("starting simple workflow");

        info!("[1/3] researcher gathering information");
        let research = self.researcher.research(topic, &request.context).await?;
        self.history.record("research", research.clone());

        info!("[2/3] fact-checker verifying research");
        let fact_check = self
            .fact_checker
            .fact_check(&research.findings, topic)
            .await?;
        self.history.record("fact_check", fact_check.clone());

        info!("[3/3] writer creating article");
        let article = self
            .writer
            .write_article(
                topic,
                &research.findings,
                &fact_check.fact_check_report,
                request.style,
                request.length,
            )
            .await?;
        self.history.record("write", article.clone());

        info!(status = %fact_check.status, "simple workflow complete");
        let mut result = WorkflowResult::new(WorkflowType::Simple, topic);
        result.research = Some(research);
        result.fact_check = Some(fact_check);
        result.article = Some(article);
        Ok(self.finish(result))
    }

    /// Two research and fact-check rounds, then write: five calls.
    ///
    /// The second round is steered by the first round's fact-check report,
    /// and only the second round is kept under `research` and `fact_check`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) for a
    /// blank topic, or the first model error unchanged.
    #[instrument(skip_all, fields(topic = %request.topic))]
    pub async fn iterative_workflow(
        &mut self,
        request: &IterativeRequest,
    ) -> Result<WorkflowResult> {
        self.history.clear();
        request.validate()?;
        let topic = request.topic.as_str();
        info!("starting iterative workflow");

        info!("[1/5] researcher gathering initial information");
        let initial = self.researcher.research(topic, &request.context).await?;
        self.history.record("initial_research", initial.clone());

        info!("[2/5] fact-checker reviewing initial research");
        let first_check = self
            .fact_checker
            .fact_check(&initial.findings, topic)
            .await?;
        self.history.record("fact_check", first_check.clone());

        info!("[3/5] researcher addressing fact-check feedback");
        let refined = self
            .researcher
            .research(topic, &refinement_context(&first_check.fact_check_report))
            .await?;
        self.history.record("refined_research", refined.clone());

        info!("[4/5] fact-checker reviewing refined research");
        let final_check = self
            .fact_checker
            .fact_check(&refined.findings, topic)
            .await?;
        self.history.record("final_fact_check", final_check.clone());

        info!("[5/5] writer creating final article");
        let article = self
            .writer
            .write_article(
                topic,
                &refined.findings,
                &final_check.fact_check_report,
                request.style,
                request.length,
            )
            .await?;
        self.history.record("write", article.clone());

        info!(
            first = %first_check.status,
            last = %final_check.status,
            "iterative workflow complete"
        );
        let mut result = WorkflowResult::new(WorkflowType::Iterative, topic);
        result.research = Some(refined);
        result.fact_check = Some(final_check);
        result.article = Some(article);
        Ok(self.finish(result))
    }

    /// Per-perspective research, cross-check, overall fact-check and
    /// comparison: N+3 calls.
    ///
    /// Perspective research runs concurrently unless
    /// `parallel_research` is off; either way results are recorded in input
    /// order, and a failure records only the perspectives before it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) for a
    /// blank topic or missing, blank or duplicate perspectives, or the first
    /// model error unchanged.
    #[instrument(
        skip_all,
        fields(topic = %request.topic, perspectives = request.perspectives.len())
    )]
    pub async fn comparative_workflow(
        &mut self,
        request: &ComparativeRequest,
    ) -> Result<WorkflowResult> {
        self.history.clear();
        request.validate()?;
        let topic = request.topic.as_str();
        let count = request.perspectives.len();
        let total = count + 3;
        info!(parallel = self.settings.parallel_research, "starting comparative workflow");

        let findings = if self.settings.parallel_research {
            self.research_concurrently(topic, &request.perspectives).await?
        } else {
            self.research_sequentially(topic, &request.perspectives).await?
        };

        let perspectives: Vec<Perspective> = request
            .perspectives
            .iter()
            .zip(findings)
            .map(|(name, research)| Perspective::new(name.clone(), research.findings))
            .collect();

        info!("[{}/{total}] fact-checker cross-checking perspectives", count + 1);
        let cross_check = self
            .fact_checker
            .cross_check_all(&perspectives, topic)
            .await?;
        self.history.record("cross_check", cross_check.clone());

        info!("[{}/{total}] fact-checker reviewing all perspectives", count + 2);
        let fact_check = self
            .fact_checker
            .fact_check(&combine_perspectives(&perspectives), topic)
            .await?;
        self.history.record("overall_fact_check", fact_check.clone());

        info!("[{total}/{total}] writer creating comparative analysis");
        let comparison = self
            .writer
            .write_comparison(topic, &perspectives, Some(&cross_check.cross_check_report))
            .await?;
        self.history.record("write_comparison", comparison.clone());

        info!(status = %fact_check.status, "comparative workflow complete");
        let mut result = WorkflowResult::new(WorkflowType::Comparative, topic);
        result.perspectives = Some(perspectives);
        result.cross_check = Some(cross_check);
        result.fact_check = Some(fact_check);
        result.comparative_analysis = Some(comparison);
        Ok(self.finish(result))
    }

    /// Summarise a finished run's article or comparison.
    ///
    /// Makes one writer call and does not touch the audit log.
    ///
    /// # Errors
    ///
    /// Returns the model error unchanged.
    pub async fn summarize(&self, result: &WorkflowResult) -> Result<String> {
        info!(workflow = %result.workflow_type, "generating summary");
        let content = match result.final_content() {
            Some(content) => content.to_owned(),
            None => serde_json::to_string(result)?,
        };

        let summary = self
            .writer
            .write_summary(&result.topic, &content, self.settings.summary_paragraphs)
            .await?;
        Ok(summary.content)
    }

    async fn research_concurrently(
        &mut self,
        topic: &str,
        perspectives: &[String],
    ) -> Result<Vec<ResearchResult>> {
        let total = perspectives.len() + 3;
        info!("[1-{}/{total}] researcher covering perspectives concurrently", perspectives.len());

        let researcher = &self.researcher;
        let outcomes = join_all(
            perspectives
                .iter()
                .map(|p| async move { researcher.research(topic, &perspective_context(p)).await }),
        )
        .await;

        let mut findings = Vec::with_capacity(outcomes.len());
        for (i, outcome) in outcomes.into_iter().enumerate() {
            let research = outcome?;
            self.history
                .record(format!("research_perspective_{}", i + 1), research.clone());
            findings.push(research);
        }
        Ok(findings)
    }

    async fn research_sequentially(
        &mut self,
        topic: &str,
        perspectives: &[String],
    ) -> Result<Vec<ResearchResult>> {
        let total = perspectives.len() + 3;
        let mut findings = Vec::with_capacity(perspectives.len());

        for (i, perspective) in perspectives.iter().enumerate() {
            info!("[{}/{total}] researcher covering '{perspective}'", i + 1);
            let research = self
                .researcher
                .research(topic, &perspective_context(perspective))
                .await?;
            self.history
                .record(format!("research_perspective_{}", i + 1), research.clone());
            findings.push(research);
        }
        Ok(findings)
    }

    fn finish(&self, mut result: WorkflowResult) -> WorkflowResult {
        result.workflow_history = self.history.records().to_vec();
        result
    }
}
