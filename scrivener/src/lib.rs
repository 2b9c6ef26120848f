//! Scrivener - research, fact-check and write with a trio of LLM agents.
//!
//! Three role agents share one [`ChatProvider`](chat::ChatProvider):
//!
//! - [`Researcher`](agent::Researcher) gathers findings on a topic
//! - [`FactChecker`](agent::FactChecker) reviews them and rates their accuracy
//! - [`Writer`](agent::Writer) turns reviewed findings into prose
//!
//! An [`Orchestrator`](workflow::Orchestrator) sequences them into the
//! simple, iterative and comparative workflows and keeps an audit trail of
//! every completed step.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use scrivener::prelude::*;
//!
//! let settings = Settings::load().await?;
//! let provider: SharedChatProvider = Arc::new(OpenAI::from_env()?);
//! let mut orchestrator = Orchestrator::new(provider, &settings)?;
//!
//! let request = ComparativeRequest::new("remote work", ["economic", "social"]);
//! let result = orchestrator.comparative_workflow(&request).await?;
//! result.save(WorkflowType::Comparative.default_output_file()).await?;
//! ```

pub mod agent;
pub mod chat;
pub mod config;
pub mod credentials;
pub mod error;
pub mod llms;
pub mod message;
pub mod mock;
pub mod prelude;
pub mod prompts;
pub mod usage;
pub mod workflow;

pub use error::{Error, LlmError, Result};
