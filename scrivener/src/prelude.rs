//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```rust,ignore
//! use scrivener::prelude::*;
//! ```

pub use crate::agent::{
    AccuracyRating, AgentRole, ContentLength, ContentType, CrossCheckResult, FactCheckResult,
    FactChecker, Perspective, ResearchResult, Researcher, ReviewStatus, StepResult, Writer,
    WriterResult, WritingStyle,
};
pub use crate::chat::{ChatProvider, ChatRequest, ChatResponse, SharedChatProvider, StopReason};
pub use crate::config::{AgentProfile, RetryPolicy, Settings, WorkflowSettings};
pub use crate::credentials::{Credentials, ProviderKind};
pub use crate::error::{Error, LlmError, Result};
pub use crate::llms::{OpenAI, OpenAIConfig};
pub use crate::message::{Message, Role};
pub use crate::mock::MockProvider;
pub use crate::prompts::PromptTemplates;
pub use crate::usage::Usage;
pub use crate::workflow::{
    AuditRecord, ComparativeRequest, IterativeRequest, Orchestrator, SimpleRequest,
    WorkflowResult, WorkflowType,
};
