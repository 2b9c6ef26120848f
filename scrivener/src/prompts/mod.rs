//! Prompt templates for the three agent roles.
//!
//! The prompt system consists of:
//! - [`PromptTemplates`]: system prompt and task templates per role
//! - [`PromptEngine`]: Jinja2-compatible rendering via minijinja
//! - [`PromptRender`]: one typed method per agent operation
//!
//! # Example
//!
//! ```rust,ignore
//! use scrivener::prompts::{PromptRender, PromptTemplates};
//!
//! let mut templates = PromptTemplates::default();
//! templates.writer.summary = "Summarise {{ topic }} in {{ paragraphs }} paragraphs:\n{{ research }}".into();
//!
//! let render = PromptRender::new(templates);
//! let prompt = render.write_summary("tides", "findings", 2)?;
//! ```

mod engine;
mod renderer;
mod templates;

pub use engine::PromptEngine;
pub use renderer::{PromptRender, source_label};
pub use templates::{
    FACT_CHECKER_SYSTEM, FactCheckPrompts, PromptTemplates, RESEARCHER_SYSTEM, ResearchPrompts,
    WRITER_SYSTEM, WriterPrompts,
};
