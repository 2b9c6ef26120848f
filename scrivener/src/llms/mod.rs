//! Model client backends.
//!
//! # Available Backends
//!
//! - [`openai`] - OpenAI-compatible Chat Completions (DeepSeek, OpenAI)

pub mod error;
pub mod openai;

pub use openai::{OpenAI, OpenAIConfig};
