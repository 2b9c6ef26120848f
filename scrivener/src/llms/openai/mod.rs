//! OpenAI-compatible API client.
//!
//! Speaks the Chat Completions wire format, which both DeepSeek and OpenAI
//! serve. Only non-streaming text completions are supported.

mod chat;
mod client;
mod config;
mod types;

pub use client::OpenAI;
pub use config::OpenAIConfig;
