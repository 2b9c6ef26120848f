//! Simple workflow against DeepSeek or OpenAI.
//!
//! ```bash
//! export DEEPSEEK_API_KEY=...   # or OPENAI_API_KEY
//! cargo run --example workflow_openai
//! ```

#![allow(clippy::print_stdout)]

use std::sync::Arc;

use scrivener::prelude::*;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let settings = Settings::load().await?;
    let mut config = OpenAIConfig::new(Credentials::from_env()?);
    if let Some(model) = &settings.provider.model {
        config = config.with_model(model.clone());
    }
    let provider: SharedChatProvider = Arc::new(OpenAI::new(config)?);

    let mut orchestrator = Orchestrator::new(provider, &settings)?;
    let request = SimpleRequest::new("How tides work")
        .with_style(WritingStyle::Conversational)
        .with_length(ContentLength::Short);
    let result = orchestrator.simple_workflow(&request).await?;

    println!("{}", result.final_content().unwrap_or_default());
    println!("\n--- Summary ---\n{}", orchestrator.summarize(&result).await?);

    result.save(WorkflowType::Simple.default_output_file()).await?;
    Ok(())
}
