//! Comparative workflow against the scripted model client, no API key needed.
//!
//! ```bash
//! cargo run --example workflow_mock
//! ```

#![allow(clippy::print_stdout, clippy::clone_on_ref_ptr)]

use std::sync::Arc;

use scrivener::prelude::*;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let model = Arc::new(
        MockProvider::new()
            .with_responses(
                "research",
                [
                    "Remote work cuts office costs. Accuracy: HIGH",
                    "Remote work weakens informal mentoring. Accuracy: MEDIUM",
                ],
            )
            .with_response("cross_check", "Both sources agree on flexibility gains.")
            .with_response("fact_check", "Overall accuracy: MEDIUM")
            .with_response("write_comparison", "Remote work trades cost for cohesion."),
    );

    let mut orchestrator = Orchestrator::new(model.clone(), &Settings::default())?;
    let request = ComparativeRequest::new("Remote work", ["economic", "social"]);
    let result = orchestrator.comparative_workflow(&request).await?;

    println!("{}\n", result.final_content().unwrap_or_default());
    for record in &result.workflow_history {
        println!("{:<24} {}", record.step, record.agent);
    }
    println!("\nModel calls: {}", model.call_count());

    Ok(())
}
