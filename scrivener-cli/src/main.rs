//! Scrivener CLI - research, fact-check and write from the terminal.
//!
//! A command-line runner for the scrivener workflows.

#![allow(clippy::print_stdout)] // CLI program intentionally uses stdout

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use scrivener::config::{ConfigIssue, config_path as default_config_path};
use scrivener::credentials::{
    DEEPSEEK_API_KEY, DEEPSEEK_BASE_URL, OPENAI_API_KEY, OPENAI_BASE_URL,
};
use scrivener::prelude::*;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Scrivener - research, fact-check and write with a trio of LLM agents
#[derive(Parser)]
#[command(name = "scrivener")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "SCRIVENER_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Research, fact-check, then write an article
    Simple(ArticleArgs),

    /// Two research and fact-check rounds, then write an article
    Iterative(ArticleArgs),

    /// Research several perspectives and write a comparison
    Comparative(ComparativeArgs),

    /// Smoke-test each agent with one call
    Check(CheckArgs),

    /// Show configuration and credential status
    Status,

    /// Manage configuration
    Config(ConfigArgs),
}

/// Arguments for the simple and iterative commands
#[derive(Args)]
struct ArticleArgs {
    /// Topic to research and write about
    #[arg(short, long)]
    topic: String,

    /// Extra research context
    #[arg(long, default_value = "")]
    context: String,

    /// Writing style (informative, conversational, technical, journalistic, analytical)
    #[arg(short, long, default_value_t = WritingStyle::Informative)]
    style: WritingStyle,

    /// Article length (short, medium, long)
    #[arg(short, long, default_value_t = ContentLength::Medium)]
    length: ContentLength,

    #[command(flatten)]
    run: RunArgs,
}

/// Arguments for the comparative command
#[derive(Args)]
struct ComparativeArgs {
    /// Topic to compare perspectives on
    #[arg(short, long)]
    topic: String,

    /// Perspective to research (repeatable, in order)
    #[arg(short, long = "perspective", required = true)]
    perspectives: Vec<String>,

    #[command(flatten)]
    run: RunArgs,
}

/// Options shared by every workflow command
#[derive(Args)]
struct RunArgs {
    /// Transcript path (defaults to `output_<workflow>_workflow.json`)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also print a short summary of the result
    #[arg(long)]
    summary: bool,

    /// Model to use (overrides config)
    #[arg(short = 'M', long, env = "SCRIVENER_MODEL")]
    model: Option<String>,
}

/// Arguments for the check command
#[derive(Args)]
struct CheckArgs {
    /// Topic for the smoke test
    #[arg(short, long, default_value = "Benefits of renewable energy")]
    topic: String,

    /// Model to use (overrides config)
    #[arg(short = 'M', long, env = "SCRIVENER_MODEL")]
    model: Option<String>,
}

/// Arguments for the config command
#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let rt = tokio::runtime::Runtime::new().expect("failed to create tokio runtime");

    match rt.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging with the given verbosity level.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "scrivener={level},scrivener_cli={level},{}",
            if verbosity >= 2 { "debug" } else { "warn" }
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config_file = cli.config.unwrap_or_else(default_config_path);

    match cli.command {
        Commands::Simple(args) => cmd_article(WorkflowType::Simple, args, &config_file).await,
        Commands::Iterative(args) => {
            cmd_article(WorkflowType::Iterative, args, &config_file).await
        }
        Commands::Comparative(args) => cmd_comparative(args, &config_file).await,
        Commands::Check(args) => cmd_check(args, &config_file).await,
        Commands::Status => cmd_status(&config_file).await,
        Commands::Config(args) => cmd_config(args, &config_file).await,
    }
}

/// Run the simple or iterative workflow.
async fn cmd_article(kind: WorkflowType, args: ArticleArgs, config_file: &Path) -> Result<()> {
    let settings = load_settings(config_file, args.run.model.as_deref()).await?;
    let mut orchestrator = Orchestrator::new(create_provider(&settings)?, &settings)?;

    let request = SimpleRequest::new(args.topic)
        .with_context(args.context)
        .with_style(args.style)
        .with_length(args.length);

    let result = if kind == WorkflowType::Iterative {
        orchestrator.iterative_workflow(&request).await?
    } else {
        orchestrator.simple_workflow(&request).await?
    };

    finish(&orchestrator, &result, &args.run).await
}

/// Run the comparative workflow.
async fn cmd_comparative(args: ComparativeArgs, config_file: &Path) -> Result<()> {
    let settings = load_settings(config_file, args.run.model.as_deref()).await?;
    let mut orchestrator = Orchestrator::new(create_provider(&settings)?, &settings)?;

    let request = ComparativeRequest::new(args.topic, args.perspectives);
    let result = orchestrator.comparative_workflow(&request).await?;

    finish(&orchestrator, &result, &args.run).await
}

/// Print the final content, optionally a summary, and save the transcript.
async fn finish(
    orchestrator: &Orchestrator,
    result: &WorkflowResult,
    run: &RunArgs,
) -> Result<()> {
    println!("{}", result.final_content().unwrap_or_default());

    if run.summary {
        let summary = orchestrator.summarize(result).await?;
        println!("\n--- Summary ---\n{summary}");
    }

    let output = run
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(result.workflow_type.default_output_file()));
    result.save(&output).await?;
    println!("\nTranscript saved to {}", output.display());

    Ok(())
}

/// Exercise each agent once: research, fact-check, summary.
async fn cmd_check(args: CheckArgs, config_file: &Path) -> Result<()> {
    let settings = load_settings(config_file, args.model.as_deref()).await?;
    let provider = create_provider(&settings)?;

    println!("Checking agents on: {}\n", args.topic);

    let researcher = Researcher::from_settings(Arc::clone(&provider), &settings)?;
    let research = researcher.research(&args.topic, "").await?;
    println!("Researcher:   ok ({} chars)", research.findings.len());

    let fact_checker = FactChecker::from_settings(Arc::clone(&provider), &settings)?;
    let review = fact_checker.fact_check(&research.findings, &args.topic).await?;
    println!(
        "Fact-checker: ok (status {}, rating {})",
        review.status,
        review
            .accuracy_rating
            .map_or_else(|| "none".to_owned(), |r| r.to_string())
    );

    let writer = Writer::from_settings(provider, &settings)?;
    let summary = writer
        .write_summary(&args.topic, &research.findings, settings.workflow.summary_paragraphs)
        .await?;
    println!("Writer:       ok ({} chars)", summary.content.len());

    println!("\n{}", serde_json::to_string_pretty(&review)?);
    Ok(())
}

/// Show status.
async fn cmd_status(config_file: &Path) -> Result<()> {
    println!("Scrivener Status\n");

    println!("Configuration:");
    println!("  Path:   {}", config_file.display());
    println!(
        "  Exists: {}",
        if config_file.exists() { "yes" } else { "no" }
    );

    match Settings::load_from(config_file).await {
        Ok(settings) => {
            println!("  Valid:  yes");
            println!();
            println!("Provider:");
            println!(
                "  Model:   {}",
                settings
                    .provider
                    .model
                    .as_deref()
                    .unwrap_or("(provider default)")
            );
            println!("  Timeout: {}s", settings.provider.timeout_secs);
            println!();
            println!("Workflow:");
            println!(
                "  Parallel research:  {}",
                if settings.workflow.parallel_research {
                    "on"
                } else {
                    "off"
                }
            );
            println!("  Summary paragraphs: {}", settings.workflow.summary_paragraphs);
            println!("  Max retries:        {}", settings.retry.max_retries);
        }
        Err(e) => {
            println!("  Valid:  no ({e})");
        }
    }

    println!();
    println!("Environment:");
    print_env_status(DEEPSEEK_API_KEY);
    print_env_status(DEEPSEEK_BASE_URL);
    print_env_status(OPENAI_API_KEY);
    print_env_status(OPENAI_BASE_URL);
    print_env_status("SCRIVENER_MODEL");

    match Credentials::from_env() {
        Ok(credentials) => println!("\nUsing {} at {}", credentials.provider, credentials.base_url),
        Err(e) => println!("\n{e}"),
    }

    Ok(())
}

/// Configuration management.
async fn cmd_config(args: ConfigArgs, config_file: &Path) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            println!("{}", config_file.display());
        }
        ConfigCommands::Show => {
            let settings = Settings::load_from(config_file).await?;
            println!("{}", settings.to_toml_string()?);
        }
        ConfigCommands::Validate => {
            let content = match tokio::fs::read_to_string(config_file).await {
                Ok(content) => content,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    println!("Configuration file does not exist; defaults apply.");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };

            let settings = Settings::parse_toml(&content)?;
            let issues = settings.validate();
            if issues.is_empty() {
                println!("Configuration is valid");
            }
            for issue in &issues {
                println!("{issue}");
            }
            if issues.iter().any(ConfigIssue::is_error) {
                return Err(Error::config("configuration has errors"));
            }
        }
    }

    Ok(())
}

/// Load settings from `path`, applying a model override.
async fn load_settings(path: &Path, model: Option<&str>) -> Result<Settings> {
    let mut settings = Settings::load_from(path).await?;
    if let Some(model) = model {
        settings.provider.model = Some(model.to_owned());
        settings.ensure_valid()?;
    }
    Ok(settings)
}

/// Resolve credentials and build the model client.
fn create_provider(settings: &Settings) -> Result<SharedChatProvider> {
    let credentials = Credentials::from_env()?;
    let mut config =
        OpenAIConfig::new(credentials).with_timeout(settings.provider.timeout_secs);
    if let Some(model) = &settings.provider.model {
        config = config.with_model(model.clone());
    }
    tracing::info!(
        provider = %config.provider(),
        model = %config.model,
        "using model backend"
    );
    if let Some(url) = &settings.provider.base_url {
        config = config.with_base_url(url.clone());
    }

    Ok(Arc::new(OpenAI::new(config)?))
}

/// Print environment variable status.
fn print_env_status(name: &str) {
    let status = if std::env::var(name).is_ok() {
        "set"
    } else {
        "-"
    };
    println!("  {name}: {status}");
}
