//! Claudegate CLI — entry point.
//!
//! # Commands
//!
//! - `claudegate generate PROMPT` — generate text from a prompt
//! - `claudegate summarise PROMPT` — summarise the given text
//! - `claudegate explain PROMPT` — explain the given text
//! - `claudegate configure ACTION` — edit and validate per-action settings
//! - `claudegate onboard` — initialize the configuration file
//! - `claudegate status` — show configuration and provider status

mod configure;
mod onboard;
mod status;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use claudegate_core::config::load_config;
use claudegate_core::types::{Action, ActionKind, ActionResult};
use claudegate_provider::AnthropicProvider;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Claudegate — Anthropic Claude action gateway
#[derive(Parser)]
#[command(name = "claudegate", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Arguments shared by the three action commands.
#[derive(Args)]
struct ActionArgs {
    /// The prompt or text to send.
    prompt: String,

    /// Requesting user identifier.
    #[arg(short, long, default_value = "cli")]
    user: String,

    /// Application context identifier.
    #[arg(short, long, default_value_t = 0)]
    context: u64,

    /// Print the raw result as JSON instead of formatted output.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Enable debug logging.
    #[arg(long, default_value_t = false)]
    logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate text from a prompt
    Generate(ActionArgs),

    /// Summarise the given text
    Summarise(ActionArgs),

    /// Explain the given text
    Explain(ActionArgs),

    /// Edit and validate per-action settings
    Configure(configure::ConfigureArgs),

    /// Initialize the configuration file
    Onboard,

    /// Show configuration and provider status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => run_action(ActionKind::GenerateText, args).await,
        Commands::Summarise(args) => run_action(ActionKind::SummariseText, args).await,
        Commands::Explain(args) => run_action(ActionKind::ExplainText, args).await,
        Commands::Configure(args) => configure::run(args),
        Commands::Onboard => onboard::run(),
        Commands::Status => status::run(),
    }
}

// ─────────────────────────────────────────────
// Action commands
// ─────────────────────────────────────────────

async fn run_action(kind: ActionKind, args: ActionArgs) -> Result<()> {
    init_logging(args.logs);

    let config = load_config(None);
    let provider = AnthropicProvider::new(config);

    let action = Action::new(kind, args.user, args.context, args.prompt);
    info!(action = %action.kind, user = %action.user_id, "processing action");

    let result = provider.process(&action).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.to_json())?);
        if !result.is_success() {
            std::process::exit(1);
        }
        return Ok(());
    }

    match result {
        ActionResult::Success(success) => {
            println!("{}", success.generated_content);
            eprintln!(
                "{}",
                format!(
                    "[{} | {} in / {} out | {}]",
                    success.model,
                    success.prompt_tokens,
                    success.completion_tokens,
                    success.finish_reason.as_deref().unwrap_or("?"),
                )
                .dimmed()
            );
            Ok(())
        }
        ActionResult::Failure(failure) => {
            eprintln!(
                "{} {}",
                format!("error ({}):", failure.error_code).red().bold(),
                failure.error_message
            );
            std::process::exit(1);
        }
    }
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("claudegate=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
