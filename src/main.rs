//! Gander - document question-answering chat client
//!
//! Main entry point for the Gander terminal client.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gander::cli::{Cli, Commands};
use gander::commands;
use gander::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command_or_default() {
        Commands::Chat => {
            tracing::info!("Starting interactive chat mode");
            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::Ask { question } => {
            let question = question.join(" ");
            tracing::debug!("Asking: {}", question);
            commands::ask::run_ask(config, question).await?;
            Ok(())
        }
        Commands::Files { command } => {
            tracing::info!("Starting file management command");
            commands::files::run_files(config, command).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so they do not interleave with the chat screen.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "gander=debug" } else { "gander=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
