//! Event Planner Bot - Main Entry Point
//!
//! Runs the configuration phase of the bot's startup: merges the env file,
//! loads the configuration and refuses to start without a bot token.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use event_planner_bot::config::{Config, ConfigLoader, DEFAULT_ENV_FILE};

/// Event planner Telegram bot.
#[derive(Parser, Debug)]
#[command(name = "event_bot")]
#[command(about = "Load and check the event planner bot configuration")]
#[command(version)]
struct Args {
    /// Path to the .env file for environment variables.
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Print the loaded configuration as JSON (token redacted) and exit.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level);

    info!("Starting event bot...");

    let config = ConfigLoader::new().with_env_file(&args.env_file).load();

    config
        .require_token()
        .context("Bot token is not configured")?;

    if args.json {
        let json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize configuration")?;
        println!("{json}");
        return Ok(());
    }

    log_summary(&config);

    Ok(())
}

/// Initializes the logging subsystem. Logs go to stderr so `--json`
/// output stays parseable.
fn init_logging(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn log_summary(config: &Config) {
    info!("Database: {}", config.db_path());

    match config.admin() {
        Some(id) => info!("Administrator: {}", id),
        None => warn!("No administrator configured"),
    }

    if config.server_port().is_empty() {
        warn!("Server port is not set");
    } else {
        info!("Server port: {}", config.server_port());
    }

    if config.debug() {
        info!("Debug mode enabled");
    }

    info!("Configuration loaded");
}
