//! Standalone validator for the bot's environment.
//!
//! Reports, per variable, what the configuration loader would make of the
//! current environment and env file. Never modifies the process
//! environment.

use std::process::ExitCode;

use clap::Parser;

use event_planner_bot::config::{
    CheckStatus, Config, DEFAULT_ENV_FILE, EnvFileError, EnvSnapshot, check_env,
};

/// Bot environment validator.
#[derive(Parser, Debug)]
#[command(name = "validate_env")]
#[command(about = "Checks the environment variables of the event planner bot")]
#[command(version)]
struct Args {
    /// Path to the .env file merged under the process environment.
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    env_file: String,

    /// Check the process environment only.
    #[arg(long)]
    no_env_file: bool,

    /// Show every variable, not only the problematic ones.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut snapshot = EnvSnapshot::from_process();

    if !args.no_env_file {
        match snapshot.merge_env_file(&args.env_file) {
            Ok(added) => println!("Env file: {} ({added} new variable(s))", args.env_file),
            Err(EnvFileError::NotFound(_)) => {
                println!("Env file: {} not found, using process environment", args.env_file);
            }
            Err(e) => {
                eprintln!("✗ {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    println!();

    validate(&snapshot, args.verbose)
}

fn validate(snapshot: &EnvSnapshot, verbose: bool) -> ExitCode {
    let checks = check_env(|key| snapshot.get(key).map(str::to_owned));

    let mut errors = 0;
    let mut warnings = 0;

    for check in &checks {
        match &check.status {
            CheckStatus::Ok => {
                if verbose {
                    println!("✓ {check}");
                }
            }
            CheckStatus::Warning(msg) => {
                warnings += 1;
                println!("⚠ {check}: {msg}");
            }
            CheckStatus::Error(msg) => {
                errors += 1;
                println!("✗ {check}: {msg}");
            }
        }
    }

    let config = Config::from_snapshot(snapshot);
    if verbose {
        println!("\nResulting configuration: {config:?}");
    }

    println!();

    let total = checks.len();
    if errors == 0 {
        println!("✓ Environment is usable ({total} variables checked)");
        if warnings > 0 {
            println!("  ({warnings} warning(s))");
        }
        ExitCode::SUCCESS
    } else {
        println!("✗ Validation failed: {errors} error(s), {warnings} warning(s)");
        ExitCode::FAILURE
    }
}
