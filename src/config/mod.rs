//! Configuration module for the event planner bot.
//!
//! Handles loading the bot configuration from environment variables,
//! optionally pre-populated from a local `.env` file, plus opt-in
//! diagnostics for the resulting values.

mod checks;
mod env_file;
mod loader;
mod settings;

pub use checks::{CheckStatus, VarCheck, check_env};
pub use env_file::{EnvFileError, EnvFileStatus, EnvSnapshot, load_env_file};
pub use loader::{ConfigLoader, load};
pub use settings::{Config, ConfigError};

/// Default env file merged into the process environment before loading.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Telegram bot API token.
pub const ENV_TELEGRAM_TOKEN: &str = "TELEGRAM_BOT_TOKEN";

/// Path to the bot database.
pub const ENV_DB_PATH: &str = "DB_PATH";

/// Telegram user ID of the bot administrator.
pub const ENV_ADMIN_ID: &str = "ADMIN_TELEGRAM_ID";

/// Port the bot's HTTP server listens on.
pub const ENV_SERVER_PORT: &str = "SERVER_PORT";

/// Debug flag, enabled only by the exact value `true`.
pub const ENV_DEBUG: &str = "DEBUG";

/// Every variable the loader reads, in field order.
pub const RECOGNIZED_VARS: [&str; 5] = [
    ENV_TELEGRAM_TOKEN,
    ENV_DB_PATH,
    ENV_ADMIN_ID,
    ENV_SERVER_PORT,
    ENV_DEBUG,
];
