//! Bot configuration assembled from environment variables.

use std::fmt;

use serde::{Serialize, Serializer};

use super::env_file::EnvSnapshot;
use super::{ENV_ADMIN_ID, ENV_DB_PATH, ENV_DEBUG, ENV_SERVER_PORT, ENV_TELEGRAM_TOKEN};

/// Bot configuration.
///
/// Built once at startup and handed to the rest of the application.
/// Every field is populated on construction (missing variables become
/// empty strings, zero or `false`) and nothing mutates it afterwards.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Telegram bot API token. Opaque, never validated.
    #[serde(serialize_with = "serialize_redacted")]
    telegram_token: String,

    /// Path to the bot database. Not checked for existence.
    db_path: String,

    /// Telegram ID of the administrator, `0` when absent or unparsable.
    admin_id: i64,

    /// Server port, kept verbatim.
    server_port: String,

    /// Debug mode.
    debug: bool,
}

impl Config {
    /// Creates a configuration from already-typed values.
    #[must_use]
    pub const fn new(
        telegram_token: String,
        db_path: String,
        admin_id: i64,
        server_port: String,
        debug: bool,
    ) -> Self {
        Self {
            telegram_token,
            db_path,
            admin_id,
            server_port,
            debug,
        }
    }

    /// Creates configuration from the process environment.
    ///
    /// Unset and non-UTF-8 variables read as empty. Never fails.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an environment snapshot.
    pub fn from_snapshot(snapshot: &EnvSnapshot) -> Self {
        Self::from_lookup(|key| snapshot.get(key).map(str::to_owned))
    }

    /// Creates configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut var = |key: &str| lookup(key).unwrap_or_default();

        Self {
            telegram_token: var(ENV_TELEGRAM_TOKEN),
            db_path: var(ENV_DB_PATH),
            admin_id: parse_admin_id(&var(ENV_ADMIN_ID)),
            server_port: var(ENV_SERVER_PORT),
            debug: parse_debug(&var(ENV_DEBUG)),
        }
    }

    pub fn telegram_token(&self) -> &str {
        &self.telegram_token
    }

    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Raw administrator ID, `0` meaning "not configured".
    pub const fn admin_id(&self) -> i64 {
        self.admin_id
    }

    /// Administrator ID, or `None` when it was absent or unparsable.
    pub const fn admin(&self) -> Option<i64> {
        if self.admin_id == 0 {
            None
        } else {
            Some(self.admin_id)
        }
    }

    pub fn server_port(&self) -> &str {
        &self.server_port
    }

    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Returns the bot token, failing if it is empty.
    ///
    /// Loading itself accepts an empty token; the bot entry point uses this
    /// to refuse to start without one.
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        if self.telegram_token.is_empty() {
            Err(ConfigError::MissingEnvVar(ENV_TELEGRAM_TOKEN))
        } else {
            Ok(&self.telegram_token)
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("telegram_token", &redact(&self.telegram_token))
            .field("db_path", &self.db_path)
            .field("admin_id", &self.admin_id)
            .field("server_port", &self.server_port)
            .field("debug", &self.debug)
            .finish()
    }
}

/// Parses the administrator ID as a base-10 `i64`, falling back to `0`.
pub(crate) fn parse_admin_id(raw: &str) -> i64 {
    raw.parse().unwrap_or(0)
}

/// Only the exact literal `true` enables debug mode.
pub(crate) fn parse_debug(raw: &str) -> bool {
    raw == "true"
}

/// Masks a secret, keeping only its length.
pub(crate) fn redact(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        format!("***({} chars)", secret.chars().count())
    }
}

fn serialize_redacted<S: Serializer>(secret: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&redact(secret))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),
}
