//! Diagnostics for the bot's environment variables.
//!
//! The loader never rejects anything. These checks are the opt-in report of
//! what it would silently default, used by the `validate_env` tool.

use std::fmt;

use super::settings::redact;
use super::{ENV_ADMIN_ID, ENV_DB_PATH, ENV_DEBUG, ENV_SERVER_PORT, ENV_TELEGRAM_TOKEN};

/// Result of checking a single variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Ok,
    Warning(String),
    Error(String),
}

impl CheckStatus {
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::Warning(_))
    }
}

/// Check outcome for one recognized variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarCheck {
    /// Variable name.
    pub name: &'static str,

    /// Value as displayed to the user (secrets redacted), `None` if unset.
    pub shown_value: Option<String>,

    pub status: CheckStatus,
}

impl fmt::Display for VarCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.shown_value {
            Some(value) => write!(f, "{}=\"{}\"", self.name, value),
            None => write!(f, "{} (unset)", self.name),
        }
    }
}

/// Checks every recognized variable, in field order.
pub fn check_env<F>(mut lookup: F) -> Vec<VarCheck>
where
    F: FnMut(&str) -> Option<String>,
{
    let token = lookup(ENV_TELEGRAM_TOKEN);
    let db_path = lookup(ENV_DB_PATH);
    let admin_id = lookup(ENV_ADMIN_ID);
    let server_port = lookup(ENV_SERVER_PORT);
    let debug = lookup(ENV_DEBUG);

    vec![
        VarCheck {
            name: ENV_TELEGRAM_TOKEN,
            status: check_token(token.as_deref()),
            shown_value: token.as_deref().map(redact),
        },
        VarCheck {
            name: ENV_DB_PATH,
            status: check_db_path(db_path.as_deref()),
            shown_value: db_path,
        },
        VarCheck {
            name: ENV_ADMIN_ID,
            status: check_admin_id(admin_id.as_deref()),
            shown_value: admin_id,
        },
        VarCheck {
            name: ENV_SERVER_PORT,
            status: check_server_port(server_port.as_deref()),
            shown_value: server_port,
        },
        VarCheck {
            name: ENV_DEBUG,
            status: check_debug(debug.as_deref()),
            shown_value: debug,
        },
    ]
}

fn check_token(value: Option<&str>) -> CheckStatus {
    match value {
        Some(v) if !v.is_empty() => CheckStatus::Ok,
        _ => CheckStatus::Error("bot token is empty, the bot cannot start".to_owned()),
    }
}

fn check_db_path(value: Option<&str>) -> CheckStatus {
    match value {
        Some(v) if !v.is_empty() => CheckStatus::Ok,
        _ => CheckStatus::Warning("database path is empty".to_owned()),
    }
}

fn check_admin_id(value: Option<&str>) -> CheckStatus {
    match value {
        None | Some("") => {
            CheckStatus::Warning("no administrator configured, admin commands disabled".to_owned())
        }
        Some(v) => match v.parse::<i64>() {
            Ok(0) => CheckStatus::Warning("administrator ID 0 means no administrator".to_owned()),
            Ok(_) => CheckStatus::Ok,
            Err(e) => CheckStatus::Error(format!("not a 64-bit integer ({e}), will load as 0")),
        },
    }
}

fn check_server_port(value: Option<&str>) -> CheckStatus {
    match value {
        None | Some("") => CheckStatus::Warning("server port is empty".to_owned()),
        Some(v) => match v.parse::<u16>() {
            Ok(port) if port > 0 => CheckStatus::Ok,
            _ => CheckStatus::Warning(format!("\"{v}\" is not a valid TCP port")),
        },
    }
}

fn check_debug(value: Option<&str>) -> CheckStatus {
    match value {
        Some(v) if v != "true" && is_truthy(v) => CheckStatus::Warning(format!(
            "\"{v}\" is treated as false, only \"true\" enables debug"
        )),
        _ => CheckStatus::Ok,
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
