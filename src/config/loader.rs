//! Startup configuration loader.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::env_file::{EnvFileStatus, load_env_file};
use super::settings::Config;
use super::DEFAULT_ENV_FILE;

/// Loads [`Config`] from the process environment, after merging an
/// optional env file into it.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    env_file: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            env_file: Some(PathBuf::from(DEFAULT_ENV_FILE)),
        }
    }
}

impl ConfigLoader {
    /// Creates a loader that merges `.env` from the working directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a different env file.
    #[must_use]
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Skips the env file and reads the process environment only.
    #[must_use]
    pub fn without_env_file(mut self) -> Self {
        self.env_file = None;
        self
    }

    pub fn env_file(&self) -> Option<&Path> {
        self.env_file.as_deref()
    }

    /// Loads the configuration.
    ///
    /// Meant to run once at startup, before other threads exist: the env
    /// file merge writes to the process environment. Variables set before
    /// the merge keep their values. Never fails; anything missing or
    /// malformed degrades to an empty string, zero or `false`.
    pub fn load(&self) -> Config {
        if let Some(path) = &self.env_file
            && let EnvFileStatus::Loaded(path) = load_env_file(path)
        {
            info!("Loaded environment from {}", path.display());
        }

        let config = Config::from_env();
        debug!("Loaded configuration: {:?}", config);
        config
    }
}

/// Loads the configuration using `.env` from the working directory.
pub fn load() -> Config {
    ConfigLoader::new().load()
}
