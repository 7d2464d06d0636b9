//! Env file loading and environment snapshots.
//!
//! Env files use the usual dotenv `KEY=VALUE` format. Variables that are
//! already set always win over the file.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Outcome of a best-effort env file merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvFileStatus {
    /// The file was read and its new variables were applied.
    Loaded(PathBuf),

    /// No file at the given path.
    Missing,

    /// The file exists but could not be read or parsed.
    Unreadable(String),
}

/// Errors reading an env file into a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum EnvFileError {
    #[error("Env file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read env file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

impl EnvFileError {
    fn from_dotenvy(path: &Path, source: dotenvy::Error) -> Self {
        if source.not_found() {
            Self::NotFound(path.to_path_buf())
        } else {
            Self::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Merges an env file into the process environment.
///
/// Existing variables are never overridden. A missing or broken file is
/// logged and reported, never an error: loading carries on with whatever
/// the process environment already holds.
pub fn load_env_file(path: impl AsRef<Path>) -> EnvFileStatus {
    let path = path.as_ref();

    match dotenvy::from_path(path) {
        Ok(()) => EnvFileStatus::Loaded(path.to_path_buf()),
        Err(e) if e.not_found() => {
            debug!("No env file at {}, using process environment", path.display());
            EnvFileStatus::Missing
        }
        Err(e) => {
            debug!("Could not load env file ({}): {}", path.display(), e);
            EnvFileStatus::Unreadable(e.to_string())
        }
    }
}

/// An owned copy of environment variables.
///
/// Lets configuration be assembled and checked without reading or writing
/// the process-wide environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the current process environment, skipping non-UTF-8 entries.
    #[must_use]
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    /// Sets a variable, replacing any previous value.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Adds the variables of an env file that are not already present.
    ///
    /// The file is parsed completely before anything is merged, so a parse
    /// error leaves the snapshot untouched. Returns the number of variables
    /// added.
    pub fn merge_env_file(&mut self, path: impl AsRef<Path>) -> Result<usize, EnvFileError> {
        let path = path.as_ref();

        let entries = dotenvy::from_path_iter(path)
            .map_err(|e| EnvFileError::from_dotenvy(path, e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| EnvFileError::from_dotenvy(path, e))?;

        let mut added = 0;
        for (key, value) in entries {
            if let Entry::Vacant(slot) = self.vars.entry(key) {
                slot.insert(value);
                added += 1;
            }
        }

        debug!("Merged {} variable(s) from {}", added, path.display());
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn env_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_merge_adds_new_vars() {
        let file = env_file("TELEGRAM_BOT_TOKEN=abc123\n# comment\nDB_PATH=\"/tmp/db.sqlite\"\n");
        let mut snapshot = EnvSnapshot::new();

        let added = snapshot.merge_env_file(file.path()).unwrap();

        assert_eq!(added, 2);
        assert_eq!(snapshot.get("TELEGRAM_BOT_TOKEN"), Some("abc123"));
        assert_eq!(snapshot.get("DB_PATH"), Some("/tmp/db.sqlite"));
    }

    #[test]
    fn test_merge_does_not_override_existing() {
        let file = env_file("SERVER_PORT=9090\nDEBUG=true\n");
        let mut snapshot = EnvSnapshot::new().with_var("SERVER_PORT", "8080");

        let added = snapshot.merge_env_file(file.path()).unwrap();

        assert_eq!(added, 1);
        assert_eq!(snapshot.get("SERVER_PORT"), Some("8080"));
        assert_eq!(snapshot.get("DEBUG"), Some("true"));
    }

    #[test]
    fn test_merge_existing_empty_value_still_wins() {
        let file = env_file("DB_PATH=/from/file\n");
        let mut snapshot = EnvSnapshot::new().with_var("DB_PATH", "");

        snapshot.merge_env_file(file.path()).unwrap();

        assert_eq!(snapshot.get("DB_PATH"), Some(""));
    }

    #[test]
    fn test_merge_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut snapshot = EnvSnapshot::new();

        let result = snapshot.merge_env_file(dir.path().join("missing.env"));

        assert!(matches!(result, Err(EnvFileError::NotFound(_))));
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_merge_parse_error_leaves_snapshot_untouched() {
        let file = env_file("DB_PATH=/tmp/db\nBROKEN LINE\n");
        let mut snapshot = EnvSnapshot::new();

        let result = snapshot.merge_env_file(file.path());

        assert!(matches!(result, Err(EnvFileError::Read { .. })));
        assert!(snapshot.get("DB_PATH").is_none());
    }

    #[test]
    fn test_load_env_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            load_env_file(dir.path().join(".env")),
            EnvFileStatus::Missing
        );
    }

    #[test]
    fn test_load_env_file_sets_process_var() {
        let file = env_file("EVENT_PLANNER_BOT_TEST_LOADED=yes\n");

        let status = load_env_file(file.path());

        assert_eq!(status, EnvFileStatus::Loaded(file.path().to_path_buf()));
        assert_eq!(
            std::env::var("EVENT_PLANNER_BOT_TEST_LOADED").as_deref(),
            Ok("yes")
        );
    }

    #[test]
    fn test_load_env_file_first_set_wins() {
        let first = env_file("EVENT_PLANNER_BOT_TEST_FIRST_WINS=first\n");
        let second = env_file("EVENT_PLANNER_BOT_TEST_FIRST_WINS=second\n");

        assert!(matches!(load_env_file(first.path()), EnvFileStatus::Loaded(_)));
        assert!(matches!(load_env_file(second.path()), EnvFileStatus::Loaded(_)));

        assert_eq!(
            std::env::var("EVENT_PLANNER_BOT_TEST_FIRST_WINS").as_deref(),
            Ok("first")
        );
    }

    #[test]
    fn test_load_env_file_unreadable() {
        let file = env_file("NOT VALID\n");
        assert!(matches!(
            load_env_file(file.path()),
            EnvFileStatus::Unreadable(_)
        ));
    }

    #[test]
    fn test_from_process_sees_process_vars() {
        let file = env_file("EVENT_PLANNER_BOT_TEST_SNAPSHOT=seen\n");
        load_env_file(file.path());

        let snapshot = EnvSnapshot::from_process();

        assert_eq!(snapshot.get("EVENT_PLANNER_BOT_TEST_SNAPSHOT"), Some("seen"));
    }
}
