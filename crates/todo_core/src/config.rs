//! Runtime configuration for front-ends embedding the core.
//!
//! # Responsibility
//! - Resolve database path, log directory and log level from the environment.
//! - Provide per-platform defaults when nothing is configured.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Relative log directories are resolved against the working directory,
//!   since logging only accepts absolute paths.

use crate::logging::default_log_level;
use std::path::{Path, PathBuf};

pub const DB_PATH_ENV: &str = "TODO_DB_PATH";
pub const LOG_DIR_ENV: &str = "TODO_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "TODO_LOG_LEVEL";

const APP_DIR_NAME: &str = "todo";
const DB_FILE_NAME: &str = "todo.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Resolved settings shared by the CLI and FFI hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        let app_dir = default_app_dir();
        Self {
            db_path: app_dir.join(DB_FILE_NAME),
            log_dir: app_dir.join(LOG_DIR_NAME),
            log_level: default_log_level().to_string(),
        }
    }
}

impl CoreConfig {
    /// Builds config from `TODO_DB_PATH`, `TODO_LOG_DIR` and `TODO_LOG_LEVEL`,
    /// falling back to [`CoreConfig::default`] per field.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`CoreConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(dir) = read(LOG_DIR_ENV) {
            config.log_dir = absolutize(Path::new(&dir));
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config.log_level = level;
        }
        config
    }
}

/// Joins a relative `path` onto the current directory. Absolute paths, and
/// relative ones when the current directory is unknown, are returned as is.
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn default_app_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}
