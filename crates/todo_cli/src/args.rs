//! Command-line argument model.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use todo_core::config::absolutize;
use todo_core::CoreConfig;

#[derive(Debug, Parser)]
#[command(name = "todo", version, about = "Personal to-do list kept in a local database")]
pub struct Args {
    /// Database file (overrides TODO_DB_PATH).
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error (overrides TODO_LOG_LEVEL).
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rolling log files (overrides TODO_LOG_DIR).
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Defaults to `list`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print all tasks with their indices.
    List,
    /// Append a task; the text is stored exactly as given.
    Add { text: String },
    /// Delete the task at INDEX.
    Delete { index: usize },
    /// Replace the text of the task at INDEX (no blank check).
    Edit { index: usize, text: String },
    /// Remove every task.
    Clear,
    /// Interactive session reading one command per line.
    Shell,
    /// Print the core version.
    Version,
}

impl Args {
    /// Applies command-line overrides on top of environment config.
    pub fn apply_overrides(&self, mut config: CoreConfig) -> CoreConfig {
        if let Some(db) = &self.db {
            config.db_path = db.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = absolutize(dir);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::{Args, Command};
    use clap::Parser;
    use std::path::PathBuf;
    use todo_core::CoreConfig;

    #[test]
    fn add_keeps_text_verbatim() {
        let args = Args::try_parse_from(["todo", "add", "  Buy milk  "]).unwrap();
        assert_eq!(
            args.command,
            Some(Command::Add {
                text: "  Buy milk  ".to_string()
            })
        );
    }

    #[test]
    fn global_flags_override_config() {
        let args = Args::try_parse_from([
            "todo",
            "list",
            "--db",
            "/tmp/tasks.sqlite3",
            "--log-level",
            "warn",
        ])
        .unwrap();
        let config = args.apply_overrides(CoreConfig::default());
        assert_eq!(config.db_path, PathBuf::from("/tmp/tasks.sqlite3"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, CoreConfig::default().log_dir);
    }

    #[test]
    fn relative_log_dir_becomes_absolute() {
        let args = Args::try_parse_from(["todo", "--log-dir", "logs"]).unwrap();
        let config = args.apply_overrides(CoreConfig::default());
        assert!(config.log_dir.is_absolute());
        assert!(config.log_dir.ends_with("logs"));
        assert_eq!(args.command, None);
    }

    #[test]
    fn delete_requires_numeric_index() {
        assert!(Args::try_parse_from(["todo", "delete", "first"]).is_err());
    }
}
