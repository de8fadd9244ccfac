//! Runtime configuration for one task list session.
//!
//! # Invariants
//! - The database file is always `<list_name>.db` under `base_dir`.
//! - `log_dir` is absolute, as required by logging bootstrap.

use crate::logging::default_log_level;
use std::io;
use std::path::{Path, PathBuf};

/// Base name of the task list used by the CLI.
pub const DEFAULT_LIST_NAME: &str = "todo";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub base_dir: PathBuf,
    pub list_name: String,
    pub log_level: &'static str,
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Anchors the database file and log directory under `base_dir`.
    pub fn in_dir(base_dir: impl AsRef<Path>) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        Self {
            log_dir: base_dir.join(LOG_DIR_NAME),
            base_dir,
            list_name: DEFAULT_LIST_NAME.to_string(),
            log_level: default_log_level(),
        }
    }

    /// Configuration rooted at the current working directory.
    pub fn from_current_dir() -> io::Result<Self> {
        Ok(Self::in_dir(std::env::current_dir()?))
    }

    pub fn db_path(&self) -> PathBuf {
        self.base_dir.join(format!("{}.db", self.list_name))
    }
}
