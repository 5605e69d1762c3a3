//! Path resolution for essay-timer configuration and data files.
//!
//! All data is stored in `~/.essay-timer/` unless `ESSAY_TIMER_HOME` points
//! elsewhere:
//! - `config.yaml` - settings and the task type catalog
//! - `essay.db` - `SQLite` database of writing sessions

use std::path::PathBuf;

use crate::error::EssayError;

/// Environment variable overriding the data root.
pub const HOME_ENV_VAR: &str = "ESSAY_TIMER_HOME";

/// Paths to essay-timer configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.essay-timer/`
    pub root: PathBuf,
    /// Config file: `~/.essay-timer/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.essay-timer/essay.db`
    pub database: PathBuf,
}

impl Paths {
    /// Resolve paths from `ESSAY_TIMER_HOME` or the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, EssayError> {
        if let Ok(root) = std::env::var(HOME_ENV_VAR) {
            if !root.trim().is_empty() {
                return Ok(Self::with_root(PathBuf::from(root)));
            }
        }

        let home = std::env::var("HOME")
            .map_err(|_| EssayError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".essay-timer")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("essay.db"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), EssayError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                EssayError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-essay-timer");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("essay.db"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested").join("root"));

        paths.ensure_dirs().unwrap();
        assert!(paths.root.exists());

        // Second call is a no-op
        paths.ensure_dirs().unwrap();
    }
}
