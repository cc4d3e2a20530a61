//! Path resolution for nexus-queue configuration files.
//!
//! All nexus-queue data is stored in `~/.nexus-queue/`:
//! - `config.yaml` - Main configuration file
//! - `scripts/` - Saved event scripts

use std::path::PathBuf;

use crate::error::QueueError;

/// Paths to nexus-queue configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.nexus-queue/`
    pub root: PathBuf,
    /// Config file: `~/.nexus-queue/config.yaml`
    pub config_file: PathBuf,
    /// Scripts directory: `~/.nexus-queue/scripts/`
    pub scripts: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, QueueError> {
        let home = std::env::var("HOME")
            .map_err(|_| QueueError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".nexus-queue")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            scripts: root.join("scripts"),
            root,
        }
    }

    /// Resolve a script name: existing paths are used as-is, bare names are
    /// looked up in the scripts directory.
    #[must_use]
    pub fn script(&self, name: &str) -> PathBuf {
        let direct = PathBuf::from(name);
        if direct.exists() {
            return direct;
        }
        let saved = self.scripts.join(name);
        if saved.exists() {
            saved
        } else {
            direct
        }
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to current directory if home cannot be determined
            Self::with_root(PathBuf::from(".nexus-queue"))
        })
    }
}
