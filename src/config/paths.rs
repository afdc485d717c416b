//! Path resolution for montage-cli configuration.
//!
//! Everything lives under `~/.montage-cli/`:
//! - `config.yaml` - Main configuration file

use std::path::PathBuf;

use crate::error::MontageError;

/// Paths to montage-cli configuration files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.montage-cli/`
    pub root: PathBuf,
    /// Config file: `~/.montage-cli/config.yaml`
    pub config_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, MontageError> {
        let home = std::env::var("HOME")
            .map_err(|_| MontageError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".montage-cli")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            root,
        }
    }

    /// Create the root directory if it doesn't exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), MontageError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                MontageError::Config(format!("Failed to create directory {}: {e}", self.root.display()))
            })?;
        }
        Ok(())
    }
}
