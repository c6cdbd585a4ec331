//! Unified path management for Carter files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/carter/            # Config directory
//! └── config.toml              # Client configuration
//!
//! ~/.local/share/carter/       # Data directory
//! ├── library.toml             # Agents, chats and messages
//! └── logs/                    # Application logs
//!     └── carter.log.YYYY-MM-DD
//! ```
//!
//! A base directory override places both trees under one root, which is how
//! tests and `--data-dir` isolate their files.

use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "carter";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("Cannot find home directory")]
    HomeDirNotFound,
}

impl From<PathError> for carter_core::CarterError {
    fn from(err: PathError) -> Self {
        carter_core::CarterError::config(err.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CarterPaths {
    base_dir: Option<PathBuf>,
    data_dir_override: Option<PathBuf>,
}

impl CarterPaths {
    /// Creates a path resolver, optionally rooted at `base_dir`.
    pub fn new(base_dir: Option<&Path>) -> Self {
        Self {
            base_dir: base_dir.map(Path::to_path_buf),
            data_dir_override: None,
        }
    }

    /// Replaces the data directory while keeping the config location.
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir_override = Some(data_dir.into());
        self
    }

    /// Returns the configuration directory (e.g., `~/.config/carter/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_dir {
            Some(base) => Ok(base.join("config")),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Returns the data directory (e.g., `~/.local/share/carter/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(dir) = &self.data_dir_override {
            return Ok(dir.clone());
        }
        match &self.base_dir {
            Some(base) => Ok(base.join("data")),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn library_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("library.toml"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("logs"))
    }
}
