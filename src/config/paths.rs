//! Path management for classified
//!
//! ## Path Resolution Order
//!
//! 1. `CLASSIFIED_HOME` environment variable (if set)
//! 2. The platform configuration directory from the `directories` crate,
//!    e.g. `~/.config/classified` on Linux

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::ClassifiedError;

/// Environment variable overriding the base directory
pub const HOME_ENV: &str = "CLASSIFIED_HOME";

/// Manages all paths used by classified
#[derive(Debug, Clone)]
pub struct ClassifiedPaths {
    base_dir: PathBuf,
}

impl ClassifiedPaths {
    /// Resolve the base directory from the environment or the platform
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, ClassifiedError> {
        let base_dir = match std::env::var_os(HOME_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "classified")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    ClassifiedError::Config("Could not determine home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths under a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Document opened when no file is given
    pub fn default_document(&self) -> PathBuf {
        self.base_dir.join("default.classified")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), ClassifiedError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ClassifiedError::Io(format!("Failed to create base directory: {}", e)))
    }
}
