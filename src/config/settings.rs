//! User settings for classified

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::ClassifiedPaths;
use crate::crypto::DEFAULT_ITERATIONS;
use crate::error::ClassifiedError;
use crate::storage::DEFAULT_SAVE_ATTEMPTS;

/// User settings, stored as `config.json` in the base directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// PBKDF2 iteration count for newly created documents
    #[serde(default = "default_iterations")]
    pub default_iterations: u32,

    /// How many times a save is attempted before giving up
    #[serde(default = "default_save_attempts")]
    pub save_attempts: u32,

    /// Whether document events are written to the audit log
    #[serde(default = "default_true")]
    pub audit_enabled: bool,

    /// Whether the interactive loop clears the screen between commands
    #[serde(default = "default_true")]
    pub clear_screen: bool,

    /// Document opened when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_document: Option<PathBuf>,
}

fn default_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

fn default_save_attempts() -> u32 {
    DEFAULT_SAVE_ATTEMPTS
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_iterations: default_iterations(),
            save_attempts: default_save_attempts(),
            audit_enabled: true,
            clear_screen: true,
            default_document: None,
        }
    }
}

impl Settings {
    /// Reject values no document operation can work with
    pub fn validate(&self) -> Result<(), ClassifiedError> {
        if self.default_iterations < 1 {
            return Err(ClassifiedError::Config(
                "default_iterations must be at least 1".into(),
            ));
        }
        if self.save_attempts < 1 {
            return Err(ClassifiedError::Config(
                "save_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Document to open when none is given, falling back to the base directory
    pub fn document_path(&self, paths: &ClassifiedPaths) -> PathBuf {
        self.default_document
            .clone()
            .unwrap_or_else(|| paths.default_document())
    }

    /// Load settings from disk, writing the defaults if the file doesn't exist
    pub fn load_or_create(paths: &ClassifiedPaths) -> Result<Self, ClassifiedError> {
        let settings_path = paths.settings_file();

        let settings = if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ClassifiedError::Io(format!("Failed to read settings file: {}", e))
            })?;

            serde_json::from_str::<Settings>(&contents).map_err(|e| {
                ClassifiedError::Config(format!("Failed to parse settings file: {}", e))
            })?
        } else {
            let settings = Settings::default();
            settings.save(paths)?;
            settings
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ClassifiedPaths) -> Result<(), ClassifiedError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ClassifiedError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ClassifiedError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
