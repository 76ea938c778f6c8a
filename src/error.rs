//! Custom error types for classified
//!
//! This module defines the error hierarchy for the document engine using
//! thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for classified operations
#[derive(Error, Debug)]
pub enum ClassifiedError {
    /// Bad key derivation parameters (never caused by user input directly)
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// Wrong password or tampered ciphertext. The two cases are
    /// intentionally indistinguishable.
    #[error("Authentication failed: incorrect password or corrupted data")]
    Authentication,

    /// Malformed envelope text or section encoding
    #[error("Format error: {0}")]
    Format(String),

    /// Row index outside of the document
    #[error("{0}")]
    Index(String),

    /// Selector did not match any row
    #[error("no row matches: {selector}")]
    NotFound { selector: String },

    /// Selector matched several rows where exactly one is required
    #[error("multiple row matches: {count}")]
    AmbiguousSelector { selector: String, count: usize },

    /// Writing the document failed after all retries
    #[error("Could not save {path}: {reason}")]
    Persistence { path: String, reason: String },

    /// The secure random number generator is unavailable
    #[error("Secure random number generator unavailable: {0}")]
    Rng(String),

    /// Carrier file markers are missing or duplicated
    #[error("Carrier file is damaged: {0}")]
    Marker(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl ClassifiedError {
    /// Create a "not found" error for a row selector
    pub fn row_not_found(selector: impl Into<String>) -> Self {
        Self::NotFound {
            selector: selector.into(),
        }
    }

    /// Create a format error
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    /// Errors the interactive loop cannot recover from
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Rng(_) | Self::Marker(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ClassifiedError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ClassifiedError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for classified operations
pub type ClassifiedResult<T> = Result<T, ClassifiedError>;
