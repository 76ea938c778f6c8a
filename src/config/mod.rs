//! Configuration module for classified
//!
//! This module provides configuration management including:
//! - Base directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::ClassifiedPaths;
pub use settings::Settings;
