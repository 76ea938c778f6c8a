//! Audit entry data structures
//!
//! An entry records what happened to a document and when, never what the
//! document contains.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kinds of events recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// An existing document was unlocked
    Opened,
    /// A new, empty carrier file was created
    Created,
    /// A password attempt failed
    AuthenticationFailed,
    /// A document command was run
    Command,
    /// The document was written to disk
    Saved,
    /// A save found nothing to write
    NoChanges,
    /// A save gave up after all retries
    SaveFailed,
    /// The document password was replaced
    PasswordChanged,
    /// The session ended without saving
    Discarded,
    /// Unknown sections were dropped while decoding
    SectionsSkipped,
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Opened => write!(f, "OPENED"),
            Event::Created => write!(f, "CREATED"),
            Event::AuthenticationFailed => write!(f, "AUTH FAILED"),
            Event::Command => write!(f, "COMMAND"),
            Event::Saved => write!(f, "SAVED"),
            Event::NoChanges => write!(f, "NO CHANGES"),
            Event::SaveFailed => write!(f, "SAVE FAILED"),
            Event::PasswordChanged => write!(f, "PASSWORD CHANGED"),
            Event::Discarded => write!(f, "DISCARDED"),
            Event::SectionsSkipped => write!(f, "SECTIONS SKIPPED"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the event occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Session the event belongs to, if one was open
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,

    /// What happened
    pub event: Event,

    /// Path of the carrier file
    pub document: String,

    /// Command verb and target, error text or skipped section names.
    /// Never row contents or passwords.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AuditEntry {
    /// Create a new entry timestamped now
    pub fn new(event: Event, document: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            session_id: None,
            event,
            document: document.into(),
            detail: None,
        }
    }

    /// Attach the session identifier
    pub fn with_session(mut self, session_id: Uuid) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// Attach a detail string
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Entry for a command, naming only its verb and target
    pub fn command(document: impl Into<String>, verb: &str, target: Option<&str>) -> Self {
        let detail = match target {
            Some(target) => format!("{} {}", verb, target),
            None => verb.to_string(),
        };
        Self::new(Event::Command, document).with_detail(detail)
    }

    /// Format as a one-line summary
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.event,
            self.document
        );

        if let Some(detail) = &self.detail {
            output.push_str(&format!(" ({})", detail));
        }

        output
    }
}
