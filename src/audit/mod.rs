//! Audit logging for classified documents
//!
//! Records opens, commands, saves and password changes in an append-only
//! line-delimited JSON log. Entries name the document and the command verb,
//! never row contents or passwords.

mod entry;
mod logger;

pub use entry::{AuditEntry, Event};
pub use logger::{AuditLogger, DEFAULT_LOG_ENTRIES};
