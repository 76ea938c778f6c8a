//! Audit logger for append-only audit log
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{ClassifiedError, ClassifiedResult};

use super::entry::AuditEntry;

/// Entries shown by `log` when no count is given
pub const DEFAULT_LOG_ENTRIES: usize = 20;

/// Handles writing audit entries to the audit log file
///
/// The log file uses a line-delimited JSON format (JSONL) where each line
/// is a complete JSON object representing one audit entry.
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new AuditLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry to the log
    pub fn log(&self, entry: &AuditEntry) -> ClassifiedResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| ClassifiedError::Io(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(entry).map_err(|e| {
            ClassifiedError::Json(format!("Failed to serialize audit entry: {}", e))
        })?;

        writeln!(file, "{}", json)
            .map_err(|e| ClassifiedError::Io(format!("Failed to write audit entry: {}", e)))?;

        file.flush()
            .map_err(|e| ClassifiedError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Append an entry, logging instead of failing
    ///
    /// Auditing never blocks editing a document.
    pub fn record(&self, entry: &AuditEntry) {
        if let Err(e) = self.log(entry) {
            log::warn!("Could not write audit entry: {}", e);
        }
    }

    /// Read all audit entries, oldest first
    pub fn read_all(&self) -> ClassifiedResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| ClassifiedError::Io(format!("Failed to open audit log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                ClassifiedError::Io(format!(
                    "Failed to read audit log line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                ClassifiedError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent N entries from the log
    pub fn read_recent(&self, count: usize) -> ClassifiedResult<Vec<AuditEntry>> {
        let all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries[start..].to_vec())
    }

    /// The most recent N entries, one readable line each, oldest first
    pub fn format_recent(&self, count: usize) -> ClassifiedResult<String> {
        let entries = self.read_recent(count)?;
        if entries.is_empty() {
            return Ok("audit log is empty".to_string());
        }

        Ok(entries
            .iter()
            .map(AuditEntry::format_human_readable)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
