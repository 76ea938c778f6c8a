//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt the document on failure.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::crypto::random_bytes;
use crate::error::{ClassifiedError, ClassifiedResult};

/// Number of attempts made to write a document before giving up
pub const DEFAULT_SAVE_ATTEMPTS: u32 = 10;

/// Number of random bytes in a temporary file suffix
const TEMP_SUFFIX_BYTES: usize = 10;

/// Build a sibling temporary path `<file>_temp-<hex>` with a random suffix
///
/// The temp file lives in the same directory as the target, which keeps the
/// final rename atomic.
pub fn temp_path_for(path: &Path) -> ClassifiedResult<PathBuf> {
    let suffix: [u8; TEMP_SUFFIX_BYTES] = random_bytes()?;
    let hex: String = suffix.iter().map(|b| format!("{:02x}", b)).collect();

    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(format!("_temp-{}", hex));

    Ok(path.with_file_name(name))
}

/// Write `contents` to a file that must not exist yet
///
/// The file is created exclusively, flushed and synced. If writing fails
/// after creation the partial file is removed.
pub fn write_new(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;

    let result = file
        .write_all(contents.as_bytes())
        .and_then(|_| file.flush())
        .and_then(|_| file.sync_all());

    if result.is_err() {
        let _ = fs::remove_file(path);
    }
    result
}

/// Replace `path` with `contents` atomically (write to temp, then rename)
///
/// The temporary path is freshly generated on every attempt and must not
/// already exist. A temp file is only ever renamed over the target after it
/// has been completely written and synced, so the target is either fully
/// replaced or untouched.
pub fn write_atomic(path: &Path, contents: &str, attempts: u32) -> ClassifiedResult<()> {
    let mut last_error = String::from("no write attempted");

    for attempt in 1..=attempts.max(1) {
        let temp_path = temp_path_for(path)?;

        if temp_path.exists() {
            log::debug!("Temp path collision on attempt {}", attempt);
            last_error = "could not generate temp path".to_string();
            continue;
        }

        if let Err(e) = write_new(&temp_path, contents) {
            log::warn!("Failed to write temp file on attempt {}: {}", attempt, e);
            last_error = e.to_string();
            continue;
        }

        match fs::rename(&temp_path, path) {
            Ok(()) => return Ok(()),
            Err(e) => {
                log::warn!("Failed to rename temp file on attempt {}: {}", attempt, e);
                let _ = fs::remove_file(&temp_path);
                last_error = e.to_string();
            }
        }
    }

    Err(ClassifiedError::Persistence {
        path: path.display().to_string(),
        reason: last_error,
    })
}
