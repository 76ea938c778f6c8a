//! Carrier file handling
//!
//! A document lives inside a carrier file: arbitrary text with exactly one
//! begin marker and one end marker. Everything between the markers is the
//! envelope; everything outside them is preserved byte for byte on save.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::error::{ClassifiedError, ClassifiedResult};

use super::file_io::write_new;

/// Marks the start of the encrypted region
pub const BEGIN_MARKER: &str = "-----BEGIN CLASSIFIED DATA-----";

/// Marks the end of the encrypted region
pub const END_MARKER: &str = "-----END CLASSIFIED DATA-----";

/// Extension appended to new documents that are given without one
pub const DEFAULT_EXTENSION: &str = "classified";

/// A carrier file loaded into memory
#[derive(Debug, Clone)]
pub struct Carrier {
    path: PathBuf,
    source: String,
    data: Range<usize>,
}

impl Carrier {
    /// Read a carrier file from disk
    pub fn read(path: impl AsRef<Path>) -> ClassifiedResult<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            ClassifiedError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_source(path, source)
    }

    /// Build a carrier from already loaded text
    pub fn from_source(path: impl Into<PathBuf>, source: String) -> ClassifiedResult<Self> {
        let data = locate_data(&source)?;
        Ok(Self {
            path: path.into(),
            source,
            data,
        })
    }

    /// Path of the carrier file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full carrier text as last read or saved
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The envelope text between the markers
    pub fn envelope_text(&self) -> &str {
        &self.source[self.data.clone()]
    }

    /// True if no envelope has been written yet
    pub fn is_empty(&self) -> bool {
        self.envelope_text().trim().is_empty()
    }

    /// Produce new carrier text with `envelope` placed between the markers
    pub fn splice(&self, envelope: &str) -> String {
        let before = &self.source[..self.data.start];
        let after = &self.source[self.data.end..];

        let mut out = String::with_capacity(before.len() + envelope.len() + after.len() + 2);
        out.push_str(before);
        out.push('\n');
        out.push_str(envelope);
        if !envelope.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(after);
        out
    }

    /// Adopt freshly written carrier text after a successful save
    pub fn replace_source(&mut self, source: String) -> ClassifiedResult<()> {
        self.data = locate_data(&source)?;
        self.source = source;
        Ok(())
    }

    /// Carrier text for a brand new, empty document
    pub fn empty_template() -> String {
        format!(
            "classified document\n\
             \n\
             This file holds a password protected document. Open it with:\n\
             \n\
             \x20   classified --file <this file>\n\
             \n\
             Everything between the markers below is encrypted.\n\
             Do not edit it by hand.\n\
             \n\
             {}\n\
             {}\n",
            BEGIN_MARKER, END_MARKER
        )
    }

    /// Create a new carrier file containing an empty template
    ///
    /// Fails if the file already exists.
    pub fn provision(path: impl AsRef<Path>) -> ClassifiedResult<Self> {
        let path = path.as_ref();
        let template = Self::empty_template();

        write_new(path, &template).map_err(|e| ClassifiedError::Persistence {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        log::info!("Provisioned new document at {}", path.display());
        Self::from_source(path, template)
    }
}

/// Append the default extension if `path` has none
pub fn with_default_extension(path: impl Into<PathBuf>) -> PathBuf {
    let mut path = path.into();
    if path.extension().is_none() {
        path.set_extension(DEFAULT_EXTENSION);
    }
    path
}

/// Find the byte range between the markers
fn locate_data(source: &str) -> ClassifiedResult<Range<usize>> {
    let begins = source.matches(BEGIN_MARKER).count();
    if begins != 1 {
        return Err(ClassifiedError::Marker(format!(
            "expected one begin marker, found {}",
            begins
        )));
    }

    let ends = source.matches(END_MARKER).count();
    if ends != 1 {
        return Err(ClassifiedError::Marker(format!(
            "expected one end marker, found {}",
            ends
        )));
    }

    // Both counts are exactly one, so both searches succeed
    let start = source.find(BEGIN_MARKER).unwrap_or_default() + BEGIN_MARKER.len();
    let end = source.find(END_MARKER).unwrap_or_default();

    if end < start {
        return Err(ClassifiedError::Marker(
            "end marker comes before begin marker".into(),
        ));
    }

    Ok(start..end)
}
