//! Storage layer for classified documents
//!
//! A document is stored inside a carrier file and rewritten with atomic
//! temp-file-then-rename writes.

pub mod carrier;
pub mod file_io;
pub mod persistence;

pub use carrier::{with_default_extension, Carrier, BEGIN_MARKER, END_MARKER};
pub use file_io::{write_atomic, DEFAULT_SAVE_ATTEMPTS};
pub use persistence::{save, SaveOutcome};
