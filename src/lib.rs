//! classified - a password protected, row editable text document
//!
//! A document is a list of text rows stored encrypted inside a carrier file.
//! The rows are section-encoded, encrypted with AES-256-GCM under a
//! PBKDF2-HMAC-SHA-512 key and written between two marker lines of the
//! carrier; any text around the markers is left as it is.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `crypto`: Key derivation, envelope encryption and the envelope text format
//! - `codec`: Self-describing section encoding of the document content
//! - `document`: Rows and row selectors
//! - `session`: One opened document with its password and dirty state
//! - `command`: Command parsing and execution
//! - `storage`: Carrier files and atomic saves
//! - `audit`: Audit logging of document events
//! - `config`: Configuration and path management
//! - `cli` / `display`: Terminal front end
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use classified::command::{Command, Interpreter};
//! use classified::session::Session;
//! use classified::storage::Carrier;
//!
//! let carrier = Carrier::read("notes.classified")?;
//! let mut session = Session::unlock(carrier, "hunter2".into())?;
//! let interpreter = Interpreter::default();
//! interpreter.execute(&mut session, Command::parse("add text hello"), &mut prompter)?;
//! interpreter.save(&mut session)?;
//! ```

pub mod audit;
pub mod cli;
pub mod codec;
pub mod command;
pub mod config;
pub mod crypto;
pub mod display;
pub mod document;
pub mod error;
pub mod session;
pub mod storage;

pub use error::{ClassifiedError, ClassifiedResult};
