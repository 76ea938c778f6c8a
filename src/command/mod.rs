//! Command interpreter
//!
//! Parses command lines into [`Command`]s and applies them to a
//! [`Session`](crate::session::Session). The terminal itself stays behind the
//! [`Prompter`] trait.

mod help;
mod interpreter;
mod parser;
mod prompter;

pub use help::HELP;
pub use interpreter::{provision_new, Control, Interpreter, Outcome};
pub use parser::{Command, Invocation};
pub use prompter::Prompter;
