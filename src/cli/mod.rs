//! Command line front end
//!
//! Connects the terminal to the command interpreter: password prompts,
//! the interactive loop and one-shot commands.

pub mod logging;
pub mod open;
pub mod prompt;
pub mod repl;

pub use open::open_session;
pub use prompt::{prompt_password, TerminalPrompter};
pub use repl::{run_interactive, run_once};
