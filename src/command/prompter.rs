//! Interaction the interpreter needs from its front end

use crate::crypto::SecureString;
use crate::error::ClassifiedResult;

/// Questions the interpreter may ask while running a command
pub trait Prompter {
    /// Ask for a line of text, prefilled with `initial`
    fn ask(&mut self, question: &str, initial: &str) -> ClassifiedResult<String>;

    /// Ask for a new, non-empty password entered twice
    fn choose_password(&mut self) -> ClassifiedResult<SecureString>;
}
