//! Terminal prompts
//!
//! Commands and answers are read line by line from stdin; passwords are read
//! with echo disabled through rpassword.

use std::io::{self, BufRead, Write};

use crate::command::Prompter;
use crate::crypto::SecureString;
use crate::error::{ClassifiedError, ClassifiedResult};

/// Prompter backed by the process's stdin and stdout
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }

    /// Print `prompt` and read one line; `None` at end of input
    pub fn read_line(&mut self, prompt: &str) -> ClassifiedResult<Option<String>> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| ClassifiedError::Io(format!("Failed to read input: {}", e)))?;

        if read == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Wait until the user presses enter
    pub fn pause(&mut self, prompt: &str) -> ClassifiedResult<()> {
        self.read_line(prompt).map(|_| ())
    }
}

impl Prompter for TerminalPrompter {
    /// The current value is printed above the prompt; an empty answer keeps it
    fn ask(&mut self, question: &str, initial: &str) -> ClassifiedResult<String> {
        if !initial.is_empty() {
            println!("{}", initial);
            println!("(leave empty to keep the line above, '' to clear it)");
        }

        match self.read_line(question)? {
            Some(answer) => Ok(resolve_answer(answer, initial)),
            None => Err(ClassifiedError::Io("input closed".into())),
        }
    }

    fn choose_password(&mut self) -> ClassifiedResult<SecureString> {
        loop {
            let password = prompt_password("choose a password: ")?;
            let confirmation = prompt_password("re-enter the password: ")?;

            if password.is_empty() {
                println!("cannot be empty");
                continue;
            }
            if password != confirmation {
                println!("passwords did not match, please try again:");
                continue;
            }

            return Ok(password);
        }
    }
}

/// Empty keeps `initial`; `''` or `""` clears the line
fn resolve_answer(answer: String, initial: &str) -> String {
    match answer.as_str() {
        "" => initial.to_string(),
        "''" | "\"\"" => String::new(),
        _ => answer,
    }
}

/// Read a password with echo disabled
pub fn prompt_password(prompt: &str) -> ClassifiedResult<SecureString> {
    rpassword::prompt_password(prompt)
        .map(SecureString::new)
        .map_err(|e| ClassifiedError::Io(format!("Failed to read password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_answer_keeps_line() {
        assert_eq!(resolve_answer(String::new(), "email: a@b.c"), "email: a@b.c");
    }

    #[test]
    fn test_quoted_answer_clears_line() {
        assert_eq!(resolve_answer("''".into(), "email: a@b.c"), "");
        assert_eq!(resolve_answer("\"\"".into(), "email: a@b.c"), "");
    }

    #[test]
    fn test_answer_replaces_line() {
        assert_eq!(resolve_answer("email: x@y.z".into(), "email: a@b.c"), "email: x@y.z");
    }
}
