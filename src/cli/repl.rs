//! Interactive command loop and one-shot commands

use std::io::{self, IsTerminal};

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};

use crate::command::{Command, Control, Interpreter};
use crate::display::format_row_list;
use crate::error::{ClassifiedError, ClassifiedResult};
use crate::session::Session;

use super::prompt::TerminalPrompter;

const COMMAND_PROMPT: &str = "type 'help', enter a command or leave empty to save and exit: ";

/// Clear the terminal unless disabled or not attached to one
fn clear_screen(enabled: bool) {
    if enabled && io::stdout().is_terminal() {
        if let Err(e) = execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0)) {
            log::debug!("Could not clear screen: {}", e);
        }
    }
}

/// Run commands until the user exits or discards
///
/// End of input counts as `exit`. If that final save fails the error is
/// returned, since no further command can be read.
pub fn run_interactive(
    session: &mut Session,
    interpreter: &Interpreter,
    prompter: &mut TerminalPrompter,
    clear: bool,
) -> ClassifiedResult<Control> {
    let mut message: Option<String> = None;

    loop {
        clear_screen(clear);

        let listing = format_row_list(session.document().rows());
        if !listing.is_empty() {
            println!("{}", listing);
        }
        if let Some(text) = message.take().filter(|text| !text.is_empty()) {
            println!("{}\n", text);
        }

        let (command, at_end) = match prompter.read_line(COMMAND_PROMPT)? {
            Some(line) => (Command::parse(&line), false),
            None => {
                println!();
                (Command::Exit, true)
            }
        };

        let outcome = interpreter.execute(session, command, prompter)?;

        match outcome.control {
            Control::Continue if at_end => {
                return Err(ClassifiedError::Io(format!(
                    "input closed before the document was saved: {}",
                    outcome.message.unwrap_or_default()
                )));
            }
            Control::Continue => message = outcome.message,
            Control::Exit | Control::Discard => {
                clear_screen(clear);
                if let Some(text) = outcome.message {
                    println!("{}", text);
                }
                return Ok(outcome.control);
            }
        }
    }
}

/// Run a single command, then save unless it left on its own
///
/// Returns false if the command was not understood; nothing is saved then.
pub fn run_once(
    session: &mut Session,
    interpreter: &Interpreter,
    prompter: &mut TerminalPrompter,
    command: Command,
    clear: bool,
) -> ClassifiedResult<bool> {
    let is_show = command.is_show();
    let outcome = interpreter.execute(session, command, prompter)?;

    clear_screen(clear);
    if !outcome.handled {
        if let Some(text) = outcome.message {
            eprintln!("{}", text);
        }
        return Ok(false);
    }

    if let Some(text) = outcome.message.filter(|text| !text.is_empty()) {
        println!("{}\n", text);
    }

    if outcome.control != Control::Continue {
        return Ok(true);
    }

    if is_show && clear && io::stdin().is_terminal() {
        prompter.pause("(press enter to exit)")?;
        clear_screen(clear);
    }

    let exit = interpreter.execute(session, Command::Exit, prompter)?;
    if let Some(text) = exit.message {
        println!("{}", text);
    }
    if exit.control == Control::Continue {
        return Err(ClassifiedError::Io("document was not saved".into()));
    }
    Ok(true)
}
