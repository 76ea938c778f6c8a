//! Applies commands to an open session

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::audit::{AuditEntry, AuditLogger, Event, DEFAULT_LOG_ENTRIES};
use crate::document::{RowDocument, Selector};
use crate::error::{ClassifiedError, ClassifiedResult};
use crate::session::Session;
use crate::storage::{
    self, with_default_extension, Carrier, SaveOutcome, DEFAULT_SAVE_ATTEMPTS,
};

use super::help::HELP;
use super::parser::Command;
use super::prompter::Prompter;

/// What the front end should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Ask for the next command
    Continue,
    /// The document was saved; leave
    Exit,
    /// Leave without saving
    Discard,
}

/// Result of executing one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// False only for commands that were not understood
    pub handled: bool,
    /// Text to show the user
    pub message: Option<String>,
    pub control: Control,
}

impl Outcome {
    fn reply(message: impl Into<String>) -> Self {
        Self {
            handled: true,
            message: Some(message.into()),
            control: Control::Continue,
        }
    }

    fn leave(control: Control, message: Option<String>) -> Self {
        Self {
            handled: true,
            message,
            control,
        }
    }
}

/// Executes commands against a session
#[derive(Debug, Clone)]
pub struct Interpreter {
    save_attempts: u32,
    audit: Option<AuditLogger>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_ATTEMPTS)
    }
}

impl Interpreter {
    pub fn new(save_attempts: u32) -> Self {
        Self {
            save_attempts,
            audit: None,
        }
    }

    /// Record session events to an audit log
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Record an event for `session` if auditing is enabled
    pub fn audit(&self, session: &Session, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            logger.record(&entry.with_session(session.id()));
        }
    }

    /// Save the session without leaving
    pub fn save(&self, session: &mut Session) -> ClassifiedResult<SaveOutcome> {
        let document = session.carrier().path().display().to_string();

        match storage::save(session, self.save_attempts) {
            Ok(SaveOutcome::Saved) => {
                self.audit(session, AuditEntry::new(Event::Saved, document));
                Ok(SaveOutcome::Saved)
            }
            Ok(SaveOutcome::NoChanges) => {
                self.audit(session, AuditEntry::new(Event::NoChanges, document));
                Ok(SaveOutcome::NoChanges)
            }
            Err(e) => {
                self.audit(
                    session,
                    AuditEntry::new(Event::SaveFailed, document).with_detail(e.to_string()),
                );
                Err(e)
            }
        }
    }

    /// Execute one command
    ///
    /// Only fatal errors are returned; everything else becomes the message
    /// of a handled outcome so the session can go on.
    pub fn execute(
        &self,
        session: &mut Session,
        command: Command,
        prompter: &mut dyn Prompter,
    ) -> ClassifiedResult<Outcome> {
        let (verb, target) = command.label();
        let document = session.carrier().path().display().to_string();
        self.audit(session, AuditEntry::command(document, verb, target));

        if command.is_mutating() {
            session.mark_changed();
        }

        match self.dispatch(session, command, prompter) {
            Ok(outcome) => Ok(outcome),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                log::debug!("Command failed: {}", e);
                Ok(Outcome::reply(e.to_string()))
            }
        }
    }

    fn dispatch(
        &self,
        session: &mut Session,
        command: Command,
        prompter: &mut dyn Prompter,
    ) -> ClassifiedResult<Outcome> {
        match command {
            Command::Exit => {
                let message = match self.save(session)? {
                    SaveOutcome::Saved => "changes saved!",
                    SaveOutcome::NoChanges => "no changes to save",
                };
                Ok(Outcome::leave(Control::Exit, Some(message.to_string())))
            }
            Command::Discard => {
                let document = session.carrier().path().display().to_string();
                self.audit(session, AuditEntry::new(Event::Discarded, document));
                Ok(Outcome::leave(Control::Discard, None))
            }
            Command::Help => Ok(Outcome::reply(HELP)),
            Command::New { path } => {
                let default_dir = session
                    .carrier()
                    .path()
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_default();
                Ok(Outcome::reply(provision_new(path, &default_dir, prompter)))
            }
            Command::Password => {
                let password = prompter.choose_password()?;
                session.set_password(password);
                let document = session.carrier().path().display().to_string();
                self.audit(session, AuditEntry::new(Event::PasswordChanged, document));
                Ok(Outcome::reply("password changed successfully"))
            }
            Command::Log { count } => match &self.audit {
                Some(logger) => Ok(Outcome::reply(
                    logger.format_recent(count.unwrap_or(DEFAULT_LOG_ENTRIES))?,
                )),
                None => Ok(Outcome::reply("audit log is disabled")),
            },
            Command::AddText(text) => {
                session.document_mut().add_text(&text);
                Ok(Outcome::reply("new row added"))
            }
            Command::AddRow { selector, text } => {
                let document = session.document_mut();
                let index = insertion_index(document, &selector)?;
                document.add_row(index, &text)?;
                Ok(Outcome::reply("new row added"))
            }
            Command::ModifyRow { selector } => {
                let number = session.document().resolve_one(&Selector::parse(&selector)?)?;
                let current = session.document().row(number).unwrap_or_default().to_string();
                let text = prompter.ask("", &current)?;
                session
                    .document_mut()
                    .modify_row(&Selector::Number(number), &text)?;
                Ok(Outcome::reply(format!("row {} modified", number)))
            }
            Command::DeleteText => {
                session.document_mut().delete_all();
                Ok(Outcome::reply("text deleted"))
            }
            Command::DeleteRow { selector } => {
                let number = session
                    .document_mut()
                    .delete_row(&Selector::parse(&selector)?)?;
                Ok(Outcome::reply(format!("row {} deleted", number)))
            }
            Command::ReplaceText(text) => {
                session.document_mut().replace_all(&text);
                Ok(Outcome::reply("text replaced"))
            }
            Command::ReplaceRow { selector, text } => {
                let number = session
                    .document_mut()
                    .replace_row(&Selector::parse(&selector)?, &text)?;
                Ok(Outcome::reply(format!("row {} replaced", number)))
            }
            Command::ShowText => Ok(Outcome::reply(session.document().show_all())),
            Command::ShowRow { selector } => Ok(Outcome::reply(
                session
                    .document()
                    .show_row(&Selector::parse(&selector)?, true)?,
            )),
            Command::Usage(message) => Ok(Outcome::reply(message)),
            Command::Unknown(invocation) => Ok(Outcome {
                handled: false,
                message: Some(format!("command did not work: {}", invocation)),
                control: Control::Continue,
            }),
        }
    }
}

/// Row number a new row is inserted before
///
/// A number may point one past the last row; a prefix inserts before the
/// single row it matches.
fn insertion_index(document: &RowDocument, selector: &str) -> ClassifiedResult<usize> {
    match Selector::parse(selector)? {
        Selector::Number(number) => Ok(number),
        prefix => document.resolve_one(&prefix),
    }
}

/// Create an empty document file and describe the result
///
/// Without a path the prompter is asked for a directory (defaulting to
/// `default_dir`) and a file name.
pub fn provision_new(
    path: Option<String>,
    default_dir: &Path,
    prompter: &mut dyn Prompter,
) -> String {
    let path = match path {
        Some(path) => with_default_extension(path),
        None => match ask_location(default_dir, prompter) {
            Ok(path) => path,
            Err(e) => return format!("Could not create document: {}", e),
        },
    };

    match Carrier::provision(&path) {
        Ok(_) => format!("{} saved", path.display()),
        Err(ClassifiedError::Persistence { path, reason }) => {
            format!("Could not save {}: {}", path, reason)
        }
        Err(e) => format!("Could not save {}: {}", path.display(), e),
    }
}

fn ask_location(default_dir: &Path, prompter: &mut dyn Prompter) -> ClassifiedResult<PathBuf> {
    let proposed = format!("{}{}", default_dir.display(), MAIN_SEPARATOR);
    let directory = prompter.ask(&format!("save directory? [default: {}] ", proposed), "")?;
    let directory = if directory.trim().is_empty() {
        default_dir.to_path_buf()
    } else {
        PathBuf::from(directory.trim())
    };

    let name = prompter.ask("save name? ", "")?;
    if name.trim().is_empty() {
        return Err(ClassifiedError::Config("a file name is required".into()));
    }

    Ok(with_default_extension(directory.join(name.trim())))
}
