//! Command line parsing
//!
//! A line is split on single spaces: the first word is the verb, the second
//! the target, and the remaining words joined back together are the payload.

use std::fmt;

/// A command line split into its words
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub verb: Option<String>,
    pub target: Option<String>,
    pub payload: Option<String>,
}

impl Invocation {
    /// Split a line into verb, target and payload
    ///
    /// An empty verb or payload is absent. A payload of exactly `''` or `""`
    /// is an explicit empty string.
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']).trim_start_matches(' ');
        let mut words = line.split(' ');

        let verb = words.next().filter(|verb| !verb.is_empty()).map(str::to_string);
        let target = words.next().map(str::to_string);
        let payload = words.collect::<Vec<_>>().join(" ");

        Self {
            verb,
            target,
            payload: parse_payload(&payload),
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "COMMAND: {}, TARGET: {}, DATA: {}",
            self.verb.as_deref().unwrap_or("(none)"),
            self.target.as_deref().unwrap_or("(none)"),
            self.payload.as_deref().unwrap_or("(none)")
        )
    }
}

fn parse_payload(payload: &str) -> Option<String> {
    match payload {
        "" => None,
        "''" | "\"\"" => Some(String::new()),
        other => Some(other.to_string()),
    }
}

/// Every command the interpreter understands
///
/// Row selectors are kept as typed so that resolving them happens against
/// the document at execution time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Save and leave; also the empty line
    Exit,
    /// Leave without saving
    Discard,
    Help,
    /// Create a new empty document, asking for a location if none is given
    New { path: Option<String> },
    /// Choose a new password, applied on the next save
    Password,
    /// Show the most recent audit log entries
    Log { count: Option<usize> },
    AddText(String),
    AddRow { selector: String, text: String },
    ModifyRow { selector: String },
    DeleteText,
    DeleteRow { selector: String },
    ReplaceText(String),
    ReplaceRow { selector: String, text: String },
    ShowText,
    ShowRow { selector: String },
    /// A recognized command used the wrong way
    Usage(&'static str),
    /// Anything else; never touches the document
    Unknown(Invocation),
}

impl Command {
    /// Parse a full command line
    pub fn parse(line: &str) -> Self {
        Self::from_invocation(Invocation::parse(line))
    }

    /// Turn split words into a command
    pub fn from_invocation(invocation: Invocation) -> Self {
        let verb = invocation.verb.as_deref();
        let target = invocation.target.as_deref();
        let payload = invocation.payload.clone();

        match (verb, target, payload) {
            (None, _, _) | (Some("exit"), _, _) => Command::Exit,
            (Some("discard"), _, _) => Command::Discard,
            (Some("help"), _, _) => Command::Help,
            (Some("new"), path, _) => Command::New {
                path: path.filter(|path| !path.is_empty()).map(str::to_string),
            },
            (Some("password"), _, _) => Command::Password,
            (Some("log"), count, _) => match count.filter(|count| !count.is_empty()) {
                None => Command::Log { count: None },
                Some(count) => match count.parse() {
                    Ok(count) => Command::Log { count: Some(count) },
                    Err(_) => Command::Usage("log takes the number of entries to show"),
                },
            },

            (Some("add"), Some("text"), Some(text)) => Command::AddText(text),
            (Some("add"), Some("row"), Some(payload)) => match split_row_payload(&payload) {
                Some((selector, text)) => Command::AddRow { selector, text },
                None => Command::Usage("command data missing"),
            },

            (Some("modify"), Some("row"), Some(payload)) => Command::ModifyRow {
                selector: first_word(&payload),
            },
            (Some("modify"), Some("text"), _) => {
                Command::Usage("currently modify works only on rows")
            }

            (Some("delete"), Some("text"), None) => Command::DeleteText,
            (Some("delete"), Some("row"), Some(payload)) => Command::DeleteRow {
                selector: first_word(&payload),
            },
            (Some("delete"), Some("row"), None) => Command::Usage("row number to delete missing"),

            (Some("show"), Some("text"), None) => Command::ShowText,
            (Some("show"), Some("row"), Some(payload)) => Command::ShowRow {
                selector: first_word(&payload),
            },

            (Some("replace"), Some("text"), Some(text)) => Command::ReplaceText(text),
            (Some("replace"), Some("text"), None) => Command::Usage("replace data missing"),
            (Some("replace"), Some("row"), Some(payload)) => match split_row_payload(&payload) {
                Some((selector, text)) => Command::ReplaceRow { selector, text },
                None => Command::Usage("command data missing"),
            },

            _ => Command::Unknown(invocation.clone()),
        }
    }

    /// True for commands that edit the rows
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::AddText(_)
                | Command::AddRow { .. }
                | Command::ModifyRow { .. }
                | Command::DeleteText
                | Command::DeleteRow { .. }
                | Command::ReplaceText(_)
                | Command::ReplaceRow { .. }
        )
    }

    /// True for `show` commands, whose reply is document content
    pub fn is_show(&self) -> bool {
        matches!(self, Command::ShowText | Command::ShowRow { .. })
    }

    /// Verb and target for audit entries; never includes user data
    pub fn label(&self) -> (&'static str, Option<&'static str>) {
        match self {
            Command::Exit => ("exit", None),
            Command::Discard => ("discard", None),
            Command::Help => ("help", None),
            Command::New { .. } => ("new", None),
            Command::Password => ("password", None),
            Command::Log { .. } => ("log", None),
            Command::AddText(_) => ("add", Some("text")),
            Command::AddRow { .. } => ("add", Some("row")),
            Command::ModifyRow { .. } => ("modify", Some("row")),
            Command::DeleteText => ("delete", Some("text")),
            Command::DeleteRow { .. } => ("delete", Some("row")),
            Command::ReplaceText(_) => ("replace", Some("text")),
            Command::ReplaceRow { .. } => ("replace", Some("row")),
            Command::ShowText => ("show", Some("text")),
            Command::ShowRow { .. } => ("show", Some("row")),
            Command::Usage(_) => ("usage", None),
            Command::Unknown(_) => ("unknown", None),
        }
    }
}

fn first_word(payload: &str) -> String {
    payload.split(' ').next().unwrap_or_default().to_string()
}

/// Split `<selector> <text...>`; `None` when the text is missing
fn split_row_payload(payload: &str) -> Option<(String, String)> {
    let (selector, text) = payload.split_once(' ')?;
    let text = parse_payload(text)?;
    Some((selector.to_string(), text))
}
