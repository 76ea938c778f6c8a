//! Opening a document from the command line

use std::path::Path;

use crate::audit::{AuditEntry, AuditLogger, Event};
use crate::command::Prompter;
use crate::crypto::SecureString;
use crate::error::{ClassifiedError, ClassifiedResult};
use crate::session::Session;
use crate::storage::Carrier;

use super::prompt::{prompt_password, TerminalPrompter};

/// Open the document at `path`
///
/// An empty carrier starts a new document with `password` or a freshly
/// chosen one. An existing envelope is unlocked with `password` if given,
/// otherwise the user is asked until the password is right.
pub fn open_session(
    path: &Path,
    password: Option<SecureString>,
    iterations: u32,
    prompter: &mut TerminalPrompter,
    audit: Option<&AuditLogger>,
) -> ClassifiedResult<Session> {
    let carrier = Carrier::read(path)?;
    let document = path.display().to_string();

    let session = if carrier.is_empty() {
        let password = match password {
            Some(password) if !password.is_empty() => password,
            _ => prompter.choose_password()?,
        };
        let session = Session::create(carrier, password, iterations)?;
        record(audit, &session, AuditEntry::new(Event::Created, document.as_str()));
        session
    } else {
        let session = match password {
            Some(password) => unlock_once(carrier, password, audit, &document)?,
            None => unlock_interactive(carrier, audit, &document)?,
        };
        record(audit, &session, AuditEntry::new(Event::Opened, document.as_str()));
        session
    };

    if !session.skipped_sections().is_empty() {
        log::warn!(
            "Dropped unknown sections: {}",
            session.skipped_sections().join(", ")
        );
        record(
            audit,
            &session,
            AuditEntry::new(Event::SectionsSkipped, document.as_str())
                .with_detail(session.skipped_sections().join(",")),
        );
    }

    Ok(session)
}

fn unlock_once(
    carrier: Carrier,
    password: SecureString,
    audit: Option<&AuditLogger>,
    document: &str,
) -> ClassifiedResult<Session> {
    Session::unlock(carrier, password).map_err(|e| {
        if matches!(e, ClassifiedError::Authentication) {
            record_failure(audit, document);
        }
        e
    })
}

fn unlock_interactive(
    carrier: Carrier,
    audit: Option<&AuditLogger>,
    document: &str,
) -> ClassifiedResult<Session> {
    loop {
        let password = prompt_password("enter password: ")?;
        if password.is_empty() {
            println!("cannot be empty");
            continue;
        }

        match Session::unlock(carrier.clone(), password) {
            Ok(session) => return Ok(session),
            Err(ClassifiedError::Authentication) => {
                record_failure(audit, document);
                println!("incorrect password");
            }
            Err(e) => return Err(e),
        }
    }
}

fn record(audit: Option<&AuditLogger>, session: &Session, entry: AuditEntry) {
    if let Some(logger) = audit {
        logger.record(&entry.with_session(session.id()));
    }
}

fn record_failure(audit: Option<&AuditLogger>, document: &str) {
    if let Some(logger) = audit {
        logger.record(&AuditEntry::new(Event::AuthenticationFailed, document));
    }
}
