//! Saving a session back to its carrier file

use zeroize::Zeroizing;

use crate::codec;
use crate::crypto;
use crate::error::ClassifiedResult;
use crate::session::Session;

use super::file_io::write_atomic;

/// What a save did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new envelope was written
    Saved,
    /// Nothing changed since the last save; the file was not touched
    NoChanges,
}

/// Encrypt the session's rows and atomically rewrite the carrier file
///
/// A fresh salt and IV are drawn on every save. The text outside the
/// markers is preserved as it was when the session was opened.
pub fn save(session: &mut Session, attempts: u32) -> ClassifiedResult<SaveOutcome> {
    if !session.needs_save() {
        log::debug!("No changes to save for {}", session.carrier().path().display());
        return Ok(SaveOutcome::NoChanges);
    }

    let text = Zeroizing::new(session.document().to_text());
    let encoded = Zeroizing::new(codec::encode(&text));
    let envelope = crypto::encrypt(session.password(), &encoded, session.iterations())?;

    let contents = session.carrier().splice(&envelope.serialize());
    write_atomic(session.carrier().path(), &contents, attempts)?;

    log::info!("Saved {}", session.carrier().path().display());
    session.mark_saved(contents)?;
    Ok(SaveOutcome::Saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Selector;
    use crate::error::ClassifiedError;
    use crate::storage::file_io::DEFAULT_SAVE_ATTEMPTS;
    use crate::storage::Carrier;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const TEST_ITERATIONS: u32 = 1000;

    fn new_document(dir: &Path) -> Session {
        let carrier = Carrier::provision(dir.join("doc.classified")).unwrap();
        Session::create(carrier, "pw".into(), TEST_ITERATIONS).unwrap()
    }

    fn reopen(dir: &Path, password: &str) -> ClassifiedResult<Session> {
        let carrier = Carrier::read(dir.join("doc.classified"))?;
        Session::unlock(carrier, password.into())
    }

    #[test]
    fn test_first_save_writes_envelope() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = new_document(temp_dir.path());

        assert_eq!(save(&mut session, DEFAULT_SAVE_ATTEMPTS).unwrap(), SaveOutcome::Saved);

        let reopened = reopen(temp_dir.path(), "pw").unwrap();
        assert!(reopened.document().is_empty());
    }

    #[test]
    fn test_save_and_reopen_rows() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = new_document(temp_dir.path());

        session.document_mut().add_text("hello");
        session.document_mut().add_text("world");
        session.mark_changed();
        save(&mut session, DEFAULT_SAVE_ATTEMPTS).unwrap();

        let reopened = reopen(temp_dir.path(), "pw").unwrap();
        assert_eq!(reopened.document().to_text(), "hello\nworld");
    }

    #[test]
    fn test_unchanged_save_leaves_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.classified");
        let mut session = new_document(temp_dir.path());
        save(&mut session, DEFAULT_SAVE_ATTEMPTS).unwrap();
        let before = fs::read(&path).unwrap();

        let mut reopened = reopen(temp_dir.path(), "pw").unwrap();
        assert_eq!(
            save(&mut reopened, DEFAULT_SAVE_ATTEMPTS).unwrap(),
            SaveOutcome::NoChanges
        );
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_save_preserves_carrier_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.classified");
        let mut session = new_document(temp_dir.path());

        session.document_mut().add_text("secret");
        session.mark_changed();
        save(&mut session, DEFAULT_SAVE_ATTEMPTS).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("classified document\n"));
        assert!(!contents.contains("secret"));
    }

    #[test]
    fn test_fresh_salt_on_every_save() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.classified");
        let mut session = new_document(temp_dir.path());
        save(&mut session, DEFAULT_SAVE_ATTEMPTS).unwrap();
        let first = fs::read_to_string(&path).unwrap();

        session.mark_changed();
        save(&mut session, DEFAULT_SAVE_ATTEMPTS).unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_password_change_applies_on_save() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = new_document(temp_dir.path());
        session.document_mut().add_text("a\nb\nc");
        session.mark_changed();
        save(&mut session, DEFAULT_SAVE_ATTEMPTS).unwrap();

        session.set_password("new".into());
        save(&mut session, DEFAULT_SAVE_ATTEMPTS).unwrap();

        assert!(matches!(
            reopen(temp_dir.path(), "pw"),
            Err(ClassifiedError::Authentication)
        ));
        let mut reopened = reopen(temp_dir.path(), "new").unwrap();
        reopened
            .document_mut()
            .delete_row(&Selector::Number(2))
            .unwrap();
        assert_eq!(reopened.document().to_text(), "a\nc");
    }

    #[test]
    fn test_failed_save_keeps_session_dirty() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = new_document(temp_dir.path());
        session.mark_changed();

        fs::remove_dir_all(temp_dir.path()).unwrap();

        let err = save(&mut session, 2).unwrap_err();
        assert!(matches!(err, ClassifiedError::Persistence { .. }));
        assert!(session.needs_save());
    }
}
