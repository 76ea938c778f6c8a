//! An open document session
//!
//! Holds everything that belongs to one opened document: the carrier file,
//! the password, the rows being edited and the bookkeeping that decides
//! whether a save has anything to write.

use uuid::Uuid;
use zeroize::Zeroizing;

use crate::codec;
use crate::crypto::{self, SecureString};
use crate::document::RowDocument;
use crate::error::{ClassifiedError, ClassifiedResult};
use crate::storage::Carrier;

/// State of one opened document
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    carrier: Carrier,
    password: SecureString,
    document: RowDocument,
    iterations: u32,
    changed: bool,
    password_changed: bool,
    opened_empty: bool,
    skipped_sections: Vec<String>,
}

impl Session {
    /// Start a session on a carrier that has no envelope yet
    ///
    /// The first save writes an envelope even if nothing was edited.
    pub fn create(
        carrier: Carrier,
        password: SecureString,
        iterations: u32,
    ) -> ClassifiedResult<Self> {
        if iterations < 1 {
            return Err(ClassifiedError::KeyDerivation(
                "iteration count must be at least 1".into(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            carrier,
            password,
            document: RowDocument::new(),
            iterations,
            changed: false,
            password_changed: false,
            opened_empty: true,
            skipped_sections: Vec::new(),
        })
    }

    /// Decrypt and decode the envelope held by `carrier`
    pub fn unlock(carrier: Carrier, password: SecureString) -> ClassifiedResult<Self> {
        let decrypted = crypto::decrypt_str(&password, carrier.envelope_text())?;
        let plaintext = Zeroizing::new(decrypted.text);
        let decoded = codec::decode_detailed(&plaintext)?;
        let text = Zeroizing::new(decoded.text);

        Ok(Self {
            id: Uuid::new_v4(),
            carrier,
            password,
            document: RowDocument::from_text(&text),
            iterations: decrypted.iterations,
            changed: false,
            password_changed: false,
            opened_empty: false,
            skipped_sections: decoded.skipped,
        })
    }

    /// Unlock `carrier` if it holds an envelope, otherwise start a new one
    pub fn open(
        carrier: Carrier,
        password: SecureString,
        iterations: u32,
    ) -> ClassifiedResult<Self> {
        if carrier.is_empty() {
            Self::create(carrier, password, iterations)
        } else {
            Self::unlock(carrier, password)
        }
    }

    /// Identifier used to correlate audit entries of this session
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn carrier(&self) -> &Carrier {
        &self.carrier
    }

    pub fn password(&self) -> &SecureString {
        &self.password
    }

    pub fn document(&self) -> &RowDocument {
        &self.document
    }

    /// Mutable access to the rows; callers mark the session changed
    pub fn document_mut(&mut self) -> &mut RowDocument {
        &mut self.document
    }

    /// Iteration count used for the next save
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Sections the decoder did not understand and dropped
    pub fn skipped_sections(&self) -> &[String] {
        &self.skipped_sections
    }

    /// True once the content or password has been touched
    pub fn is_dirty(&self) -> bool {
        self.changed || self.password_changed
    }

    /// True if a save would write anything
    pub fn needs_save(&self) -> bool {
        self.opened_empty || self.is_dirty()
    }

    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    /// Replace the password used for the next save
    pub fn set_password(&mut self, password: SecureString) {
        self.password = password;
        self.password_changed = true;
    }

    /// Record a successful save of `source` to the carrier path
    pub fn mark_saved(&mut self, source: String) -> ClassifiedResult<()> {
        self.carrier.replace_source(source)?;
        self.changed = false;
        self.password_changed = false;
        self.opened_empty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::carrier::{BEGIN_MARKER, END_MARKER};

    const TEST_ITERATIONS: u32 = 1000;

    fn empty_carrier() -> Carrier {
        Carrier::from_source("doc", Carrier::empty_template()).unwrap()
    }

    fn sealed_carrier(password: &str, text: &str) -> Carrier {
        let envelope = crypto::encrypt(password, &codec::encode(text), TEST_ITERATIONS).unwrap();
        let source = format!("{}\n{}{}\n", BEGIN_MARKER, envelope.serialize(), END_MARKER);
        Carrier::from_source("doc", source).unwrap()
    }

    #[test]
    fn test_create_needs_first_save() {
        let session =
            Session::create(empty_carrier(), "pw".into(), TEST_ITERATIONS).unwrap();

        assert!(session.document().is_empty());
        assert!(!session.is_dirty());
        assert!(session.needs_save());
    }

    #[test]
    fn test_create_rejects_zero_iterations() {
        let err = Session::create(empty_carrier(), "pw".into(), 0).unwrap_err();
        assert!(matches!(err, ClassifiedError::KeyDerivation(_)));
    }

    #[test]
    fn test_unlock_reads_rows() {
        let session = Session::unlock(sealed_carrier("pw", "hello\nworld"), "pw".into()).unwrap();

        assert_eq!(session.document().rows(), &["hello", "world"]);
        assert_eq!(session.iterations(), TEST_ITERATIONS);
        assert!(!session.needs_save());
    }

    #[test]
    fn test_unlock_wrong_password() {
        let err = Session::unlock(sealed_carrier("pw", "secret"), "nope".into()).unwrap_err();
        assert!(matches!(err, ClassifiedError::Authentication));
    }

    #[test]
    fn test_open_picks_mode() {
        let created = Session::open(empty_carrier(), "pw".into(), TEST_ITERATIONS).unwrap();
        assert!(created.needs_save());

        let unlocked = Session::open(sealed_carrier("pw", "x"), "pw".into(), 5).unwrap();
        assert_eq!(unlocked.iterations(), TEST_ITERATIONS);
    }

    #[test]
    fn test_dirty_tracking() {
        let mut session = Session::unlock(sealed_carrier("pw", "a"), "pw".into()).unwrap();

        session.set_password("other".into());
        assert!(session.is_dirty());
        assert_eq!(session.password().as_str(), "other");

        let source = session.carrier().source().to_string();
        session.mark_saved(source).unwrap();
        assert!(!session.is_dirty());

        session.mark_changed();
        assert!(session.needs_save());
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let a = Session::create(empty_carrier(), "pw".into(), TEST_ITERATIONS).unwrap();
        let b = Session::create(empty_carrier(), "pw".into(), TEST_ITERATIONS).unwrap();
        assert_ne!(a.id(), b.id());
    }
}
