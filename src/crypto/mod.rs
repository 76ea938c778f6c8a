//! Cryptographic envelope for classified documents
//!
//! Provides PBKDF2-HMAC-SHA-512 key derivation, AES-256-GCM authenticated
//! encryption and the storable text form of the resulting envelope.

pub mod encryption;
pub mod envelope;
pub mod key_derivation;
pub mod secure_memory;

pub use encryption::{decrypt, decrypt_str, encrypt, random_bytes, Decrypted, PLACEHOLDER};
pub use envelope::{Envelope, DATA_LINE_LEN, ENVELOPE_VERSION, IV_SIZE};
pub use key_derivation::{derive_key, DerivedKey, DEFAULT_ITERATIONS, KEY_SIZE, SALT_SIZE};
pub use secure_memory::SecureString;
