//! Key derivation using PBKDF2
//!
//! Derives AES-256-GCM keys from user passwords with PBKDF2-HMAC-SHA-512.
//! The derived key only lives for the duration of one encrypt or decrypt
//! call and is zeroed when dropped.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{ClassifiedError, ClassifiedResult};

/// Size of the PBKDF2 salt in bytes
pub const SALT_SIZE: usize = 16;

/// Size of the derived AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// Iteration count used for new documents unless configured otherwise
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// A derived encryption key
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The 32-byte key for AES-256
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive an encryption key from a password
///
/// Deterministic in `(password, salt, iterations)`. The password is hashed
/// as its UTF-8 bytes.
pub fn derive_key(
    password: &str,
    salt: &[u8; SALT_SIZE],
    iterations: u32,
) -> ClassifiedResult<DerivedKey> {
    if iterations < 1 {
        return Err(ClassifiedError::KeyDerivation(format!(
            "iteration count must be at least 1, got {}",
            iterations
        )));
    }

    let mut key = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha512>(password.as_bytes(), salt, iterations, &mut key);

    Ok(DerivedKey { key })
}
