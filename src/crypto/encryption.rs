//! AES-256-GCM envelope encryption/decryption
//!
//! Every encryption draws a fresh salt and IV from the operating system
//! CSPRNG. Decryption failures are reported as a single
//! [`ClassifiedError::Authentication`] regardless of cause.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use zeroize::Zeroizing;

use crate::error::{ClassifiedError, ClassifiedResult};

use super::envelope::{Envelope, IV_SIZE};
use super::key_derivation::{derive_key, SALT_SIZE};

/// Prefix encrypted in front of every message so the plaintext is never
/// empty. Stripped again after decryption.
pub const PLACEHOLDER: &str = "classified.html\n";

/// Result of a successful decryption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decrypted {
    /// The decrypted message with the placeholder removed
    pub text: String,
    /// Iteration count stored in the envelope, to be reused on re-save
    pub iterations: u32,
}

/// Fill an array from the operating system CSPRNG
///
/// Fails closed: an unavailable RNG is an error, never a fallback.
pub fn random_bytes<const N: usize>() -> ClassifiedResult<[u8; N]> {
    let mut bytes = [0u8; N];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| ClassifiedError::Rng(e.to_string()))?;
    Ok(bytes)
}

/// Encrypt a message with a key derived from `password`
pub fn encrypt(password: &str, plaintext: &str, iterations: u32) -> ClassifiedResult<Envelope> {
    let salt: [u8; SALT_SIZE] = random_bytes()?;
    let iv: [u8; IV_SIZE] = random_bytes()?;
    let key = derive_key(password, &salt, iterations)?;

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| ClassifiedError::KeyDerivation(format!("Failed to create cipher: {}", e)))?;

    let mut message = Zeroizing::new(String::with_capacity(PLACEHOLDER.len() + plaintext.len()));
    message.push_str(PLACEHOLDER);
    message.push_str(plaintext);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&iv), message.as_bytes())
        .map_err(|e| ClassifiedError::Format(format!("Encryption failed: {}", e)))?;

    Ok(Envelope {
        salt,
        iv,
        iterations,
        ciphertext,
    })
}

/// Decrypt an envelope with a key derived from `password`
pub fn decrypt(password: &str, envelope: &Envelope) -> ClassifiedResult<Decrypted> {
    let key = derive_key(password, &envelope.salt, envelope.iterations)?;

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| ClassifiedError::KeyDerivation(format!("Failed to create cipher: {}", e)))?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(&envelope.iv), envelope.ciphertext.as_ref())
        .map(Zeroizing::new)
        .map_err(|_| ClassifiedError::Authentication)?;

    let message = std::str::from_utf8(&plaintext).map_err(|_| ClassifiedError::Authentication)?;
    let text = message
        .strip_prefix(PLACEHOLDER)
        .ok_or(ClassifiedError::Authentication)?;

    Ok(Decrypted {
        text: text.to_string(),
        iterations: envelope.iterations,
    })
}

/// Parse stored envelope text and decrypt it
pub fn decrypt_str(password: &str, stored: &str) -> ClassifiedResult<Decrypted> {
    let envelope = Envelope::parse(stored)?;
    decrypt(password, &envelope)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITERATIONS: u32 = 1_000;

    #[test]
    fn test_encrypt_decrypt() {
        let envelope = encrypt("hunter2", "Hello, World!", ITERATIONS).unwrap();
        let decrypted = decrypt("hunter2", &envelope).unwrap();

        assert_eq!(decrypted.text, "Hello, World!");
        assert_eq!(decrypted.iterations, ITERATIONS);
    }

    #[test]
    fn test_round_trip_awkward_messages() {
        let messages = [
            "",
            "\n",
            "line one\nline two\n\nline four",
            "nul\0inside\0",
            "unicode: äöå 🔐 漢字",
            "classified.html\n",
        ];

        for message in messages {
            let envelope = encrypt("pw", message, ITERATIONS).unwrap();
            let decrypted = decrypt("pw", &envelope).unwrap();
            assert_eq!(decrypted.text, message);
        }
    }

    #[test]
    fn test_round_trip_through_text() {
        let envelope = encrypt("hunter2", "stored\nrows", ITERATIONS).unwrap();
        let stored = envelope.serialize();
        let decrypted = decrypt_str("hunter2", &stored).unwrap();
        assert_eq!(decrypted.text, "stored\nrows");
    }

    #[test]
    fn test_fresh_salt_and_iv() {
        let envelope1 = encrypt("hunter2", "same", ITERATIONS).unwrap();
        let envelope2 = encrypt("hunter2", "same", ITERATIONS).unwrap();

        assert_ne!(envelope1.salt, envelope2.salt);
        assert_ne!(envelope1.iv, envelope2.iv);
        assert_ne!(envelope1.ciphertext, envelope2.ciphertext);
    }

    #[test]
    fn test_wrong_password_fails() {
        let envelope = encrypt("p1", "secret", ITERATIONS).unwrap();
        let result = decrypt("p2", &envelope);
        assert!(matches!(result, Err(ClassifiedError::Authentication)));
    }

    #[test]
    fn test_wrong_password_fails_for_empty_message() {
        let envelope = encrypt("p1", "", ITERATIONS).unwrap();
        let result = decrypt("p2", &envelope);
        assert!(matches!(result, Err(ClassifiedError::Authentication)));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let mut envelope = encrypt("hunter2", "secret", ITERATIONS).unwrap();
        envelope.ciphertext[0] ^= 0xFF;

        let result = decrypt("hunter2", &envelope);
        assert!(matches!(result, Err(ClassifiedError::Authentication)));
    }

    #[test]
    fn test_truncated_ciphertext_fails() {
        let mut envelope = encrypt("hunter2", "secret", ITERATIONS).unwrap();
        envelope.ciphertext.truncate(4);

        let result = decrypt("hunter2", &envelope);
        assert!(matches!(result, Err(ClassifiedError::Authentication)));
    }

    #[test]
    fn test_tampered_iterations_fail_authentication() {
        let mut envelope = encrypt("hunter2", "secret", ITERATIONS).unwrap();
        envelope.iterations += 1;

        let result = decrypt("hunter2", &envelope);
        assert!(matches!(result, Err(ClassifiedError::Authentication)));
    }

    #[test]
    fn test_zero_iterations_is_key_derivation_error() {
        let result = encrypt("hunter2", "secret", 0);
        assert!(matches!(result, Err(ClassifiedError::KeyDerivation(_))));
    }

    #[test]
    fn test_malformed_text_is_format_error() {
        let result = decrypt_str("hunter2", "not an envelope");
        assert!(matches!(result, Err(ClassifiedError::Format(_))));
    }
}
