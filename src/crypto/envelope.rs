//! Storable envelope text format
//!
//! An envelope is rendered as plain text so it can be embedded verbatim in a
//! carrier file:
//!
//! ```text
//! version:1
//! salt:12-200-7-...
//! iv:81-3-254-...
//! iterations:100000
//! data:
//! <base64 ciphertext, wrapped at 100 columns>
//! ```
//!
//! Salt and IV are dash-separated decimal byte values. Line wrapping of the
//! ciphertext is cosmetic and undone before base64 decoding.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{ClassifiedError, ClassifiedResult};

use super::key_derivation::{DEFAULT_ITERATIONS, SALT_SIZE};

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const IV_SIZE: usize = 12;

/// Column width of the wrapped base64 ciphertext
pub const DATA_LINE_LEN: usize = 100;

/// Envelope scheme version: PBKDF2-HMAC-SHA-512 key, AES-256-GCM cipher
pub const ENVELOPE_VERSION: u32 = 1;

/// Salt, IV, iteration count and ciphertext of one encryption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub salt: [u8; SALT_SIZE],
    pub iv: [u8; IV_SIZE],
    pub iterations: u32,
    /// Ciphertext with the authentication tag appended
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Render the envelope as storable text
    pub fn serialize(&self) -> String {
        let encoded = STANDARD.encode(&self.ciphertext);
        format!(
            "version:{}\nsalt:{}\niv:{}\niterations:{}\ndata:\n{}\n",
            ENVELOPE_VERSION,
            join_bytes(&self.salt),
            join_bytes(&self.iv),
            self.iterations,
            wrap_lines(&encoded, DATA_LINE_LEN)
        )
    }

    /// Parse envelope text produced by [`Envelope::serialize`]
    ///
    /// Also accepts envelopes without a `version:` line (treated as version
    /// 1) and without an `iterations:` line (the historical fixed count).
    pub fn parse(text: &str) -> ClassifiedResult<Self> {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let mut lines = normalized
            .split('\n')
            .skip_while(|line| line.trim().is_empty())
            .peekable();

        if let Some(value) = lines.peek().and_then(|line| line.strip_prefix("version:")) {
            let version = parse_number("version", value)?;
            if version != ENVELOPE_VERSION {
                return Err(ClassifiedError::format(format!(
                    "unsupported envelope version: {}",
                    version
                )));
            }
            lines.next();
        }

        let salt = expect_field(lines.next(), "salt:")?;
        let salt: [u8; SALT_SIZE] = parse_byte_array("salt", salt)?;

        let iv = expect_field(lines.next(), "iv:")?;
        let iv: [u8; IV_SIZE] = parse_byte_array("iv", iv)?;

        let iterations = match lines.peek().and_then(|line| line.strip_prefix("iterations:")) {
            Some(value) => {
                let iterations = parse_number("iterations", value)?;
                lines.next();
                iterations
            }
            None => DEFAULT_ITERATIONS,
        };
        if iterations == 0 {
            return Err(ClassifiedError::format("iterations must be positive"));
        }

        let data = expect_field(lines.next(), "data:")?;
        if !data.trim().is_empty() {
            return Err(ClassifiedError::format("unexpected content on the data line"));
        }

        let encoded: String = lines.map(str::trim).collect();
        if encoded.is_empty() {
            return Err(ClassifiedError::format("missing ciphertext"));
        }
        let ciphertext = STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| ClassifiedError::format(format!("invalid ciphertext encoding: {}", e)))?;

        Ok(Self {
            salt,
            iv,
            iterations,
            ciphertext,
        })
    }
}

fn join_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join("-")
}

/// Split an ASCII string into lines of at most `width` characters
fn wrap_lines(s: &str, width: usize) -> String {
    s.as_bytes()
        .chunks(width)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

fn expect_field<'a>(line: Option<&'a str>, prefix: &str) -> ClassifiedResult<&'a str> {
    let line = line.ok_or_else(|| {
        ClassifiedError::format(format!("envelope ended before '{}' line", prefix))
    })?;
    line.strip_prefix(prefix).ok_or_else(|| {
        ClassifiedError::format(format!("expected '{}' line", prefix))
    })
}

fn parse_number(field: &str, value: &str) -> ClassifiedResult<u32> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| {
            ClassifiedError::format(format!("invalid {} value: '{}'", field, value.trim()))
        })
}

fn parse_byte_array<const N: usize>(field: &str, value: &str) -> ClassifiedResult<[u8; N]> {
    let bytes = value
        .trim()
        .split('-')
        .map(|part| part.parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|_| ClassifiedError::format(format!("invalid {} byte list", field)))?;

    bytes.try_into().map_err(|bytes: Vec<u8>| {
        ClassifiedError::format(format!(
            "invalid {} length: expected {}, got {}",
            field,
            N,
            bytes.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Envelope {
        Envelope {
            salt: [
                0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 255,
            ],
            iv: [9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 128, 64],
            iterations: 1234,
            ciphertext: (0..300u32).map(|i| (i % 251) as u8).collect(),
        }
    }

    #[test]
    fn test_serialize_layout() {
        let text = sample().serialize();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "version:1");
        assert_eq!(lines[1], "salt:0-1-2-3-4-5-6-7-8-9-10-11-12-13-14-255");
        assert_eq!(lines[2], "iv:9-8-7-6-5-4-3-2-1-0-128-64");
        assert_eq!(lines[3], "iterations:1234");
        assert_eq!(lines[4], "data:");
        // 300 bytes -> 400 base64 characters -> 4 full lines
        assert_eq!(lines.len(), 9);
        assert!(lines[5..].iter().all(|line| line.len() == DATA_LINE_LEN));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_parse_serialized() {
        let envelope = sample();
        let parsed = Envelope::parse(&envelope.serialize()).unwrap();
        assert_eq!(parsed, envelope);
    }

    #[test]
    fn test_parse_tolerates_leading_blank_line_and_crlf() {
        let text = format!("\n{}", sample().serialize().replace('\n', "\r\n"));
        let parsed = Envelope::parse(&text).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_parse_without_version_or_iterations() {
        let text = "\nsalt:1-1-1-1-1-1-1-1-1-1-1-1-1-1-1-1\n\
            iv:2-2-2-2-2-2-2-2-2-2-2-2\ndata:\nAAAA\n";
        let parsed = Envelope::parse(text).unwrap();
        assert_eq!(parsed.iterations, DEFAULT_ITERATIONS);
        assert_eq!(parsed.ciphertext, vec![0, 0, 0]);
    }

    #[test]
    fn test_parse_rejects_wrong_lengths() {
        let short_salt = "salt:1-2-3\niv:2-2-2-2-2-2-2-2-2-2-2-2\niterations:5\ndata:\nAAAA\n";
        assert!(matches!(
            Envelope::parse(short_salt),
            Err(ClassifiedError::Format(_))
        ));

        let long_iv = "salt:1-1-1-1-1-1-1-1-1-1-1-1-1-1-1-1\n\
            iv:2-2-2-2-2-2-2-2-2-2-2-2-2\niterations:5\ndata:\nAAAA\n";
        assert!(matches!(
            Envelope::parse(long_iv),
            Err(ClassifiedError::Format(_))
        ));
    }

    #[test]
    fn test_parse_rejects_malformed_fields() {
        let cases = [
            "",
            "garbage",
            "salt:1-1-1-1-1-1-1-1-1-1-1-1-1-1-1-300\niv:2-2-2-2-2-2-2-2-2-2-2-2\ndata:\nAAAA",
            "salt:1-1-1-1-1-1-1-1-1-1-1-1-1-1-1-1\n\
                iv:2-2-2-2-2-2-2-2-2-2-2-2\niterations:abc\ndata:\nAAAA",
            "salt:1-1-1-1-1-1-1-1-1-1-1-1-1-1-1-1\n\
                iv:2-2-2-2-2-2-2-2-2-2-2-2\niterations:0\ndata:\nAAAA",
            "salt:1-1-1-1-1-1-1-1-1-1-1-1-1-1-1-1\n\
                iv:2-2-2-2-2-2-2-2-2-2-2-2\niterations:5\ndata:\n",
            "salt:1-1-1-1-1-1-1-1-1-1-1-1-1-1-1-1\n\
                iv:2-2-2-2-2-2-2-2-2-2-2-2\niterations:5\ndata:\n!!!!",
            "salt:1-1-1-1-1-1-1-1-1-1-1-1-1-1-1-1\niv:2-2-2-2-2-2-2-2-2-2-2-2\niterations:5",
            "version:2\nsalt:1-1-1-1-1-1-1-1-1-1-1-1-1-1-1-1\n\
                iv:2-2-2-2-2-2-2-2-2-2-2-2\ndata:\nAAAA",
        ];

        for case in cases {
            let result = Envelope::parse(case);
            assert!(
                matches!(result, Err(ClassifiedError::Format(_))),
                "expected format error for {:?}",
                case
            );
        }
    }
}
