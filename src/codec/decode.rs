//! Section decoder

use crate::error::{ClassifiedError, ClassifiedResult};

use super::{utf16_offset, PART_SEPARATOR, SECTION_SEPARATOR, TEXT_SECTION};

/// Decoded document content
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Decoded {
    /// Concatenated parts of the `text` section
    pub text: String,
    /// Names of sections that were skipped because they are not understood
    pub skipped: Vec<String>,
}

/// Decode the document text, skipping unknown sections
pub fn decode(input: &str) -> ClassifiedResult<String> {
    decode_detailed(input).map(|decoded| decoded.text)
}

/// Decode the document, also reporting which sections were skipped
pub fn decode_detailed(input: &str) -> ClassifiedResult<Decoded> {
    let separator = input
        .find(SECTION_SEPARATOR)
        .ok_or_else(|| ClassifiedError::format("missing header length"))?;

    let length_field = &input[..separator];
    if length_field.is_empty() || !length_field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ClassifiedError::format(format!(
            "invalid header length: '{}'",
            length_field
        )));
    }
    let header_len: usize = length_field.parse().map_err(|_| {
        ClassifiedError::format(format!("invalid header length: '{}'", length_field))
    })?;

    let rest = &input[separator + 1..];
    let header_end = utf16_offset(rest, header_len).ok_or_else(|| {
        ClassifiedError::format(format!("header length {} exceeds input", header_len))
    })?;
    let (header, mut body) = rest.split_at(header_end);

    let mut decoded = Decoded::default();

    for section in header.split(SECTION_SEPARATOR) {
        let mut fields = section.split(PART_SEPARATOR);
        let name = fields.next().unwrap_or_default();

        let mut parts = Vec::new();
        for length in fields {
            let length: usize = length.parse().map_err(|_| {
                ClassifiedError::format(format!(
                    "invalid part length '{}' in section '{}'",
                    length, name
                ))
            })?;
            let end = utf16_offset(body, length).ok_or_else(|| {
                ClassifiedError::format(format!(
                    "part length {} of section '{}' exceeds input",
                    length, name
                ))
            })?;
            let (part, remaining) = body.split_at(end);
            parts.push(part);
            body = remaining;
        }

        match name {
            TEXT_SECTION => parts.iter().for_each(|part| decoded.text.push_str(part)),
            "" if parts.is_empty() => {}
            _ => {
                log::warn!("Unknown header section: {}", name);
                decoded.skipped.push(name.to_string());
            }
        }
    }

    if !body.is_empty() {
        log::debug!("Ignoring {} trailing bytes after the last section", body.len());
    }

    Ok(decoded)
}
