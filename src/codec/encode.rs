//! Section encoder

use crate::error::{ClassifiedError, ClassifiedResult};

use super::{utf16_len, PART_SEPARATOR, SECTION_SEPARATOR, TEXT_SECTION};

/// Builds an encoded document section by section
#[derive(Debug, Default)]
pub struct Encoder {
    sections: Vec<String>,
    body: String,
}

impl Encoder {
    /// Create an empty encoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named section with the given parts
    ///
    /// Section names must be non-empty and must not contain the separator
    /// characters `&` or `|`.
    pub fn section<S: AsRef<str>>(
        &mut self,
        name: &str,
        parts: &[S],
    ) -> ClassifiedResult<&mut Self> {
        if name.is_empty() || name.contains(SECTION_SEPARATOR) || name.contains(PART_SEPARATOR) {
            return Err(ClassifiedError::format(format!(
                "invalid section name: '{}'",
                name
            )));
        }
        self.push(name, parts);
        Ok(self)
    }

    fn push<S: AsRef<str>>(&mut self, name: &str, parts: &[S]) {
        let mut header = name.to_string();
        for part in parts {
            let part = part.as_ref();
            header.push(PART_SEPARATOR);
            header.push_str(&utf16_len(part).to_string());
            self.body.push_str(part);
        }
        self.sections.push(header);
    }

    /// Produce the encoded string: header length, header, body
    pub fn finish(self) -> String {
        let header = self.sections.join(&SECTION_SEPARATOR.to_string());
        format!(
            "{}{}{}{}",
            utf16_len(&header),
            SECTION_SEPARATOR,
            header,
            self.body
        )
    }
}

/// Encode document text as a single `text` section
pub fn encode(text: &str) -> String {
    let mut encoder = Encoder::new();
    encoder.push(TEXT_SECTION, &[text]);
    encoder.finish()
}
