//! Self-describing section encoding for document content
//!
//! The encoded form is a header followed by a body. The header starts with
//! its own length, then lists sections separated by `&`; each section is a
//! name followed by the lengths of its parts, separated by `|`. The body is
//! every part concatenated in header order. Because all lengths are explicit
//! no character of the input ever needs escaping, and a decoder can step over
//! sections it does not understand.
//!
//! ```text
//! values: [key1, value1], [key2, value2]   text: "example_text"
//! 22&values|4|6|4|6&text|12key1value1key2value2example_text
//! ```
//!
//! Lengths are counted in UTF-16 code units, the unit documents have always
//! been written with.

mod decode;
mod encode;

pub use decode::{decode, decode_detailed, Decoded};
pub use encode::{encode, Encoder};

/// Name of the section carrying the document text
pub const TEXT_SECTION: &str = "text";

/// Separator between the header length and sections, and between sections
pub(crate) const SECTION_SEPARATOR: char = '&';

/// Separator between a section name and its part lengths
pub(crate) const PART_SEPARATOR: char = '|';

/// Length of `s` in UTF-16 code units
pub(crate) fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Byte offset of the point `units` UTF-16 code units into `s`
///
/// Returns `None` when `s` is shorter than `units` or the point falls between
/// the two halves of a surrogate pair.
pub(crate) fn utf16_offset(s: &str, units: usize) -> Option<usize> {
    let mut count = 0;
    for (index, ch) in s.char_indices() {
        if count == units {
            return Some(index);
        }
        count += ch.len_utf16();
        if count > units {
            return None;
        }
    }
    (count == units).then_some(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf16_len() {
        assert_eq!(utf16_len(""), 0);
        assert_eq!(utf16_len("abc"), 3);
        assert_eq!(utf16_len("äö"), 2);
        assert_eq!(utf16_len("🔐"), 2);
    }

    #[test]
    fn test_utf16_offset() {
        assert_eq!(utf16_offset("abc", 0), Some(0));
        assert_eq!(utf16_offset("abc", 2), Some(2));
        assert_eq!(utf16_offset("abc", 3), Some(3));
        assert_eq!(utf16_offset("abc", 4), None);
        assert_eq!(utf16_offset("ä-b", 1), Some(2));
        assert_eq!(utf16_offset("🔐x", 2), Some(4));
        assert_eq!(utf16_offset("🔐x", 1), None);
    }
}
