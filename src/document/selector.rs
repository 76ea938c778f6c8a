//! Row selectors
//!
//! A selector made only of decimal digits is a 1-based row number. Anything
//! else selects the rows whose content starts with the selector.

use std::fmt;

use crate::error::{ClassifiedError, ClassifiedResult};

/// Parsed row address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// 1-based row number
    Number(usize),
    /// Every row starting with this prefix
    Prefix(String),
}

impl Selector {
    /// Parse a selector string
    ///
    /// Digit-only strings must be a positive row number. The empty string
    /// counts as digit-only and is therefore rejected.
    pub fn parse(input: &str) -> ClassifiedResult<Self> {
        if input.bytes().all(|b| b.is_ascii_digit()) {
            return match input.parse::<usize>() {
                Ok(number) if number > 0 => Ok(Self::Number(number)),
                _ => Err(ClassifiedError::Index(format!(
                    "not a proper row: {}",
                    input
                ))),
            };
        }
        Ok(Self::Prefix(input.to_string()))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{}", number),
            Self::Prefix(prefix) => f.write_str(prefix),
        }
    }
}
