//! Row-addressable document model
//!
//! The decoded document text is held as an ordered list of rows. Rows are
//! addressed either by 1-based number or by a prefix of their content.

mod rows;
mod selector;

pub use rows::RowDocument;
pub use selector::Selector;
