//! Display formatting for terminal output

pub mod rows;

pub use rows::format_row_list;
