//! Ordered rows of document text

use crate::error::{ClassifiedError, ClassifiedResult};

use super::Selector;

/// Document content as an ordered list of rows
///
/// Rows never contain a newline: text passed to the mutating operations is
/// split on `\n` and stored as consecutive rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowDocument {
    rows: Vec<String>,
}

fn split_rows(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

impl RowDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from decoded text; empty text has no rows
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::new();
        }
        Self {
            rows: split_rows(text),
        }
    }

    /// Join the rows back into the stored text form
    pub fn to_text(&self) -> String {
        self.rows.join("\n")
    }

    /// All rows in order
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Row by 1-based number
    pub fn row(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|index| self.rows.get(index))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolve a selector to 1-based row numbers, in row order
    ///
    /// Fails with `Index` for row 0 or a number beyond the last row,
    /// `NotFound` when a prefix matches nothing, and `AmbiguousSelector` when
    /// a prefix matches several rows and `allow_multiple` is false.
    pub fn resolve(
        &self,
        selector: &Selector,
        allow_multiple: bool,
    ) -> ClassifiedResult<Vec<usize>> {
        match selector {
            Selector::Number(0) => Err(ClassifiedError::Index("not a proper row: 0".to_string())),
            Selector::Number(number) => {
                if *number > self.rows.len() {
                    return Err(ClassifiedError::Index(format!(
                        "row index too high: {}",
                        number
                    )));
                }
                Ok(vec![*number])
            }
            Selector::Prefix(prefix) => {
                let matches: Vec<usize> = self
                    .rows
                    .iter()
                    .enumerate()
                    .filter(|(_, row)| row.starts_with(prefix.as_str()))
                    .map(|(index, _)| index + 1)
                    .collect();

                match matches.len() {
                    0 => Err(ClassifiedError::row_not_found(prefix.clone())),
                    1 => Ok(matches),
                    count if !allow_multiple => Err(ClassifiedError::AmbiguousSelector {
                        selector: prefix.clone(),
                        count,
                    }),
                    _ => Ok(matches),
                }
            }
        }
    }

    /// Resolve a selector that must identify exactly one row
    pub fn resolve_one(&self, selector: &Selector) -> ClassifiedResult<usize> {
        let numbers = self.resolve(selector, false)?;
        Ok(numbers[0])
    }

    /// Append text as a new row at the end
    pub fn add_text(&mut self, text: &str) {
        self.rows.extend(split_rows(text));
    }

    /// Insert text before the 1-based `index`; `len + 1` appends
    pub fn add_row(&mut self, index: usize, text: &str) -> ClassifiedResult<()> {
        if index == 0 {
            return Err(ClassifiedError::Index("not a proper row: 0".to_string()));
        }
        if index > self.rows.len() + 1 {
            return Err(ClassifiedError::Index(format!(
                "row index too high: {}, use 'add row {}' or 'add text' to add row to the end",
                index,
                self.rows.len() + 1
            )));
        }
        let at = index - 1;
        self.rows.splice(at..at, split_rows(text));
        Ok(())
    }

    /// Replace the content of the uniquely selected row
    ///
    /// Returns the row number that was modified.
    pub fn modify_row(&mut self, selector: &Selector, text: &str) -> ClassifiedResult<usize> {
        self.replace_row(selector, text)
    }

    /// Delete the uniquely selected row, returning its number
    pub fn delete_row(&mut self, selector: &Selector) -> ClassifiedResult<usize> {
        let number = self.resolve_one(selector)?;
        self.rows.remove(number - 1);
        Ok(number)
    }

    /// Remove every row
    pub fn delete_all(&mut self) {
        self.rows.clear();
    }

    /// Overwrite the uniquely selected row, returning its number
    pub fn replace_row(&mut self, selector: &Selector, text: &str) -> ClassifiedResult<usize> {
        let number = self.resolve_one(selector)?;
        let at = number - 1;
        self.rows.splice(at..=at, split_rows(text));
        Ok(number)
    }

    /// Collapse the whole document to the given text
    pub fn replace_all(&mut self, text: &str) {
        self.rows = split_rows(text);
    }

    /// Rows matched by the selector, joined with newlines
    pub fn show_row(
        &self,
        selector: &Selector,
        allow_multiple: bool,
    ) -> ClassifiedResult<String> {
        let numbers = self.resolve(selector, allow_multiple)?;
        Ok(numbers
            .iter()
            .filter_map(|number| self.row(*number))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// The whole document text
    pub fn show_all(&self) -> String {
        self.to_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(rows: &[&str]) -> RowDocument {
        RowDocument::from_text(&rows.join("\n"))
    }

    fn prefix(s: &str) -> Selector {
        Selector::Prefix(s.to_string())
    }

    #[test]
    fn test_from_text() {
        assert!(RowDocument::from_text("").is_empty());
        assert_eq!(RowDocument::from_text("a\nb").rows(), &["a", "b"]);
        assert_eq!(RowDocument::from_text("\n").rows(), &["", ""]);
        assert_eq!(RowDocument::from_text("a\nb").to_text(), "a\nb");
    }

    #[test]
    fn test_resolve_number_and_prefix() {
        let document = doc(&["alpha", "beta", "alpha2"]);

        assert_eq!(document.resolve(&Selector::Number(1), false).unwrap(), vec![1]);
        assert_eq!(document.resolve(&prefix("beta"), false).unwrap(), vec![2]);
        assert_eq!(document.resolve(&prefix("alpha"), true).unwrap(), vec![1, 3]);
    }

    #[test]
    fn test_resolve_failures() {
        let document = doc(&["alpha", "beta", "alpha2"]);

        assert!(matches!(
            document.resolve(&prefix("alpha"), false),
            Err(ClassifiedError::AmbiguousSelector { count: 2, .. })
        ));
        assert!(matches!(
            document.resolve(&Selector::Number(999), false),
            Err(ClassifiedError::Index(_))
        ));
        assert!(matches!(
            document.resolve(&prefix("zzz"), true),
            Err(ClassifiedError::NotFound { .. })
        ));
    }

    #[test]
    fn test_row_zero_is_rejected() {
        let mut document = doc(&["a", "b"]);
        let zero = Selector::Number(0);

        let err = document.delete_row(&zero).unwrap_err();
        assert_eq!(err.to_string(), "not a proper row: 0");
        assert!(matches!(
            document.replace_row(&zero, "x"),
            Err(ClassifiedError::Index(_))
        ));
        assert!(matches!(
            document.modify_row(&zero, "x"),
            Err(ClassifiedError::Index(_))
        ));
        assert!(matches!(
            document.show_row(&zero, true),
            Err(ClassifiedError::Index(_))
        ));
        assert_eq!(document.rows(), &["a", "b"]);
    }

    #[test]
    fn test_add_text_appends() {
        let mut document = RowDocument::new();
        document.add_text("hello");
        document.add_text("");
        assert_eq!(document.rows(), &["hello", ""]);
    }

    #[test]
    fn test_add_row_inserts() {
        let mut document = doc(&["a", "c"]);
        document.add_row(2, "b").unwrap();
        document.add_row(4, "d").unwrap();
        document.add_row(1, "start").unwrap();
        assert_eq!(document.rows(), &["start", "a", "b", "c", "d"]);
    }

    #[test]
    fn test_add_row_index_too_high() {
        let mut document = doc(&["a"]);
        let err = document.add_row(3, "x").unwrap_err();
        assert!(err.to_string().contains("use 'add row 2'"));
        assert!(document.add_row(0, "x").is_err());
        assert_eq!(document.rows(), &["a"]);
    }

    #[test]
    fn test_delete_row() {
        let mut document = doc(&["a", "b", "c"]);
        assert_eq!(document.delete_row(&Selector::Number(2)).unwrap(), 2);
        assert_eq!(document.rows(), &["a", "c"]);
        assert_eq!(document.show_all(), "a\nc");
    }

    #[test]
    fn test_delete_requires_unique_match() {
        let mut document = doc(&["alpha", "beta", "alpha2"]);
        assert!(document.delete_row(&prefix("alpha")).is_err());
        assert_eq!(document.delete_row(&prefix("alpha2")).unwrap(), 3);
        assert_eq!(document.rows(), &["alpha", "beta"]);
    }

    #[test]
    fn test_delete_all() {
        let mut document = doc(&["a", "b"]);
        document.delete_all();
        assert!(document.is_empty());
        assert_eq!(document.to_text(), "");
    }

    #[test]
    fn test_replace_and_modify_row() {
        let mut document = doc(&["email user pass", "note"]);
        assert_eq!(document.replace_row(&prefix("email"), "email user new").unwrap(), 1);
        assert_eq!(document.modify_row(&Selector::Number(2), "edited").unwrap(), 2);
        assert_eq!(document.rows(), &["email user new", "edited"]);
        assert!(document.replace_row(&Selector::Number(3), "x").is_err());
    }

    #[test]
    fn test_replace_all() {
        let mut document = doc(&["a", "b", "c"]);
        document.replace_all("only");
        assert_eq!(document.rows(), &["only"]);
    }

    #[test]
    fn test_show_row() {
        let document = doc(&["alpha", "beta", "alpha2"]);
        assert_eq!(document.show_row(&prefix("alpha"), true).unwrap(), "alpha\nalpha2");
        assert_eq!(document.show_row(&Selector::Number(2), true).unwrap(), "beta");
        assert!(document.show_row(&prefix("alpha"), false).is_err());
    }

    #[test]
    fn test_multiline_text_becomes_rows() {
        let mut document = doc(&["a"]);
        document.add_text("b\nc");
        assert_eq!(document.rows(), &["a", "b", "c"]);
    }
}
