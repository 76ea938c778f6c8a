//! Row listing for the interactive loop

/// Format rows as a numbered listing
///
/// The number column is as wide as the largest row number, at least two
/// characters.
pub fn format_row_list(rows: &[String]) -> String {
    let number_width = rows.len().to_string().len().max(2);

    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            format!(
                "{:<number_width$} {}",
                index + 1,
                row,
                number_width = number_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
