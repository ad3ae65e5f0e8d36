//! Single-cell notation ("A1", "AB12")

use lazy_regex::regex_captures;

use crate::error::{Error, Result};

/// Letter and row parts of a cell such as `"AB12"`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellParts {
    /// Column letters, exactly as written
    pub column: String,
    /// Row number, as written (not shifted to zero-based)
    pub row: u32,
}

fn split_cell(cell: &str) -> Option<(&str, &str)> {
    regex_captures!(r"^([A-Z]+)([0-9]+)$", cell).map(|(_, column, row)| (column, row))
}

/// Check whether `cell` is one or more uppercase letters followed by one or
/// more digits, with nothing before or after.
pub fn validate_cell(cell: &str) -> bool {
    split_cell(cell).is_some()
}

/// Split a cell into its column letters and row number.
///
/// # Examples
/// ```
/// use vitrine_core::extract_column_and_row_from_cell;
///
/// let parts = extract_column_and_row_from_cell("AB12").unwrap();
/// assert_eq!(parts.column, "AB");
/// assert_eq!(parts.row, 12);
/// ```
pub fn extract_column_and_row_from_cell(cell: &str) -> Result<CellParts> {
    let (column, row) = split_cell(cell).ok_or_else(|| Error::InvalidCell(cell.to_string()))?;
    let row = row
        .parse::<u32>()
        .map_err(|_| Error::InvalidCell(cell.to_string()))?;

    Ok(CellParts {
        column: column.to_string(),
        row,
    })
}
