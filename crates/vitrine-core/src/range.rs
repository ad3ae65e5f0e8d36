//! Cell range notation ("A1:C10")

use std::fmt;
use std::str::FromStr;

use crate::cell::{extract_column_and_row_from_cell, validate_cell, CellParts};
use crate::column::excel_column_str_to_column_index;
use crate::error::{Error, Result};

/// A range as typed into a form: two cells, top-left first.
///
/// Nothing is checked at construction time; use [`validate_cell_range`]
/// or the bound accessors, which fail on malformed or reversed ranges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CellRangeOption {
    /// Top-left cell, e.g. `"A1"`
    pub starting_cell: String,
    /// Bottom-right cell, e.g. `"C10"`
    pub ending_cell: String,
}

/// Inclusive, zero-based column interval of a range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ColumnIndexBound {
    pub left_bound_index: u32,
    pub right_bound_index: u32,
}

impl ColumnIndexBound {
    /// Number of columns covered by the interval
    pub fn width(&self) -> u32 {
        self.right_bound_index - self.left_bound_index + 1
    }

    /// Check if a zero-based column index falls inside the interval
    pub fn contains(&self, index: u32) -> bool {
        (self.left_bound_index..=self.right_bound_index).contains(&index)
    }
}

impl CellRangeOption {
    /// Create a range from its two endpoint cells
    pub fn new(starting_cell: impl Into<String>, ending_cell: impl Into<String>) -> Self {
        Self {
            starting_cell: starting_cell.into(),
            ending_cell: ending_cell.into(),
        }
    }

    /// Split `"A1:C10"` into its two cells.
    ///
    /// Only the shape is checked here (exactly one `:`); the cells
    /// themselves are validated by [`validate_cell_range`].
    pub fn parse(s: &str) -> Result<Self> {
        let (start, end) = s.split_once(':').ok_or(Error::InvalidRange)?;
        if end.contains(':') {
            return Err(Error::InvalidRange);
        }
        Ok(Self::new(start.trim(), end.trim()))
    }

    /// Check this range (see [`validate_cell_range`])
    pub fn is_valid(&self) -> bool {
        validate_cell_range(self)
    }

    /// Column interval of this range (see [`get_column_index_bound`])
    pub fn column_bound(&self) -> Result<ColumnIndexBound> {
        get_column_index_bound(self)
    }

    /// Starting row of this range (see [`get_starting_cell_row_number`])
    pub fn starting_row(&self) -> Result<u32> {
        get_starting_cell_row_number(self)
    }

    /// Number of columns the range spans
    pub fn column_count(&self) -> Result<u32> {
        Ok(self.column_bound()?.width())
    }

    /// Check if a zero-based column index is inside the range
    pub fn contains_column(&self, index: u32) -> Result<bool> {
        Ok(self.column_bound()?.contains(index))
    }
}

impl fmt::Display for CellRangeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.starting_cell, self.ending_cell)
    }
}

impl FromStr for CellRangeOption {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Decoded endpoint: column index and row number
fn decode(cell: &str) -> Option<(u32, u32)> {
    let CellParts { column, row } = extract_column_and_row_from_cell(cell).ok()?;
    let index = excel_column_str_to_column_index(&column).ok()?;
    Some((index, row))
}

/// Check that both endpoints are well-formed cells and that the start is
/// neither right of nor below the end.
///
/// Columns are compared by index, so `Z1:AA2` is a valid range.
pub fn validate_cell_range(range: &CellRangeOption) -> bool {
    if !validate_cell(&range.starting_cell) || !validate_cell(&range.ending_cell) {
        return false;
    }

    match (decode(&range.starting_cell), decode(&range.ending_cell)) {
        (Some((start_col, start_row)), Some((end_col, end_row))) => {
            start_col <= end_col && start_row <= end_row
        }
        _ => false,
    }
}

/// Zero-based column indices of both endpoints.
///
/// # Examples
/// ```
/// use vitrine_core::{get_column_index_bound, CellRangeOption};
///
/// let bound = get_column_index_bound(&CellRangeOption::new("AA1", "AC3")).unwrap();
/// assert_eq!((bound.left_bound_index, bound.right_bound_index), (26, 28));
/// ```
pub fn get_column_index_bound(range: &CellRangeOption) -> Result<ColumnIndexBound> {
    if !validate_cell_range(range) {
        return Err(Error::InvalidRange);
    }

    let start = extract_column_and_row_from_cell(&range.starting_cell)?;
    let end = extract_column_and_row_from_cell(&range.ending_cell)?;

    Ok(ColumnIndexBound {
        left_bound_index: excel_column_str_to_column_index(&start.column)?,
        right_bound_index: excel_column_str_to_column_index(&end.column)?,
    })
}

/// Row number of the starting cell, as written.
pub fn get_starting_cell_row_number(range: &CellRangeOption) -> Result<u32> {
    if !validate_cell_range(range) {
        return Err(Error::InvalidRange);
    }

    Ok(extract_column_and_row_from_cell(&range.starting_cell)?.row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validate_range() {
        assert!(validate_cell_range(&CellRangeOption::new("A1", "B2")));
        assert!(validate_cell_range(&CellRangeOption::new("A1", "A1")));
        assert!(!validate_cell_range(&CellRangeOption::new("B2", "A1")));
        assert!(!validate_cell_range(&CellRangeOption::new("A2", "B1")));
        assert!(!validate_cell_range(&CellRangeOption::new("B1", "A2")));
        assert!(!validate_cell_range(&CellRangeOption::new("A1", "B2C")));
        assert!(!validate_cell_range(&CellRangeOption::new("", "B2")));
    }

    #[test]
    fn test_validate_range_across_single_letter_boundary() {
        // Lexicographically "Z" > "AA", by index 25 < 26
        assert!(validate_cell_range(&CellRangeOption::new("Z1", "AA2")));
        assert!(!validate_cell_range(&CellRangeOption::new("AA1", "Z2")));
    }

    #[test]
    fn test_column_bound() {
        let bound = get_column_index_bound(&CellRangeOption::new("A1", "C3")).unwrap();
        assert_eq!(
            bound,
            ColumnIndexBound {
                left_bound_index: 0,
                right_bound_index: 2
            }
        );
        assert_eq!(bound.width(), 3);
        assert!(bound.contains(2));
        assert!(!bound.contains(3));

        let bound = get_column_index_bound(&CellRangeOption::new("AA1", "AC3")).unwrap();
        assert_eq!(bound.left_bound_index, 26);
        assert_eq!(bound.right_bound_index, 28);
    }

    #[test]
    fn test_column_bound_invalid() {
        let err = get_column_index_bound(&CellRangeOption::new("C1", "A3")).unwrap_err();
        assert_eq!(err, Error::InvalidRange);
        assert_eq!(err.to_string(), "Invalid cell range");
    }

    #[test]
    fn test_starting_row() {
        assert_eq!(
            get_starting_cell_row_number(&CellRangeOption::new("A1", "C3")).unwrap(),
            1
        );
        assert_eq!(
            get_starting_cell_row_number(&CellRangeOption::new("B12", "D40")).unwrap(),
            12
        );
        assert_eq!(
            get_starting_cell_row_number(&CellRangeOption::new("C3", "A1")),
            Err(Error::InvalidRange)
        );
    }

    #[test]
    fn test_parse_notation() {
        let range = CellRangeOption::parse("A1:C10").unwrap();
        assert_eq!(range, CellRangeOption::new("A1", "C10"));
        assert_eq!(range.to_string(), "A1:C10");

        let range: CellRangeOption = " B2 : D4 ".parse().unwrap();
        assert_eq!(range, CellRangeOption::new("B2", "D4"));

        assert_eq!(CellRangeOption::parse("A1"), Err(Error::InvalidRange));
        assert_eq!(CellRangeOption::parse("A1:B2:C3"), Err(Error::InvalidRange));
    }

    #[test]
    fn test_helpers() {
        let range = CellRangeOption::new("B1", "D9");
        assert!(range.is_valid());
        assert_eq!(range.column_count().unwrap(), 3);
        assert!(range.contains_column(1).unwrap());
        assert!(!range.contains_column(0).unwrap());
        assert_eq!(range.starting_row().unwrap(), 1);
    }
}
