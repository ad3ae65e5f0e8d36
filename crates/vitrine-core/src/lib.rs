//! # vitrine-core
//!
//! Spreadsheet-style cell and range notation for the vitrine demo utilities.
//!
//! - [`validate_cell`] / [`extract_column_and_row_from_cell`] - single cells ("AB12")
//! - [`excel_column_str_to_column_index`] - column letters to zero-based index
//! - [`CellRangeOption`] - a two-cell range ("A1:C10") and its bounds
//!
//! All functions are pure; failures are returned as [`Error`] values.
//!
//! ## Example
//!
//! ```rust
//! use vitrine_core::{get_column_index_bound, get_starting_cell_row_number, CellRangeOption};
//!
//! let range: CellRangeOption = "B2:D10".parse().unwrap();
//! let bound = get_column_index_bound(&range).unwrap();
//! assert_eq!(bound.left_bound_index, 1);
//! assert_eq!(bound.right_bound_index, 3);
//! assert_eq!(get_starting_cell_row_number(&range).unwrap(), 2);
//! ```

pub mod cell;
pub mod column;
pub mod error;
pub mod range;

pub use cell::{extract_column_and_row_from_cell, validate_cell, CellParts};
pub use column::{column_index_to_excel_column_str, excel_column_str_to_column_index};
pub use error::{Error, Result};
pub use range::{
    get_column_index_bound, get_starting_cell_row_number, validate_cell_range, CellRangeOption,
    ColumnIndexBound,
};
