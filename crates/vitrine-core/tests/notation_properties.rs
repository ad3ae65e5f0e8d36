//! Property tests for cell and column notation.

use proptest::prelude::*;
use vitrine_core::{
    column_index_to_excel_column_str, excel_column_str_to_column_index,
    extract_column_and_row_from_cell, get_column_index_bound, get_starting_cell_row_number,
    validate_cell, validate_cell_range, CellRangeOption,
};

proptest! {
    #[test]
    fn well_formed_cells_validate(column in "[A-Z]{1,4}", row in "[0-9]{1,9}") {
        let cell = format!("{column}{row}");
        prop_assert!(validate_cell(&cell));

        let parts = extract_column_and_row_from_cell(&cell).unwrap();
        prop_assert_eq!(parts.column, column);
        prop_assert_eq!(parts.row, row.parse::<u32>().unwrap());
    }

    #[test]
    fn trailing_garbage_is_rejected(cell in "[A-Z]{1,3}[0-9]{1,4}", tail in "[a-zA-Z :$]{1,3}") {
        let candidate = format!("{cell}{tail}");
        prop_assert!(!validate_cell(&candidate));
        prop_assert!(extract_column_and_row_from_cell(&candidate).is_err());
    }

    #[test]
    fn lowercase_cells_are_rejected(cell in "[a-z]{1,3}[0-9]{1,4}") {
        prop_assert!(!validate_cell(&cell));
    }

    #[test]
    fn column_conversion_round_trips(index in 0u32..1_000_000) {
        let letters = column_index_to_excel_column_str(index);
        prop_assert_eq!(excel_column_str_to_column_index(&letters).unwrap(), index);
    }

    #[test]
    fn column_conversion_rejects_foreign_characters(
        prefix in "[A-Z]{0,3}",
        bad in "[a-z0-9_ ]",
        suffix in "[A-Z]{0,3}",
    ) {
        let column = format!("{prefix}{bad}{suffix}");
        prop_assert!(excel_column_str_to_column_index(&column).is_err());
    }

    #[test]
    fn ordered_ranges_are_valid(
        left in 0u32..2000,
        width in 0u32..2000,
        top in 1u32..10_000,
        height in 0u32..10_000,
    ) {
        let start = format!("{}{}", column_index_to_excel_column_str(left), top);
        let end = format!(
            "{}{}",
            column_index_to_excel_column_str(left + width),
            top + height
        );
        let range = CellRangeOption::new(start, end);

        prop_assert!(validate_cell_range(&range));
        let bound = get_column_index_bound(&range).unwrap();
        prop_assert_eq!(bound.left_bound_index, left);
        prop_assert_eq!(bound.right_bound_index, left + width);
        prop_assert_eq!(get_starting_cell_row_number(&range).unwrap(), top);
    }

    #[test]
    fn reversed_columns_are_invalid(left in 0u32..2000, gap in 1u32..2000, row in 1u32..100) {
        let range = CellRangeOption::new(
            format!("{}{}", column_index_to_excel_column_str(left + gap), row),
            format!("{}{}", column_index_to_excel_column_str(left), row),
        );
        prop_assert!(!validate_cell_range(&range));
        prop_assert!(get_column_index_bound(&range).is_err());
        prop_assert!(get_starting_cell_row_number(&range).is_err());
    }
}
