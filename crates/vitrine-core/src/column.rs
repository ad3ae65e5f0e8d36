//! Column letter encoding (A = 0, Z = 25, AA = 26, ...)

use crate::error::{Error, Result};

/// Convert column letters to a zero-based index.
///
/// Each letter is a base-26 digit with `A` = 1 and `Z` = 26; the final sum
/// is shifted down by one so that `A` maps to 0. Only uppercase `A-Z` is
/// accepted.
///
/// # Examples
/// ```
/// use vitrine_core::excel_column_str_to_column_index;
///
/// assert_eq!(excel_column_str_to_column_index("A").unwrap(), 0);
/// assert_eq!(excel_column_str_to_column_index("AB").unwrap(), 27);
/// assert!(excel_column_str_to_column_index("a").is_err());
/// ```
pub fn excel_column_str_to_column_index(column: &str) -> Result<u32> {
    if column.is_empty() || !column.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(Error::InvalidColumn);
    }

    let mut index: u32 = 0;
    for b in column.bytes() {
        let digit = (b - b'A') as u32 + 1;
        index = index
            .checked_mul(26)
            .and_then(|n| n.checked_add(digit))
            .ok_or_else(|| Error::ColumnOverflow(column.to_string()))?;
    }

    Ok(index - 1)
}

/// Convert a zero-based column index to letters (0 = A, 25 = Z, 26 = AA).
pub fn column_index_to_excel_column_str(index: u32) -> String {
    let mut letters = Vec::new();
    let mut n = index as u64 + 1;

    while n > 0 {
        n -= 1;
        letters.push((n % 26) as u8 + b'A');
        n /= 26;
    }

    letters.reverse();
    // Only ASCII uppercase bytes were pushed
    letters.into_iter().map(char::from).collect()
}
