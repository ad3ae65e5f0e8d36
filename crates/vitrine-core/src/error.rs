//! Error types for vitrine-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding cell notation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Cell does not match letters-then-digits notation
    #[error("Invalid cell: {0}")]
    InvalidCell(String),

    /// Range endpoints are malformed or out of order
    #[error("Invalid cell range")]
    InvalidRange,

    /// Column string contains something other than `A-Z`
    #[error("Invalid input: column string must only contain uppercase A-Z characters.")]
    InvalidColumn,

    /// Column string encodes an index too large to represent
    #[error("Column '{0}' is out of range")]
    ColumnOverflow(String),
}
