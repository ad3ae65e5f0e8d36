//! Header reading error types

use thiserror::Error;

/// Result type for header reading
pub type HeadersResult<T> = std::result::Result<T, HeadersError>;

/// Errors that can occur while reading header rows
#[derive(Debug, Error)]
pub enum HeadersError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// CSV library error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Cell reference in the sheet could not be decoded
    #[error("Cell reference error: {0}")]
    Cell(#[from] vitrine_core::Error),

    /// Missing required XLSX part
    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// Cell or row reference past the sheet's maximum size
    #[error("Reference {0} is outside the sheet (max XFD1048576)")]
    ReferenceOutOfRange(String),

    /// Requested header row is past the end of the data
    #[error("Header row {row} is out of range (sheet has {rows} rows)")]
    RowOutOfRange { row: usize, rows: usize },
}
