//! Header reading options

/// Options for reading delimited text
#[derive(Debug, Clone)]
pub struct HeaderReadOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
}

impl Default for HeaderReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
        }
    }
}

/// Spreadsheet container, detected from the leading bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    /// Office Open XML workbook (a ZIP archive)
    Xlsx,
    /// Delimited text
    Csv,
}

const ZIP_SIGNATURE: &[u8] = b"PK\x03\x04";

impl SheetFormat {
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(ZIP_SIGNATURE) {
            SheetFormat::Xlsx
        } else {
            SheetFormat::Csv
        }
    }
}
