//! Header extraction from an in-memory spreadsheet

use crate::delimited;
use crate::error::{HeadersError, HeadersResult};
use crate::message::{HeaderRequest, Headers};
use crate::options::{HeaderReadOptions, SheetFormat};
use crate::xlsx;

/// Placeholder name for an empty header cell at `index`
pub fn unnamed_column(index: usize) -> String {
    format!("Unnamed: {index}")
}

fn leading_rows(
    bytes: &[u8],
    options: &HeaderReadOptions,
    limit: usize,
) -> HeadersResult<Vec<Vec<String>>> {
    match SheetFormat::detect(bytes) {
        SheetFormat::Xlsx => xlsx::read_rows(bytes, limit),
        SheetFormat::Csv => delimited::read_rows(bytes, options, limit),
    }
}

/// Read the headers a request asks for.
///
/// With `read_first_n_rows` set, the leading rows are returned as a grid,
/// every row padded to the widest one. Otherwise the single row at
/// `header_row` (default 0) is returned with empty cells renamed to
/// `"Unnamed: <index>"`.
pub fn read_headers(request: &HeaderRequest, options: &HeaderReadOptions) -> HeadersResult<Headers> {
    if let Some(n) = request.read_first_n_rows {
        let mut rows = leading_rows(&request.file, options, n)?;
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, String::new());
        }
        return Ok(Headers::Rows(rows));
    }

    let header_row = request.header_row.unwrap_or(0);
    let rows = leading_rows(&request.file, options, header_row.saturating_add(1))?;
    let available = rows.len();
    let row = rows
        .into_iter()
        .nth(header_row)
        .ok_or(HeadersError::RowOutOfRange {
            row: header_row,
            rows: available,
        })?;

    Ok(Headers::Row(
        row.into_iter()
            .enumerate()
            .map(|(i, name)| if name.is_empty() { unnamed_column(i) } else { name })
            .collect(),
    ))
}
