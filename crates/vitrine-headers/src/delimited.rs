//! Leading rows of delimited text

use crate::error::HeadersResult;
use crate::options::HeaderReadOptions;

/// Read at most `limit` records. Records may have different widths.
pub(crate) fn read_rows(
    bytes: &[u8],
    options: &HeaderReadOptions,
    limit: usize,
) -> HeadersResult<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .quote(options.quote)
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records().take(limit) {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    log::debug!("read {} delimited rows", rows.len());
    Ok(rows)
}
