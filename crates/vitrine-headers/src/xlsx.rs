//! Leading rows of the first worksheet in an XLSX workbook.
//!
//! Only what header extraction needs is parsed: the shared string table,
//! the first `<sheet>` of `xl/workbook.xml`, and cell values of that sheet
//! rendered as text. Styles, formulas and number formats are ignored.

use std::collections::HashMap;
use std::io::{BufReader, Cursor, Read, Seek};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use vitrine_core::{excel_column_str_to_column_index, extract_column_and_row_from_cell};

use crate::error::{HeadersError, HeadersResult};

const DEFAULT_SHEET_PATH: &str = "xl/worksheets/sheet1.xml";

/// Columns in a sheet (A..=XFD)
const MAX_COLUMNS: usize = 16_384;
/// Rows in a sheet
const MAX_ROWS: usize = 1_048_576;

/// Decode Excel's `_xHHHH_` escapes (`_x000a_` = LF, `_x005f_` = `_`).
fn decode_excel_escapes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        out.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                out.push(c);
                rest = &candidate[7..];
            }
            None => {
                out.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.to_string()))
}

/// Read at most `limit` rows of the first worksheet.
///
/// Row and column positions follow the `r` references, so gaps in sparse
/// sheets become empty strings.
pub(crate) fn read_rows(bytes: &[u8], limit: usize) -> HeadersResult<Vec<Vec<String>>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

    let shared_strings = read_shared_strings(&mut archive)?;
    let sheet_path = first_sheet_path(&mut archive)?;
    log::debug!("reading headers from {sheet_path}");

    let file = archive
        .by_name(&sheet_path)
        .map_err(|_| HeadersError::MissingPart(sheet_path.clone()))?;
    read_sheet_rows(BufReader::new(file), &shared_strings, limit)
}

fn read_shared_strings<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
) -> HeadersResult<Vec<String>> {
    let mut strings = Vec::new();

    let file = match archive.by_name("xl/sharedStrings.xml") {
        Ok(f) => f,
        Err(_) => return Ok(strings),
    };

    let mut xml_reader = Reader::from_reader(BufReader::new(file));
    xml_reader.trim_text(false);

    let mut buf = Vec::new();
    let mut current = String::new();
    let mut in_si = false;
    let mut in_t = false;
    // Phonetic runs (<rPh>) carry their own <t> that is not part of the value
    let mut in_phonetic = false;

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"si" => {
                    in_si = true;
                    current.clear();
                }
                b"rPh" => in_phonetic = true,
                b"t" if in_si && !in_phonetic => in_t = true,
                _ => {}
            },
            Event::Empty(e) if e.name().as_ref() == b"si" => strings.push(String::new()),
            Event::End(e) => match e.name().as_ref() {
                b"si" => {
                    strings.push(decode_excel_escapes(&current));
                    in_si = false;
                }
                b"rPh" => in_phonetic = false,
                b"t" => in_t = false,
                _ => {}
            },
            Event::Text(e) if in_t => current.push_str(&e.unescape()?),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}

/// Path of the first sheet listed in `xl/workbook.xml`.
fn first_sheet_path<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> HeadersResult<String> {
    let r_id = {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| HeadersError::MissingPart("xl/workbook.xml".into()))?;
        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut found = None;
        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e) if e.name().as_ref() == b"sheet" => {
                    found = attr_value(&e, b"r:id");
                    break;
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        found
    };

    let Some(r_id) = r_id else {
        return Ok(DEFAULT_SHEET_PATH.to_string());
    };

    let file = match archive.by_name("xl/_rels/workbook.xml.rels") {
        Ok(f) => f,
        Err(_) => return Ok(DEFAULT_SHEET_PATH.to_string()),
    };
    let mut xml_reader = Reader::from_reader(BufReader::new(file));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut targets = HashMap::new();
    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) if e.name().as_ref() == b"Relationship" => {
                if let (Some(id), Some(target)) = (attr_value(&e, b"Id"), attr_value(&e, b"Target"))
                {
                    targets.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(match targets.remove(&r_id) {
        Some(target) => match target.strip_prefix('/') {
            Some(absolute) => absolute.to_string(),
            None => format!("xl/{target}"),
        },
        None => DEFAULT_SHEET_PATH.to_string(),
    })
}

#[derive(Default)]
struct PendingCell {
    column: Option<usize>,
    kind: Option<String>,
    text: String,
}

fn render_cell(cell: &PendingCell, shared_strings: &[String]) -> String {
    match cell.kind.as_deref() {
        Some("s") => cell
            .text
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|idx| shared_strings.get(idx))
            .cloned()
            .unwrap_or_default(),
        Some("b") => match cell.text.trim() {
            "1" => "TRUE".to_string(),
            "0" => "FALSE".to_string(),
            other => other.to_string(),
        },
        Some("str") | Some("inlineStr") => decode_excel_escapes(&cell.text),
        _ => cell.text.clone(),
    }
}

fn place(row: &mut Vec<String>, column: usize, value: String) {
    if row.len() <= column {
        row.resize(column + 1, String::new());
    }
    row[column] = value;
}

fn cell_column(reference: &str) -> HeadersResult<usize> {
    let parts = extract_column_and_row_from_cell(reference)?;
    let column = excel_column_str_to_column_index(&parts.column)? as usize;
    if column >= MAX_COLUMNS || parts.row as usize > MAX_ROWS {
        return Err(HeadersError::ReferenceOutOfRange(reference.to_string()));
    }
    Ok(column)
}

/// Pad `rows` with empty rows up to the 1-based row number `r`.
fn fill_to(rows: &mut Vec<Vec<String>>, r: Option<String>, limit: usize) -> HeadersResult<()> {
    let Some(r) = r else {
        return Ok(());
    };
    let Ok(index) = r.trim().parse::<u64>() else {
        return Ok(());
    };
    if index > MAX_ROWS as u64 {
        return Err(HeadersError::ReferenceOutOfRange(format!("row {r}")));
    }
    let index = index as usize;
    while rows.len() + 1 < index && rows.len() < limit {
        rows.push(Vec::new());
    }
    Ok(())
}

fn read_sheet_rows<R: std::io::BufRead>(
    reader: R,
    shared_strings: &[String],
    limit: usize,
) -> HeadersResult<Vec<Vec<String>>> {
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.trim_text(false);

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Option<Vec<String>> = None;
    let mut cell: Option<PendingCell> = None;
    let mut in_value = false;
    let mut buf = Vec::new();

    while rows.len() < limit {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"row" => {
                    fill_to(&mut rows, attr_value(&e, b"r"), limit)?;
                    row = Some(Vec::new());
                }
                b"c" if row.is_some() => {
                    let column = match attr_value(&e, b"r") {
                        Some(reference) => cell_column(&reference)?,
                        None => row.as_ref().map_or(0, Vec::len),
                    };
                    if column >= MAX_COLUMNS {
                        return Err(HeadersError::ReferenceOutOfRange(format!(
                            "column {}",
                            column + 1
                        )));
                    }
                    cell = Some(PendingCell {
                        column: Some(column),
                        kind: attr_value(&e, b"t"),
                        text: String::new(),
                    });
                }
                b"v" | b"t" if cell.is_some() => in_value = true,
                _ => {}
            },
            Event::Empty(e) if e.name().as_ref() == b"row" => {
                fill_to(&mut rows, attr_value(&e, b"r"), limit)?;
                if rows.len() < limit {
                    rows.push(Vec::new());
                }
            }
            Event::Text(e) if in_value => {
                if let Some(cell) = cell.as_mut() {
                    cell.text.push_str(&e.unescape()?);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"v" | b"t" => in_value = false,
                b"c" => {
                    if let (Some(done), Some(row)) = (cell.take(), row.as_mut()) {
                        let value = render_cell(&done, shared_strings);
                        place(row, done.column.unwrap_or(row.len()), value);
                    }
                }
                b"row" => {
                    if let Some(done) = row.take() {
                        rows.push(done);
                    }
                }
                b"sheetData" => break,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(rows)
}
