//! Header workers over XLSX and CSV inputs.

mod common;

use pretty_assertions::assert_eq;
use serde_json::json;
use vitrine_headers::{
    read_headers, read_headers_in_background, HeaderRequest, HeaderResponse, HeaderWorker,
    Headers, HeadersError,
};

use common::xlsx_with;

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[test]
fn xlsx_header_row_from_first_sheet() {
    let file = xlsx_with(
        "worksheets/data.xml",
        &["Name", "Email"],
        r#"<row r="1">
            <c r="A1" t="s"><v>0</v></c>
            <c r="C1" t="s"><v>1</v></c>
        </row>
        <row r="2"><c r="A2"><v>7</v></c></row>"#,
    );

    let headers = read_headers(&HeaderRequest::new(file), &Default::default()).unwrap();
    assert_eq!(headers, Headers::Row(row(&["Name", "Unnamed: 1", "Email"])));
}

#[test]
fn xlsx_header_row_further_down() {
    let file = xlsx_with(
        "worksheets/data.xml",
        &[],
        r#"<row r="1"><c r="A1" t="inlineStr"><is><t>Report</t></is></c></row>
        <row r="3">
            <c r="B3" t="inlineStr"><is><t>qty</t></is></c>
            <c r="C3" t="inlineStr"><is><t>price</t></is></c>
        </row>"#,
    );

    let request = HeaderRequest::new(file).with_header_row(2);
    let headers = read_headers(&request, &Default::default()).unwrap();
    assert_eq!(headers, Headers::Row(row(&["Unnamed: 0", "qty", "price"])));
}

#[test]
fn xlsx_first_rows_grid() {
    let file = xlsx_with(
        "worksheets/data.xml",
        &["a", "b"],
        r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row>
        <row r="2"><c r="A2"><v>1</v></c><c r="B2" t="b"><v>0</v></c></row>
        <row r="3"><c r="A3"><v>2</v></c></row>"#,
    );

    let request = HeaderRequest::new(file).with_first_rows(2);
    let headers = read_headers(&request, &Default::default()).unwrap();
    assert_eq!(
        headers,
        Headers::Rows(vec![row(&["a", "b"]), row(&["1", "FALSE"])])
    );
}

#[test]
fn xlsx_sheet_found_through_relationships() {
    let file = xlsx_with(
        "worksheets/sheet9.xml",
        &[],
        r#"<row r="1"><c r="A1" t="inlineStr"><is><t>only</t></is></c></row>"#,
    );
    let headers = read_headers(&HeaderRequest::new(file), &Default::default()).unwrap();
    assert_eq!(headers, Headers::Row(row(&["only"])));
}

#[test]
fn corrupt_xlsx_is_an_error() {
    let mut file = b"PK\x03\x04".to_vec();
    file.extend_from_slice(b"not really a zip archive");
    let err = read_headers(&HeaderRequest::new(file), &Default::default()).unwrap_err();
    assert!(matches!(err, HeadersError::Zip(_)));
}

#[test]
fn blocking_worker_answers_once() {
    let worker = HeaderWorker::spawn(HeaderRequest::new(b"x,y\n".to_vec())).unwrap();
    let response = worker.blocking_response();
    assert_eq!(
        response,
        HeaderResponse::Headers {
            headers: Headers::Row(row(&["x", "y"]))
        }
    );
}

#[tokio::test]
async fn async_worker_reports_errors_as_messages() {
    let request = HeaderRequest::new(b"only one row\n".to_vec()).with_header_row(5);
    let response = read_headers_in_background(request).await;

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(
        json,
        json!({ "error": "Header row 5 is out of range (sheet has 1 rows)" })
    );
}

#[tokio::test]
async fn worker_thread_exits_after_responding() {
    let worker = HeaderWorker::spawn(HeaderRequest::new(b"a\n".to_vec())).unwrap();
    // Give the thread time to post and return
    for _ in 0..100 {
        if worker.is_finished() {
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
    }
    assert!(worker.is_finished());
    assert!(matches!(worker.response().await, HeaderResponse::Headers { .. }));
}

#[test]
fn request_round_trips_through_json() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), "h1,h2\n").unwrap();
    let bytes = std::fs::read(file.path()).unwrap();

    let wire = serde_json::to_string(&HeaderRequest::new(bytes).with_header_row(0)).unwrap();
    let request: HeaderRequest = serde_json::from_str(&wire).unwrap();
    let response = HeaderWorker::spawn(request).unwrap().blocking_response();
    assert_eq!(response.into_result(), Ok(Headers::Row(row(&["h1", "h2"]))));
}

#[test]
fn reference_past_last_column_is_an_error_response() {
    let file = xlsx_with(
        "worksheets/data.xml",
        &[],
        r#"<row r="1"><c r="ZZZZ1" t="inlineStr"><is><t>far</t></is></c></row>"#,
    );
    let response = HeaderWorker::spawn(HeaderRequest::new(file)).unwrap().blocking_response();
    assert_eq!(
        response.into_result(),
        Err("Reference ZZZZ1 is outside the sheet (max XFD1048576)".to_string())
    );
}
