//! Request and response types exchanged with a header worker.
//!
//! Both serialise to the JSON shapes the front end posts and receives:
//! `{ "file": [...], "headerRow": 0, "readFirstNRows": 5 }` in, and
//! `{ "headers": [...] }` or `{ "error": "..." }` out.

use serde::{Deserialize, Serialize};

/// A single header-reading job.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderRequest {
    /// Raw file contents (XLSX or delimited text)
    pub file: Vec<u8>,
    /// Zero-based row holding the headers (default 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_row: Option<usize>,
    /// Return this many leading rows instead of a single header row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_first_n_rows: Option<usize>,
}

impl HeaderRequest {
    pub fn new(file: impl Into<Vec<u8>>) -> Self {
        Self {
            file: file.into(),
            ..Default::default()
        }
    }

    pub fn with_header_row(mut self, row: usize) -> Self {
        self.header_row = Some(row);
        self
    }

    pub fn with_first_rows(mut self, rows: usize) -> Self {
        self.read_first_n_rows = Some(rows);
        self
    }
}

/// Header names, or a grid of leading rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Headers {
    Row(Vec<String>),
    Rows(Vec<Vec<String>>),
}

/// What a worker posts back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderResponse {
    Headers { headers: Headers },
    Error { error: String },
}

impl HeaderResponse {
    pub fn error(message: impl Into<String>) -> Self {
        HeaderResponse::Error {
            error: message.into(),
        }
    }

    pub fn into_result(self) -> Result<Headers, String> {
        match self {
            HeaderResponse::Headers { headers } => Ok(headers),
            HeaderResponse::Error { error } => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_request_field_names() {
        let request: HeaderRequest = serde_json::from_value(json!({
            "file": [104, 105],
            "headerRow": 2,
            "readFirstNRows": 3
        }))
        .unwrap();
        assert_eq!(request.file, b"hi");
        assert_eq!(request.header_row, Some(2));
        assert_eq!(request.read_first_n_rows, Some(3));

        let minimal: HeaderRequest = serde_json::from_value(json!({ "file": [] })).unwrap();
        assert_eq!(minimal, HeaderRequest::default());
    }

    #[test]
    fn test_response_shapes() {
        let row = HeaderResponse::Headers {
            headers: Headers::Row(vec!["id".into(), "Unnamed: 1".into()]),
        };
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            json!({ "headers": ["id", "Unnamed: 1"] })
        );

        let grid = HeaderResponse::Headers {
            headers: Headers::Rows(vec![vec!["a".into()], vec!["b".into()]]),
        };
        assert_eq!(
            serde_json::to_value(&grid).unwrap(),
            json!({ "headers": [["a"], ["b"]] })
        );

        assert_eq!(
            serde_json::to_value(HeaderResponse::error("boom")).unwrap(),
            json!({ "error": "boom" })
        );
    }

    #[test]
    fn test_response_parses_back() {
        let parsed: HeaderResponse =
            serde_json::from_value(json!({ "headers": [["x", "y"]] })).unwrap();
        assert_eq!(
            parsed.into_result(),
            Ok(Headers::Rows(vec![vec!["x".into(), "y".into()]]))
        );

        let parsed: HeaderResponse = serde_json::from_value(json!({ "error": "bad" })).unwrap();
        assert_eq!(parsed.into_result(), Err("bad".to_string()));
    }
}
