//! # vitrine-headers
//!
//! Read the header row (or the first few rows) of an uploaded spreadsheet
//! off the calling thread.
//!
//! A [`HeaderWorker`] takes one [`HeaderRequest`] holding the raw file
//! bytes, reads XLSX or delimited text, and posts back exactly one
//! [`HeaderResponse`]: `{ "headers": [...] }` or `{ "error": "..." }`.
//!
//! ## Example
//!
//! ```rust
//! use vitrine_headers::{HeaderRequest, HeaderWorker, Headers};
//!
//! let worker = HeaderWorker::spawn(HeaderRequest::new(b"id,,name\n1,2,3\n".to_vec())).unwrap();
//! let headers = worker.blocking_response().into_result().unwrap();
//! assert_eq!(
//!     headers,
//!     Headers::Row(vec!["id".into(), "Unnamed: 1".into(), "name".into()])
//! );
//! ```

mod delimited;
mod error;
mod message;
mod options;
mod reader;
mod worker;
mod xlsx;

pub use error::{HeadersError, HeadersResult};
pub use message::{HeaderRequest, HeaderResponse, Headers};
pub use options::{HeaderReadOptions, SheetFormat};
pub use reader::{read_headers, unnamed_column};
pub use worker::{read_headers_in_background, HeaderWorker};
