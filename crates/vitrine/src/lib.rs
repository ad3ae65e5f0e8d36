//! # vitrine
//!
//! Building blocks for a spreadsheet-import demo catalogue.
//!
//! ## Features
//!
//! - Cell and range notation ("A1", "B2:D10") with column-index bounds
//! - A modal manager: show/hide/remove by id, awaitable results
//! - Background header workers for XLSX and CSV uploads (`headers`)
//! - Inline-page and markdown HTTP routes (`serve`)
//! - A debounced range input field
//!
//! ## Example
//!
//! ```rust
//! use vitrine::prelude::*;
//!
//! let range: CellRangeOption = "AA1:AC3".parse().unwrap();
//! assert!(validate_cell_range(&range));
//! assert_eq!(range.column_bound().unwrap().width(), 3);
//!
//! let modals = ModalManager::new();
//! let _ticket = modals.show("import-preview", serde_json::Value::Null);
//! assert!(modals.has_pending("import-preview"));
//! ```

pub mod form;
pub mod prelude;

// Re-export notation types
pub use vitrine_core::{
    column_index_to_excel_column_str, excel_column_str_to_column_index,
    extract_column_and_row_from_cell, get_column_index_bound, get_starting_cell_row_number,
    validate_cell, validate_cell_range, CellParts, CellRangeOption, ColumnIndexBound, Error,
    Result,
};

// Re-export modal types
pub use vitrine_modal::{
    ModalAction, ModalComponent, ModalError, ModalFlags, ModalHandle, ModalId, ModalManager,
    ModalState, ModalTarget, ModalTicket, Placeholder,
};

#[cfg(feature = "headers")]
pub use vitrine_headers::{
    read_headers, read_headers_in_background, HeaderReadOptions, HeaderRequest, HeaderResponse,
    HeaderWorker, Headers, HeadersError,
};

#[cfg(feature = "serve")]
pub use vitrine_serve::{serve, ServeConfig, ServeError, Server};

pub use form::{FieldStatus, RangeField, RangeFieldConfig};
