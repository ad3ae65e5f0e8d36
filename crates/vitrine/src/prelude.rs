//! Prelude module - common imports for vitrine users
//!
//! ```rust
//! use vitrine::prelude::*;
//! ```

pub use crate::{
    // Notation
    validate_cell,
    validate_cell_range,
    CellRangeOption,
    ColumnIndexBound,
    Error,
    Result,

    // Form field
    FieldStatus,
    RangeField,
    RangeFieldConfig,

    // Modals
    ModalComponent,
    ModalHandle,
    ModalManager,
    ModalTicket,
};

#[cfg(feature = "headers")]
pub use crate::{HeaderRequest, HeaderResponse, HeaderWorker, Headers};

#[cfg(feature = "serve")]
pub use crate::{ServeConfig, Server};
