//! Error types for modal results.

use serde_json::Value;
use thiserror::Error;

use crate::state::ModalId;

/// Ways a modal ticket can settle without a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModalError {
    #[error("Modal '{id}' rejected: {reason}")]
    Rejected { id: ModalId, reason: Value },

    #[error("Modal '{0}' was removed before it settled")]
    Cancelled(ModalId),
}

pub type Result<T> = std::result::Result<T, ModalError>;
