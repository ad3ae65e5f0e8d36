//! Error types for the file routes.

use std::path::PathBuf;

use thiserror::Error;

use crate::http::Status;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Request header too large")]
    HeaderTooLarge,

    #[error("Timed out waiting for the request")]
    RequestTimeout,
}

impl ServeError {
    /// HTTP status a route failure is reported with
    pub fn status(&self) -> Status {
        match self {
            ServeError::BadRequest(_) => Status::BadRequest,
            ServeError::Forbidden(_) => Status::Forbidden,
            ServeError::NotFound(_) => Status::NotFound,
            ServeError::MethodNotAllowed(_) => Status::MethodNotAllowed,
            ServeError::HeaderTooLarge => Status::HeaderTooLarge,
            ServeError::RequestTimeout => Status::RequestTimeout,
            ServeError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => Status::NotFound,
            ServeError::Io(_) | ServeError::Config { .. } => Status::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, ServeError>;
