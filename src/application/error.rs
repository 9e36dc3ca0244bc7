//! Application-level errors (wraps conversion errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ConversionError;

/// Application errors wrap conversion errors and add file-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Conversion(#[from] ConversionError),

    #[error("{}: {source}", .path.display())]
    Outline {
        path: PathBuf,
        source: ConversionError,
    },

    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("refusing to overwrite existing file: {0}")]
    AlreadyExists(PathBuf),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    /// The conversion failure behind this error, if any.
    pub fn conversion(&self) -> Option<&ConversionError> {
        match self {
            ApplicationError::Conversion(e) | ApplicationError::Outline { source: e, .. } => Some(e),
            _ => None,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
