//! Conversion errors (no external dependencies beyond thiserror)

use thiserror::Error;

use crate::domain::value::{DocumentError, DocumentLocation};

/// Reasons a document fails to become a tree.
///
/// Every variant is returned to the caller; nothing is swallowed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("invalid document: {}", format_document(.message, .location))]
    Document {
        message: String,
        location: Option<DocumentLocation>,
    },

    #[error("invalid outline: {0}")]
    Shape(String),

    #[error("outline nested too deeply: depth {0} exceeds limit")]
    DepthExceeded(usize),
}

fn format_document(message: &str, location: &Option<DocumentLocation>) -> String {
    match location {
        Some(loc) => format!("{message} ({loc})"),
        None => message.to_string(),
    }
}

impl ConversionError {
    pub fn shape(reason: impl Into<String>) -> Self {
        ConversionError::Shape(reason.into())
    }

    /// Location of the syntax error, if this is a located document error.
    pub fn location(&self) -> Option<DocumentLocation> {
        match self {
            ConversionError::Document { location, .. } => *location,
            ConversionError::Shape(_) | ConversionError::DepthExceeded(_) => None,
        }
    }
}

impl From<DocumentError> for ConversionError {
    fn from(e: DocumentError) -> Self {
        ConversionError::Document {
            message: e.message,
            location: e.location,
        }
    }
}

/// Result type for conversion operations.
pub type ConversionResult<T> = Result<T, ConversionError>;
