//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{failed} of {total} outline(s) failed")]
    CheckFailed { failed: usize, total: usize },

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::CheckFailed { .. } => crate::exitcode::DATAERR,
            CliError::Io { .. } => crate::exitcode::IOERR,
            CliError::Application(e) => match e {
                ApplicationError::Conversion(_) | ApplicationError::Outline { .. } => {
                    crate::exitcode::DATAERR
                }
                ApplicationError::NotFound(_) => crate::exitcode::NOINPUT,
                ApplicationError::AlreadyExists(_) => crate::exitcode::CANTCREAT,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
            },
        }
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::ConversionError;

    #[test]
    fn given_each_error_kind_when_exit_code_then_maps_to_sysexits() {
        let shape: CliError = ApplicationError::from(ConversionError::shape("item missing name")).into();
        assert_eq!(shape.exit_code(), crate::exitcode::DATAERR);

        let missing: CliError = ApplicationError::NotFound(PathBuf::from("x.yaml")).into();
        assert_eq!(missing.exit_code(), crate::exitcode::NOINPUT);

        let exists: CliError = ApplicationError::AlreadyExists(PathBuf::from("x.yaml")).into();
        assert_eq!(exists.exit_code(), crate::exitcode::CANTCREAT);

        let config: CliError = ApplicationError::Config {
            message: "bad".into(),
        }
        .into();
        assert_eq!(config.exit_code(), crate::exitcode::CONFIG);

        let failed: CliError = ApplicationError::OperationFailed {
            context: "serialize outline".into(),
            source: Box::new(std::io::Error::other("emitter failed")),
        }
        .into();
        assert_eq!(failed.exit_code(), crate::exitcode::IOERR);

        assert_eq!(
            CliError::InvalidArgs("x".into()).exit_code(),
            crate::exitcode::USAGE
        );
        assert_eq!(
            CliError::CheckFailed { failed: 1, total: 2 }.exit_code(),
            crate::exitcode::DATAERR
        );
    }
}
