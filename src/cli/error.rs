//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        CliError::Application(e.into())
    }
}

impl From<InfraError> for CliError {
    fn from(e: InfraError) -> Self {
        CliError::Application(e.into())
    }
}

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Application(e) => match e {
                ApplicationError::Domain(_) | ApplicationError::Unsupported { .. } => {
                    crate::exitcode::USAGE
                }
                ApplicationError::AlreadyExists(_) => crate::exitcode::CANTCREAT,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::Infra(e) => match e {
                    InfraError::NotFound(_) => crate::exitcode::NOINPUT,
                    InfraError::Io { .. } => crate::exitcode::IOERR,
                    InfraError::Parse(_) | InfraError::TooDeep { .. } => crate::exitcode::DATAERR,
                    InfraError::Encode(_) => crate::exitcode::SOFTWARE,
                },
            },
        }
    }
}
