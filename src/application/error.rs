//! Application-level errors (wraps domain and infrastructure errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{DomainError, TreeKind};
use crate::infrastructure::InfraError;

/// Application errors wrap lower-layer errors and add use-case context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{operation} is not supported for {kind} trees")]
    Unsupported {
        operation: &'static str,
        kind: TreeKind,
    },

    #[error("document already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
