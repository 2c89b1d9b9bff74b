//! Infrastructure-level errors (document I/O and codec)

use std::path::PathBuf;
use thiserror::Error;

/// Failed loads and stores. A failed load never yields a partial tree.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[source] serde_yaml::Error),

    #[error("encode error: {0}")]
    Encode(#[source] serde_yaml::Error),

    #[error("document deeper than {limit} levels")]
    TooDeep { limit: usize },
}

impl InfraError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
