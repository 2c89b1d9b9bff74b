//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Usage errors raised by path-addressed mutations.
///
/// A failing call never mutates the tree; callers may retry with a corrected path.
/// Missing delete/edit/find targets are not errors, they are reported as "no match".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("tree is empty")]
    EmptyTree,

    #[error("path is empty")]
    EmptyPath,

    #[error("invalid direction '{token}' at position {position}, expected L or R")]
    InvalidDirection { token: char, position: usize },

    #[error("invalid child index '{token}' at level {level}")]
    InvalidIndex { token: String, level: usize },

    #[error("path broken at position {position}: no node there")]
    BrokenPath { position: usize },

    #[error("child index {index} out of range at level {level} (node has {len} children)")]
    IndexOutOfRange {
        index: usize,
        level: usize,
        len: usize,
    },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
