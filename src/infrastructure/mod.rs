//! Infrastructure layer: document codec and filesystem seam
//!
//! This layer implements the I/O boundary the application services depend on.

pub mod document;
pub mod error;
pub mod traits;

pub use document::{Codec, TreeDocument, DEFAULT_MAX_DEPTH};
pub use error::{InfraError, InfraResult};
pub use traits::{FileSystem, RealFileSystem};
