//! treekit: binary and general tree engine with YAML persistence.
//!
//! - [`domain`]: the engine (path-addressed insertion, deletion with structural
//!   repair, depth-first search/edit, renderings)
//! - [`infrastructure`]: the YAML document codec and filesystem seam
//! - [`application`]: document-backed use cases
//! - [`cli`]: the `treekit` command line

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{
    BinaryNode, BinaryPath, BinaryTree, Direction, DomainError, GeneralNode, GeneralPath,
    GeneralTree, Scalar, TreeKind,
};
pub use infrastructure::{Codec, InfraError, TreeDocument};
