//! Domain layer: the tree engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod binary;
pub mod error;
pub mod general;
pub mod path;
pub mod render;
pub mod scalar;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use binary::{BinaryLink, BinaryNode, BinaryTree};
pub use error::{DomainError, DomainResult};
pub use general::{GeneralNode, GeneralTree};
pub use path::{BinaryPath, Direction, GeneralPath};
pub use render::{BinaryDisplay, TreeNodeConvert};
pub use scalar::Scalar;

/// Which engine a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeKind {
    #[default]
    Binary,
    General,
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeKind::Binary => write!(f, "binary"),
            TreeKind::General => write!(f, "general"),
        }
    }
}

impl FromStr for TreeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "binary" => Ok(TreeKind::Binary),
            "general" => Ok(TreeKind::General),
            other => Err(format!("unknown tree kind '{}', expected binary or general", other)),
        }
    }
}
