//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::{Scalar, TreeKind};

/// Build, edit, query and persist binary and general trees stored as YAML documents
#[derive(Parser, Debug)]
#[command(name = "treekit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Tree kind of the document (default from config)
    #[arg(short, long, global = true, value_enum)]
    pub kind: Option<KindArg>,

    /// Config file layered over the global config
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Binary,
    General,
}

impl From<KindArg> for TreeKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Binary => TreeKind::Binary,
            KindArg::General => TreeKind::General,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a single-node tree document
    Create {
        /// Document file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Root value
        #[arg(allow_negative_numbers = true)]
        value: Scalar,
        /// Overwrite an existing document
        #[arg(short, long)]
        force: bool,
    },

    /// Render the tree
    Show {
        /// Document file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print in-order values within [lo, hi] (binary only)
    Range {
        /// Document file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Lower bound (inclusive)
        #[arg(allow_negative_numbers = true)]
        lo: Scalar,
        /// Upper bound (inclusive)
        #[arg(allow_negative_numbers = true)]
        hi: Scalar,
    },

    /// Render the subtree under the first node holding a value
    Find {
        /// Document file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Value to search for
        #[arg(allow_negative_numbers = true)]
        value: Scalar,
    },

    /// Insert a node by path ("LR" for binary, "0.2" for general, "" = root)
    Insert {
        /// Document file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Path to the new node
        path: String,
        /// Value of the new node
        #[arg(allow_negative_numbers = true)]
        value: Scalar,
    },

    /// Delete the first node holding a value (binary only)
    Delete {
        /// Document file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Value to delete
        #[arg(allow_negative_numbers = true)]
        value: Scalar,
    },

    /// Rename a value (binary: topmost match per branch, general: first match)
    Edit {
        /// Document file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Current value
        #[arg(allow_negative_numbers = true)]
        old: Scalar,
        /// New value
        #[arg(allow_negative_numbers = true)]
        new: Scalar,
    },

    /// Delete the whole tree, leaving an empty document
    Clear {
        /// Document file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show merged config
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
