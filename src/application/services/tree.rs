//! Document-backed tree service
//!
//! Each use case loads a document, runs one engine operation and, for
//! mutations that changed something, writes the document back.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    BinaryDisplay, BinaryTree, GeneralTree, Scalar, TreeKind, TreeNodeConvert,
};
use crate::infrastructure::traits::FileSystem;
use crate::infrastructure::{Codec, TreeDocument};

/// Service for editing tree documents on disk.
pub struct TreeService {
    fs: Arc<dyn FileSystem>,
    codec: Codec,
}

impl TreeService {
    /// Create a new tree service.
    pub fn new(fs: Arc<dyn FileSystem>, codec: Codec) -> Self {
        Self { fs, codec }
    }

    fn load<T: TreeDocument>(&self, file: &Path) -> ApplicationResult<T> {
        Ok(self.codec.load_file(self.fs.as_ref(), file)?)
    }

    fn store<T: TreeDocument>(&self, tree: &T, file: &Path) -> ApplicationResult<()> {
        Ok(self.codec.store_file(self.fs.as_ref(), tree, file)?)
    }

    /// Writes a new single-node document.
    #[instrument(level = "debug", skip(self))]
    pub fn create(
        &self,
        file: &Path,
        kind: TreeKind,
        value: Scalar,
        force: bool,
    ) -> ApplicationResult<()> {
        if !force && self.fs.exists(file) {
            return Err(ApplicationError::AlreadyExists(file.to_path_buf()));
        }
        match kind {
            TreeKind::Binary => self.store(&BinaryTree::with_root(value), file),
            TreeKind::General => self.store(&GeneralTree::with_root(value), file),
        }
    }

    /// Rendering of the whole document; "" for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn show(&self, file: &Path, kind: TreeKind) -> ApplicationResult<String> {
        Ok(match kind {
            TreeKind::Binary => self.load::<BinaryTree<Scalar>>(file)?.render(),
            TreeKind::General => self.load::<GeneralTree<Scalar>>(file)?.render(),
        })
    }

    /// In-order values within `[lo, hi]` of a binary document.
    #[instrument(level = "debug", skip(self))]
    pub fn range(
        &self,
        file: &Path,
        kind: TreeKind,
        lo: &Scalar,
        hi: &Scalar,
    ) -> ApplicationResult<Vec<Scalar>> {
        if kind != TreeKind::Binary {
            return Err(ApplicationError::Unsupported {
                operation: "range",
                kind,
            });
        }
        let tree: BinaryTree<Scalar> = self.load(file)?;
        Ok(tree.values_in_range(lo, hi).into_iter().cloned().collect())
    }

    /// Rendering of the subtree under the first node holding `value`.
    #[instrument(level = "debug", skip(self))]
    pub fn find(
        &self,
        file: &Path,
        kind: TreeKind,
        value: &Scalar,
    ) -> ApplicationResult<Option<String>> {
        Ok(match kind {
            TreeKind::Binary => {
                let tree: BinaryTree<Scalar> = self.load(file)?;
                tree.find(value)
                    .map(|node| BinaryDisplay::new(node).to_string())
            }
            TreeKind::General => {
                let tree: GeneralTree<Scalar> = self.load(file)?;
                tree.find(value)
                    .map(|node| node.to_tree_string().to_string())
            }
        })
    }

    #[instrument(level = "debug", skip(self))]
    pub fn insert(
        &self,
        file: &Path,
        kind: TreeKind,
        path: &str,
        value: Scalar,
    ) -> ApplicationResult<()> {
        match kind {
            TreeKind::Binary => {
                let mut tree: BinaryTree<Scalar> = self.load(file)?;
                tree.insert_by_path_str(path, value)?;
                self.store(&tree, file)
            }
            TreeKind::General => {
                let mut tree: GeneralTree<Scalar> = self.load(file)?;
                tree.insert_by_path_str(path, value)?;
                self.store(&tree, file)
            }
        }
    }

    /// Deletes the first node holding `value`. The document is rewritten
    /// only when a node was removed.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&self, file: &Path, kind: TreeKind, value: &Scalar) -> ApplicationResult<bool> {
        if kind != TreeKind::Binary {
            return Err(ApplicationError::Unsupported {
                operation: "delete",
                kind,
            });
        }
        let mut tree: BinaryTree<Scalar> = self.load(file)?;
        let removed = tree.delete_by_value(value);
        if removed {
            self.store(&tree, file)?;
            info!("deleted {} from {}", value, file.display());
        }
        Ok(removed)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn edit(
        &self,
        file: &Path,
        kind: TreeKind,
        old: &Scalar,
        new: Scalar,
    ) -> ApplicationResult<bool> {
        let edited = match kind {
            TreeKind::Binary => {
                let mut tree: BinaryTree<Scalar> = self.load(file)?;
                let edited = tree.edit_value(old, new);
                if edited {
                    self.store(&tree, file)?;
                }
                edited
            }
            TreeKind::General => {
                let mut tree: GeneralTree<Scalar> = self.load(file)?;
                let edited = tree.edit_value(old, new);
                if edited {
                    self.store(&tree, file)?;
                }
                edited
            }
        };
        debug!(edited, "edit finished");
        Ok(edited)
    }

    /// Tears the tree down and stores the empty document. Returns the number
    /// of released nodes.
    #[instrument(level = "debug", skip(self))]
    pub fn clear(&self, file: &Path, kind: TreeKind) -> ApplicationResult<usize> {
        let released = match kind {
            TreeKind::Binary => {
                let mut tree: BinaryTree<Scalar> = self.load(file)?;
                let released = tree.len();
                tree.delete_all();
                self.store(&tree, file)?;
                released
            }
            TreeKind::General => {
                let mut tree: GeneralTree<Scalar> = self.load(file)?;
                let released = tree.len();
                tree.delete_all();
                self.store(&tree, file)?;
                released
            }
        };
        Ok(released)
    }
}
