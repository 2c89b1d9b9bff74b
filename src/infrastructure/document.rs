//! YAML document codec for both tree kinds.
//!
//! Binary nodes map to `{value, left?, right?}`, general nodes to
//! `{value, children?}`. Encoding writes keys in that order and omits empty
//! slots. Decoding is lenient: a node that is not a mapping, or has no usable
//! `value`, decodes to "absent" instead of failing the whole load.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::Value;
use tracing::{debug, instrument, warn};

use crate::domain::{BinaryNode, BinaryTree, GeneralNode, GeneralTree, TreeKind};
use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::traits::FileSystem;

/// Deepest document accepted by default.
///
/// serde_yaml stops parsing at 128 nested collections; a general tree level
/// costs two (mapping + sequence), so 64 keeps both kinds readable.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// A tree handle that can be mapped to and from a YAML document.
pub trait TreeDocument: Serialize + Sized {
    const KIND: TreeKind;

    fn empty() -> Self;

    fn depth(&self) -> usize;

    /// Decodes a parsed document, failing only on the depth guard.
    fn decode(doc: &Value, max_depth: usize) -> InfraResult<Self>;
}

impl<V: Serialize + DeserializeOwned> TreeDocument for BinaryTree<V> {
    const KIND: TreeKind = TreeKind::Binary;

    fn empty() -> Self {
        BinaryTree::new()
    }

    fn depth(&self) -> usize {
        BinaryTree::depth(self)
    }

    fn decode(doc: &Value, max_depth: usize) -> InfraResult<Self> {
        decode_binary(doc, 1, max_depth).map(BinaryTree::from_root)
    }
}

impl<V: Serialize + DeserializeOwned> TreeDocument for GeneralTree<V> {
    const KIND: TreeKind = TreeKind::General;

    fn empty() -> Self {
        GeneralTree::new()
    }

    fn depth(&self) -> usize {
        GeneralTree::depth(self)
    }

    fn decode(doc: &Value, max_depth: usize) -> InfraResult<Self> {
        decode_general(doc, 1, max_depth).map(GeneralTree::from_root)
    }
}

fn check_depth(depth: usize, max_depth: usize) -> InfraResult<()> {
    if depth > max_depth {
        return Err(InfraError::TooDeep { limit: max_depth });
    }
    Ok(())
}

/// The node's `value`, or None if the node cannot carry one.
fn decode_value<V: DeserializeOwned>(doc: &Value) -> Option<V> {
    if !doc.is_mapping() {
        debug!("skipping non-mapping node");
        return None;
    }
    let raw = doc.get("value").filter(|raw| !raw.is_null())?;
    match serde_yaml::from_value(raw.clone()) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(value = ?raw, "dropping node with unusable value: {}", e);
            None
        }
    }
}

fn decode_binary<V: DeserializeOwned>(
    doc: &Value,
    depth: usize,
    max_depth: usize,
) -> InfraResult<Option<BinaryNode<V>>> {
    check_depth(depth, max_depth)?;
    let Some(value) = decode_value(doc) else {
        return Ok(None);
    };
    let mut node = BinaryNode::new(value);
    if let Some(left) = doc.get("left") {
        node.left = decode_binary(left, depth + 1, max_depth)?.map(Box::new);
    }
    if let Some(right) = doc.get("right") {
        node.right = decode_binary(right, depth + 1, max_depth)?.map(Box::new);
    }
    Ok(Some(node))
}

fn decode_general<V: DeserializeOwned>(
    doc: &Value,
    depth: usize,
    max_depth: usize,
) -> InfraResult<Option<GeneralNode<V>>> {
    check_depth(depth, max_depth)?;
    let Some(value) = decode_value(doc) else {
        return Ok(None);
    };
    let mut node = GeneralNode::new(value);
    if let Some(children) = doc.get("children").and_then(Value::as_sequence) {
        for child in children {
            if let Some(child) = decode_general(child, depth + 1, max_depth)? {
                node.children.push(child);
            }
        }
    }
    Ok(Some(node))
}

/// Load/store entry point carrying the depth guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    max_depth: usize,
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Codec {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Parses document text. Empty text or a `null` document is an empty tree.
    #[instrument(level = "debug", skip(self, text), fields(kind = %T::KIND))]
    pub fn load_str<T: TreeDocument>(&self, text: &str) -> InfraResult<T> {
        if text.trim().is_empty() {
            debug!("empty document");
            return Ok(T::empty());
        }
        let doc: Value = serde_yaml::from_str(text).map_err(InfraError::Parse)?;
        T::decode(&doc, self.max_depth)
    }

    #[instrument(level = "debug", skip(self, tree), fields(kind = %T::KIND))]
    pub fn store_string<T: TreeDocument>(&self, tree: &T) -> InfraResult<String> {
        check_depth(tree.depth(), self.max_depth)?;
        serde_yaml::to_string(tree).map_err(InfraError::Encode)
    }

    /// One blocking read, then an in-memory decode.
    #[instrument(level = "debug", skip(self, fs))]
    pub fn load_file<T: TreeDocument>(&self, fs: &dyn FileSystem, path: &Path) -> InfraResult<T> {
        let text = fs.read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                InfraError::NotFound(path.to_path_buf())
            } else {
                InfraError::io(format!("read {}", path.display()), e)
            }
        })?;
        self.load_str(&text)
    }

    /// In-memory encode, then one blocking write.
    #[instrument(level = "debug", skip(self, fs, tree))]
    pub fn store_file<T: TreeDocument>(
        &self,
        fs: &dyn FileSystem,
        tree: &T,
        path: &Path,
    ) -> InfraResult<()> {
        let text = self.store_string(tree)?;
        fs.write(path, &text)
            .map_err(|e| InfraError::io(format!("write {}", path.display()), e))
    }
}
