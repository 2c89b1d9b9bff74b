//! General (n-ary) tree engine: nodes with an ordered list of owned children.

use std::fmt;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::path::GeneralPath;
use crate::domain::render::TreeNodeConvert;

/// Tree node with any number of ordered children.
///
/// Serializes as `{value, children?}`; an empty child list is omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneralNode<V> {
    pub value: V,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<GeneralNode<V>>,
}

impl<V> GeneralNode<V> {
    pub fn new(value: V) -> Self {
        Self {
            value,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Appends a child and returns it for further building.
    pub fn add_child(&mut self, value: V) -> &mut GeneralNode<V> {
        self.children.push(GeneralNode::new(value));
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Root first, then each child subtree in order.
    pub fn pre_order(&self) -> PreOrder<'_, V> {
        PreOrder { stack: vec![self] }
    }

    pub fn len(&self) -> usize {
        self.pre_order().count()
    }

    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        max_depth
    }

    pub fn leaf_values(&self) -> Vec<&V> {
        self.pre_order()
            .filter(|node| node.is_leaf())
            .map(|node| &node.value)
            .collect()
    }

    /// Clears every descendant's child list, bottom-up, without recursion.
    pub fn delete_all(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl<V: PartialEq> GeneralNode<V> {
    /// First node in pre-order holding `value`.
    pub fn find(&self, value: &V) -> Option<&GeneralNode<V>> {
        self.pre_order().find(|node| node.value == *value)
    }

    pub fn find_mut(&mut self, value: &V) -> Option<&mut GeneralNode<V>> {
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            if node.value == *value {
                return Some(node);
            }
            pending.extend(node.children.iter_mut().rev());
        }
        None
    }
}

pub struct PreOrder<'a, V> {
    stack: Vec<&'a GeneralNode<V>>,
}

impl<'a, V> Iterator for PreOrder<'a, V> {
    type Item = &'a GeneralNode<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Handle owning an optional general root ("no tree" when empty).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GeneralTree<V> {
    root: Option<GeneralNode<V>>,
}

impl<V> Default for GeneralTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Drop for GeneralTree<V> {
    fn drop(&mut self) {
        if let Some(root) = self.root.as_mut() {
            root.delete_all();
        }
    }
}

impl<V> From<GeneralNode<V>> for GeneralTree<V> {
    fn from(root: GeneralNode<V>) -> Self {
        Self { root: Some(root) }
    }
}

impl<V> GeneralTree<V> {
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Creates a single-node tree.
    pub fn with_root(value: V) -> Self {
        Self::from(GeneralNode::new(value))
    }

    pub fn from_root(root: Option<GeneralNode<V>>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Option<&GeneralNode<V>> {
        self.root.as_ref()
    }

    pub fn root_mut(&mut self) -> Option<&mut GeneralNode<V>> {
        self.root.as_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.root().map_or(0, GeneralNode::len)
    }

    pub fn depth(&self) -> usize {
        self.root().map_or(0, GeneralNode::depth)
    }

    pub fn pre_order(&self) -> impl Iterator<Item = &GeneralNode<V>> {
        self.root().into_iter().flat_map(GeneralNode::pre_order)
    }

    pub fn node_at(&self, path: &GeneralPath) -> Option<&GeneralNode<V>> {
        path.indices()
            .iter()
            .try_fold(self.root()?, |node, &index| node.children.get(index))
    }

    /// Releases every node. The handle is empty afterwards.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_all(&mut self) {
        let released = self.len();
        if let Some(mut root) = self.root.take() {
            root.delete_all();
        }
        debug!(released, "tree deleted");
    }
}

impl<V: fmt::Debug> GeneralTree<V> {
    /// Appends a child to the node reached by `path`.
    ///
    /// Each index must name an existing child of the node visited at that
    /// level; the empty path appends to the root.
    #[instrument(level = "debug", skip(self, path), fields(path = %path))]
    pub fn insert_by_path(&mut self, path: &GeneralPath, value: V) -> DomainResult<()> {
        let mut current = self.root.as_mut().ok_or(DomainError::EmptyTree)?;
        for (level, &index) in path.indices().iter().enumerate() {
            let len = current.children.len();
            current = current
                .children
                .get_mut(index)
                .ok_or(DomainError::IndexOutOfRange { index, level, len })?;
        }
        current.add_child(value);
        Ok(())
    }

    pub fn insert_by_path_str(&mut self, path: &str, value: V) -> DomainResult<()> {
        let path: GeneralPath = path.parse()?;
        self.insert_by_path(&path, value)
    }
}

impl<V: PartialEq + fmt::Debug> GeneralTree<V> {
    /// First node (root, then children in order, depth-first) holding `value`.
    pub fn find(&self, value: &V) -> Option<&GeneralNode<V>> {
        self.root()?.find(value)
    }

    pub fn find_mut(&mut self, value: &V) -> Option<&mut GeneralNode<V>> {
        self.root.as_mut()?.find_mut(value)
    }

    /// Renames the first node in pre-order holding `old`.
    #[instrument(level = "debug", skip(self))]
    pub fn edit_value(&mut self, old: &V, new: V) -> bool {
        match self.find_mut(old) {
            Some(node) => {
                node.value = new;
                true
            }
            None => {
                debug!("no node matched");
                false
            }
        }
    }
}

impl<V: fmt::Display> GeneralTree<V> {
    /// Connector rendering of every level; an empty tree renders as "".
    pub fn render(&self) -> String {
        self.root()
            .map(|root| root.to_tree_string().to_string())
            .unwrap_or_default()
    }
}
