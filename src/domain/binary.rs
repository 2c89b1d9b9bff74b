//! Binary tree engine: nodes with at most two owned children.
//!
//! Ordering is never enforced. Range queries and delete-by-value behave as if
//! the tree were a binary search tree, callers that rely on them keep the
//! ordering themselves.

use std::fmt;

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::path::{BinaryPath, Direction};
use crate::domain::render::BinaryDisplay;

/// Exclusively owned optional child slot.
pub type BinaryLink<V> = Option<Box<BinaryNode<V>>>;

/// Tree node with a `left` and a `right` slot.
///
/// Serializes as `{value, left?, right?}`; empty slots are omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryNode<V> {
    pub value: V,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: BinaryLink<V>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: BinaryLink<V>,
}

impl<V> BinaryNode<V> {
    pub fn new(value: V) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub fn child(&self, direction: Direction) -> Option<&BinaryNode<V>> {
        match direction {
            Direction::Left => self.left.as_deref(),
            Direction::Right => self.right.as_deref(),
        }
    }

    pub fn child_mut(&mut self, direction: Direction) -> Option<&mut BinaryNode<V>> {
        self.slot_mut(direction).as_deref_mut()
    }

    fn slot_mut(&mut self, direction: Direction) -> &mut BinaryLink<V> {
        match direction {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }

    /// Root, then left subtree, then right subtree.
    pub fn pre_order(&self) -> PreOrder<'_, V> {
        PreOrder { stack: vec![self] }
    }

    /// Left subtree, self, right subtree.
    pub fn in_order(&self) -> InOrder<'_, V> {
        InOrder {
            stack: Vec::new(),
            current: Some(self),
        }
    }

    pub fn len(&self) -> usize {
        self.pre_order().count()
    }

    /// Number of levels below and including this node.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        max_depth
    }

    /// Severs every child link below this node, bottom-up.
    ///
    /// Uses an explicit stack, so chains of any length are released without
    /// recursion. The node itself stays valid as a leaf.
    pub fn delete_all(&mut self) {
        let mut pending: Vec<Box<BinaryNode<V>>> = Vec::new();
        pending.extend(self.left.take());
        pending.extend(self.right.take());
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }

    /// Replaces a removed node by its subtree repair.
    ///
    /// 0 children: the slot empties. 1 child: the child moves up.
    /// 2 children: the node takes the leftmost value of its right subtree and
    /// that leftmost node is unlinked.
    fn unlink(mut self: Box<Self>) -> BinaryLink<V> {
        match (self.left.take(), self.right.take()) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            (Some(left), Some(right)) => {
                let mut right = Some(right);
                if let Some(successor) = take_leftmost(&mut right) {
                    self.value = successor;
                }
                self.left = Some(left);
                self.right = right;
                Some(self)
            }
        }
    }
}

impl<V: PartialEq> BinaryNode<V> {
    /// First node in pre-order holding `value`.
    pub fn find(&self, value: &V) -> Option<&BinaryNode<V>> {
        self.pre_order().find(|node| node.value == *value)
    }

    pub fn find_mut(&mut self, value: &V) -> Option<&mut BinaryNode<V>> {
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            if node.value == *value {
                return Some(node);
            }
            pending.extend(node.right.as_deref_mut());
            pending.extend(node.left.as_deref_mut());
        }
        None
    }
}

/// Unlinks the leftmost node under `link` and returns its value.
fn take_leftmost<V>(link: &mut BinaryLink<V>) -> Option<V> {
    let mut cursor = link;
    while cursor.as_ref()?.left.is_some() {
        cursor = &mut cursor.as_mut()?.left;
    }
    let node = *cursor.take()?;
    *cursor = node.right;
    Some(node.value)
}

/// Removes the first pre-order match under `link`.
fn remove_first<V: PartialEq>(link: &mut BinaryLink<V>, value: &V) -> bool {
    let mut pending = vec![link];
    while let Some(link) = pending.pop() {
        if matches!(link.as_deref(), Some(node) if node.value == *value) {
            if let Some(node) = link.take() {
                *link = node.unlink();
            }
            return true;
        }
        if let Some(node) = link.as_deref_mut() {
            pending.push(&mut node.right);
            pending.push(&mut node.left);
        }
    }
    false
}

pub struct PreOrder<'a, V> {
    stack: Vec<&'a BinaryNode<V>>,
}

impl<'a, V> Iterator for PreOrder<'a, V> {
    type Item = &'a BinaryNode<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // right first so left is visited first
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        Some(node)
    }
}

pub struct InOrder<'a, V> {
    stack: Vec<&'a BinaryNode<V>>,
    current: Option<&'a BinaryNode<V>>,
}

impl<'a, V> Iterator for InOrder<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = node.left.as_deref();
        }
        let node = self.stack.pop()?;
        self.current = node.right.as_deref();
        Some(&node.value)
    }
}

/// Handle owning an optional binary root ("no tree" when empty).
///
/// Serializes transparently as its root, an empty tree as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BinaryTree<V> {
    root: BinaryLink<V>,
}

impl<V> Default for BinaryTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Drop for BinaryTree<V> {
    fn drop(&mut self) {
        if let Some(root) = self.root.as_deref_mut() {
            root.delete_all();
        }
    }
}

impl<V> From<BinaryNode<V>> for BinaryTree<V> {
    fn from(root: BinaryNode<V>) -> Self {
        Self {
            root: Some(Box::new(root)),
        }
    }
}

impl<V> BinaryTree<V> {
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Creates a single-node tree.
    pub fn with_root(value: V) -> Self {
        Self::from(BinaryNode::new(value))
    }

    pub fn from_root(root: Option<BinaryNode<V>>) -> Self {
        Self {
            root: root.map(Box::new),
        }
    }

    pub fn root(&self) -> Option<&BinaryNode<V>> {
        self.root.as_deref()
    }

    pub fn root_mut(&mut self) -> Option<&mut BinaryNode<V>> {
        self.root.as_deref_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.root().map_or(0, BinaryNode::len)
    }

    pub fn depth(&self) -> usize {
        self.root().map_or(0, BinaryNode::depth)
    }

    pub fn node_at(&self, path: &BinaryPath) -> Option<&BinaryNode<V>> {
        path.steps()
            .iter()
            .try_fold(self.root()?, |node, &step| node.child(step))
    }

    /// Values in in-order sequence.
    pub fn in_order(&self) -> impl Iterator<Item = &V> {
        self.root().into_iter().flat_map(BinaryNode::in_order)
    }

    pub fn pre_order(&self) -> impl Iterator<Item = &BinaryNode<V>> {
        self.root().into_iter().flat_map(BinaryNode::pre_order)
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

impl<V: fmt::Debug> BinaryTree<V> {
    /// Creates a node at the slot named by the last step of `path`.
    ///
    /// Every step before the last must reach an existing node. An occupied
    /// final slot is overwritten, together with the subtree below it.
    #[instrument(level = "debug", skip(self, path), fields(path = %path))]
    pub fn insert_by_path(&mut self, path: &BinaryPath, value: V) -> DomainResult<()> {
        let root = self.root.as_deref_mut().ok_or(DomainError::EmptyTree)?;
        let (last, prefix) = path.split_last().ok_or(DomainError::EmptyPath)?;

        let mut current = root;
        for (position, &step) in prefix.iter().enumerate() {
            current = current
                .child_mut(step)
                .ok_or(DomainError::BrokenPath { position })?;
        }

        let slot = current.slot_mut(last);
        if let Some(existing) = slot.as_deref() {
            warn!(replaced = ?existing.value, "overwriting existing {} child", last);
        }
        *slot = Some(Box::new(BinaryNode::new(value)));
        Ok(())
    }

    pub fn insert_by_path_str(&mut self, path: &str, value: V) -> DomainResult<()> {
        let path: BinaryPath = path.parse()?;
        self.insert_by_path(&path, value)
    }
}

impl<V: PartialEq + fmt::Debug> BinaryTree<V> {
    pub fn find(&self, value: &V) -> Option<&BinaryNode<V>> {
        self.root()?.find(value)
    }

    /// Deletes the first node (root, left subtree, right subtree) holding
    /// `value` and repairs the structure below it. The root itself may be
    /// replaced. Returns false and leaves the tree untouched on no match.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_by_value(&mut self, value: &V) -> bool {
        let removed = remove_first(&mut self.root, value);
        if !removed {
            debug!("no node matched");
        }
        removed
    }
}

impl<V: PartialEq + Clone + fmt::Debug> BinaryTree<V> {
    /// Renames every node holding `old` that has no renamed ancestor.
    ///
    /// A matching node is renamed and its subtree is not searched further;
    /// otherwise both the left and the right subtree are searched.
    #[instrument(level = "debug", skip(self))]
    pub fn edit_value(&mut self, old: &V, new: V) -> bool {
        let mut renamed = 0usize;
        let mut pending: Vec<&mut BinaryNode<V>> = self.root.as_deref_mut().into_iter().collect();
        while let Some(node) = pending.pop() {
            if node.value == *old {
                node.value = new.clone();
                renamed += 1;
                continue;
            }
            pending.extend(node.right.as_deref_mut());
            pending.extend(node.left.as_deref_mut());
        }
        if renamed == 0 {
            debug!("no node matched");
        }
        renamed > 0
    }
}

impl<V: PartialOrd> BinaryTree<V> {
    /// In-order values with `lo <= value <= hi`.
    pub fn values_in_range(&self, lo: &V, hi: &V) -> Vec<&V> {
        self.in_order()
            .filter(|value| *value >= lo && *value <= hi)
            .collect()
    }
}

impl<V: PartialOrd + fmt::Display> BinaryTree<V> {
    pub fn render_range(&self, lo: &V, hi: &V) -> String {
        itertools::join(self.values_in_range(lo, hi), " ")
    }
}

impl<V: fmt::Display> BinaryTree<V> {
    /// Multi-line rendering with `L---`/`R---` branch markers.
    ///
    /// A node with a single child shows `None` in the empty slot. An empty
    /// tree renders as an empty string.
    pub fn render(&self) -> String {
        self.root()
            .map(|root| BinaryDisplay::new(root).to_string())
            .unwrap_or_default()
    }
}
