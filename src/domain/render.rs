/*
Text renderings for both tree kinds.

Binary trees use their own L---/R--- layout because the side of a child carries
meaning that connector glyphs cannot show. General trees are converted to a
termtree::Tree, which draws ├── / └── connectors at every depth.
 */
use std::fmt;

use termtree::Tree;
use tracing::instrument;

use crate::domain::binary::BinaryNode;
use crate::domain::general::GeneralNode;
use crate::domain::path::Direction;

const INDENT: &str = "    ";
const MISSING: &str = "None";

/// Display adapter for a binary subtree.
///
/// ```text
/// Root: 10
///     L--- 5
///         L--- 3
///         R--- None
///     R--- 15
/// ```
pub struct BinaryDisplay<'a, V> {
    root: &'a BinaryNode<V>,
}

impl<'a, V> BinaryDisplay<'a, V> {
    pub fn new(root: &'a BinaryNode<V>) -> Self {
        Self { root }
    }
}

impl<V: fmt::Display> fmt::Display for BinaryDisplay<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Root: {}", self.root.value)?;
        let mut pending = Vec::new();
        push_children(&mut pending, self.root, 1);
        while let Some((direction, child, level)) = pending.pop() {
            let indent = INDENT.repeat(level);
            match child {
                Some(child) => {
                    writeln!(f, "{}{}--- {}", indent, direction, child.value)?;
                    push_children(&mut pending, child, level + 1);
                }
                None => writeln!(f, "{}{}--- {}", indent, direction, MISSING)?,
            }
        }
        Ok(())
    }
}

type Slot<'a, V> = (Direction, Option<&'a BinaryNode<V>>, usize);

/// Queues both slots of a non-leaf, left on top.
fn push_children<'a, V>(pending: &mut Vec<Slot<'a, V>>, node: &'a BinaryNode<V>, level: usize) {
    if node.is_leaf() {
        return;
    }
    pending.push((Direction::Right, node.right.as_deref(), level));
    pending.push((Direction::Left, node.left.as_deref(), level));
}

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<V: fmt::Display> TreeNodeConvert for GeneralNode<V> {
    #[instrument(level = "trace", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        let leaves: Vec<_> = self
            .children
            .iter()
            .map(|child| child.to_tree_string())
            .collect();

        Tree::new(self.value.to_string()).with_leaves(leaves)
    }
}
