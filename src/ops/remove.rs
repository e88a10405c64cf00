//! Removal operation: COW path-copy delete with node collapsing.

use std::sync::Arc;

use crate::node::{Inner, Leaf, Node};
use crate::ops::get::get;

/// Removes `key` from the tree rooted at `root`, returning the removed leaf.
///
/// The presence check runs first and read-only, so a miss never copies a
/// node: `root` keeps pointing at the same allocation.
pub fn remove<V>(root: &mut Option<Node<V>>, key: &[u8]) -> Option<Arc<Leaf<V>>> {
    let node = root.as_mut()?;
    get(node, key)?;
    let (leaf, emptied) = remove_recursive(node, key, 0)?;
    if emptied {
        *root = None;
    }
    Some(leaf)
}

/// Removes `key` from the subtree in `slot`, which sits at key offset
/// `depth`.
///
/// Returns the removed leaf and whether `slot` is now empty (the parent must
/// drop its edge), or `None` if the key is absent.
fn remove_recursive<V>(
    slot: &mut Node<V>,
    key: &[u8],
    depth: usize,
) -> Option<(Arc<Leaf<V>>, bool)> {
    let (removed, replacement) = match slot {
        Node::Leaf(leaf) => {
            return (leaf.key() == key).then(|| (Arc::clone(leaf), true));
        }
        Node::Inner(inner) => {
            if !key[depth..].starts_with(inner.prefix()) {
                return None;
            }
            let pos = depth + inner.prefix().len();

            let removed = if pos == key.len() {
                inner.leaf.as_ref()?;
                Arc::make_mut(inner).leaf.take()?
            } else {
                let i = inner.position(key[pos]).ok()?;
                let inner = Arc::make_mut(inner);
                let (leaf, emptied) = remove_recursive(&mut inner.edges[i].node, key, pos + 1)?;
                if emptied {
                    inner.edges.remove(i);
                }
                leaf
            };

            match collapse(Arc::make_mut(inner)) {
                Collapse::Keep => return Some((removed, false)),
                Collapse::Empty => return Some((removed, true)),
                Collapse::Replace(node) => (removed, node),
            }
        }
    };
    *slot = replacement;
    Some((removed, false))
}

// ---------------------------------------------------------------------------
// Collapsing
// ---------------------------------------------------------------------------

enum Collapse<V> {
    Keep,
    Empty,
    Replace(Node<V>),
}

/// Restores the compression invariant after a removal below `inner`.
///
/// - only an inline leaf left → the node becomes that leaf
/// - one edge and no inline leaf → the node merges with its child
fn collapse<V>(inner: &mut Inner<V>) -> Collapse<V> {
    match (inner.edges.len(), inner.leaf.take()) {
        (0, None) => Collapse::Empty,
        (0, Some(leaf)) => Collapse::Replace(Node::Leaf(leaf)),
        (1, None) => {
            let edge = inner.edges.pop().expect("one edge");
            match edge.node {
                // Leaves carry their full key, so the path above is implicit.
                Node::Leaf(leaf) => Collapse::Replace(Node::Leaf(leaf)),
                Node::Inner(mut child) => {
                    let len = inner.prefix.len() + 1 + child.prefix.len();
                    let mut prefix = Vec::with_capacity(len);
                    prefix.extend_from_slice(&inner.prefix);
                    prefix.push(edge.label);
                    prefix.extend_from_slice(&child.prefix);
                    Arc::make_mut(&mut child).prefix = prefix.into();
                    Collapse::Replace(Node::Inner(child))
                }
            }
        }
        (_, leaf) => {
            inner.leaf = leaf;
            Collapse::Keep
        }
    }
}
