//! Insertion operation: COW path-copy insert with prefix splitting.

use std::sync::Arc;

use crate::node::{self, Edge, Inner, Leaf, Node};

/// Outcome of a recursive insert.
pub enum InsertOutcome {
    /// A new key was added.
    Inserted,
    /// An existing key was rebound to a new value.
    Updated,
}

/// Inserts `leaf` into the subtree in `slot`, which sits at key offset
/// `depth`.
///
/// Shared nodes on the path are copied before being edited
/// ([`Arc::make_mut`]); nodes owned solely by this subtree are edited in
/// place. Untouched siblings stay shared.
pub fn insert_recursive<V>(slot: &mut Node<V>, leaf: Arc<Leaf<V>>, depth: usize) -> InsertOutcome {
    match slot {
        Node::Leaf(existing) => {
            if existing.key() == leaf.key() {
                *existing = leaf;
                return InsertOutcome::Updated;
            }
            let split = split_leaves(Arc::clone(existing), leaf, depth);
            *slot = split;
            InsertOutcome::Inserted
        }
        Node::Inner(inner) => {
            let common = node::common_prefix_len(inner.prefix(), &leaf.key()[depth..]);
            if common < inner.prefix().len() {
                let split = split_inner(inner, leaf, depth, common);
                *slot = split;
                return InsertOutcome::Inserted;
            }

            let pos = depth + common;
            let inner = Arc::make_mut(inner);
            if pos == leaf.key().len() {
                return match inner.leaf.replace(leaf) {
                    Some(_) => InsertOutcome::Updated,
                    None => InsertOutcome::Inserted,
                };
            }

            if let Ok(i) = inner.position(leaf.key()[pos]) {
                insert_recursive(&mut inner.edges[i].node, leaf, pos + 1)
            } else {
                inner.attach(leaf, pos);
                InsertOutcome::Inserted
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Splits
// ---------------------------------------------------------------------------

/// Replaces a leaf with an inner node holding it and a second, distinct leaf.
///
/// The new node's prefix is the longest common prefix of both keys past
/// `depth`.
fn split_leaves<V>(a: Arc<Leaf<V>>, b: Arc<Leaf<V>>, depth: usize) -> Node<V> {
    let common = node::common_prefix_len(&a.key()[depth..], &b.key()[depth..]);
    let pos = depth + common;
    let mut inner = Inner::with_prefix(&b.key()[depth..pos]);
    inner.attach(a, pos);
    inner.attach(b, pos);
    Node::Inner(Arc::new(inner))
}

/// Splits `old`'s prefix after `common` bytes, pushing `old` one level down
/// and attaching `leaf` beside it.
fn split_inner<V>(old: &Arc<Inner<V>>, leaf: Arc<Leaf<V>>, depth: usize, common: usize) -> Node<V> {
    let label = old.prefix()[common];

    let mut lower = Arc::clone(old);
    {
        let lower = Arc::make_mut(&mut lower);
        lower.prefix = lower.prefix[common + 1..].into();
    }

    let mut upper = Inner::with_prefix(&old.prefix()[..common]);
    upper.edges.push(Edge {
        label,
        node: Node::Inner(lower),
    });
    upper.attach(leaf, depth + common);
    Node::Inner(Arc::new(upper))
}
