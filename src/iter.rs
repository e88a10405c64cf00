//! Iterator types for radix trees.
//!
//! Iteration is lazy and borrows the tree it came from: the nodes are
//! immutable, so a fresh iterator over the same tree always reproduces the
//! same sequence, no matter what writers publish meanwhile.

use std::iter::FusedIterator;

use crate::node::{Leaf, Node};

/// Iterator over `(key, value)` pairs in ascending lexicographic key order.
///
/// Created by [`Tree::iter`](crate::Tree::iter),
/// [`Tree::iter_prefix`](crate::Tree::iter_prefix) and
/// [`Txn::iter_prefix`](crate::Txn::iter_prefix).
pub struct Iter<'a, V> {
    stack: Vec<&'a Node<V>>,
}

impl<'a, V> Iter<'a, V> {
    /// Creates an iterator over every entry under `root` whose key starts
    /// with `prefix`.
    pub(crate) fn new(root: Option<&'a Node<V>>, prefix: &[u8]) -> Self {
        let stack = root
            .and_then(|node| seek(node, prefix))
            .into_iter()
            .collect();
        Self { stack }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a [u8], &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            let leaf: &'a Leaf<V> = match node {
                Node::Leaf(leaf) => leaf,
                Node::Inner(inner) => {
                    // Children go on the stack highest label first so the
                    // lowest pops next; the inline leaf sorts before them all.
                    let children = inner.children().rev().map(|(_, child)| child);
                    self.stack.extend(children);
                    match inner.leaf() {
                        Some(leaf) => leaf,
                        None => continue,
                    }
                }
            };
            return Some((leaf.key(), leaf.value()));
        }
        None
    }
}

impl<V> FusedIterator for Iter<'_, V> {}

/// Iterator over values in ascending key order.
///
/// Created by [`Txn::all`](crate::Txn::all) and
/// [`Tree::values`](crate::Tree::values).
pub struct Values<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Values<'a, V> {
    pub(crate) const fn new(inner: Iter<'a, V>) -> Self {
        Self { inner }
    }
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

impl<V> FusedIterator for Values<'_, V> {}

/// Descends from `root` to the smallest subtree holding every key that
/// starts with `prefix`.
///
/// Returns `None` if no key can match.
fn seek<'a, V>(mut node: &'a Node<V>, prefix: &[u8]) -> Option<&'a Node<V>> {
    let mut depth = 0;
    loop {
        match node {
            Node::Leaf(leaf) => {
                return leaf.key().starts_with(prefix).then_some(node);
            }
            Node::Inner(inner) => {
                let rest = &prefix[depth..];
                let own = inner.prefix();
                if rest.len() <= own.len() {
                    // The prefix ends inside (or exactly at the end of) this
                    // node's own bytes.
                    return own.starts_with(rest).then_some(node);
                }
                if !rest.starts_with(own) {
                    return None;
                }
                depth += own.len();
                node = inner.child(prefix[depth])?;
                depth += 1;
            }
        }
    }
}
