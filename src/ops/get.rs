//! Lookup operation: walks the trie consuming the key against edge labels.

use crate::node::{Leaf, Node};

/// Searches for `key` in the subtree rooted at `node`, which sits at key
/// offset 0.
///
/// Returns the leaf if found. Never allocates.
pub fn get<'a, V>(mut node: &'a Node<V>, key: &[u8]) -> Option<&'a Leaf<V>> {
    let mut depth = 0;
    loop {
        match node {
            Node::Leaf(leaf) => {
                return (leaf.key() == key).then_some(&**leaf);
            }
            Node::Inner(inner) => {
                if !key[depth..].starts_with(inner.prefix()) {
                    return None;
                }
                depth += inner.prefix().len();
                if depth == key.len() {
                    return inner.leaf();
                }
                // Key continues past this node; follow its next byte.
                node = inner.child(key[depth])?;
                depth += 1;
            }
        }
    }
}
