mod basic;
#[allow(
    clippy::significant_drop_tightening,
    reason = "each scenario holds its transactions, and with them the writer lock, on purpose"
)]
#[allow(
    clippy::significant_drop_tightening,
    reason = "the Debug check needs a live write transaction"
)]
#[allow(
    clippy::significant_drop_tightening,
    reason = "each scenario holds its transactions, and with them the writer lock, on purpose"
)]

use std::fmt::Write;

use crate::Tree;
use crate::node::Node;

/// Walks the whole trie and panics on any broken structural invariant:
/// - every inner node has ≥2 edges, or an inline leaf and ≥1 edge
/// - edge labels strictly ascend
/// - every leaf key matches the path that leads to it
/// - an inline leaf's key ends exactly at its node
/// - the entry count matches `len()`
pub fn assert_invariants<V>(tree: &Tree<V>) {
    let mut count = 0;
    if let Some(root) = tree.root() {
        check_node(root, &mut Vec::new(), &mut count);
    }
    assert_eq!(
        count,
        tree.len(),
        "len() disagrees with the number of leaves"
    );
}

fn check_node<V>(node: &Node<V>, path: &mut Vec<u8>, count: &mut usize) {
    match node {
        Node::Leaf(leaf) => {
            assert!(
                leaf.key().starts_with(&path[..]),
                "leaf {:?} under path {path:?}",
                leaf.key()
            );
            *count += 1;
        }
        Node::Inner(inner) => {
            let base = path.len();
            path.extend_from_slice(inner.prefix());

            if let Some(leaf) = inner.leaf() {
                assert_eq!(leaf.key(), &path[..], "inline leaf off its node");
                *count += 1;
            }

            let edges = node.children_len();
            assert!(
                edges >= 2 || (edges == 1 && inner.leaf().is_some()),
                "uncompressed node at {path:?}: {edges} edges, leaf={}",
                inner.leaf().is_some()
            );

            let mut prev = None;
            for (label, child) in inner.children() {
                assert!(prev < Some(label), "edge labels out of order at {path:?}");
                prev = Some(label);
                path.push(label);
                check_node(child, path, count);
                path.pop();
            }
            path.truncate(base);
        }
    }
}

/// Renders the trie shape (prefixes, labels, leaf positions), ignoring
/// values.
pub fn shape<V>(tree: &Tree<V>) -> String {
    let mut out = String::new();
    if let Some(root) = tree.root() {
        render(root, &mut out);
    }
    out
}

fn render<V>(node: &Node<V>, out: &mut String) {
    match node {
        Node::Leaf(leaf) => {
            let _ = write!(out, "L{:?}", leaf.key());
        }
        Node::Inner(inner) => {
            let _ = write!(out, "I{:?}", inner.prefix());
            if inner.leaf().is_some() {
                out.push('*');
            }
            out.push('(');
            for (label, child) in inner.children() {
                let _ = write!(out, "{label}:");
                render(child, out);
                out.push(',');
            }
            out.push(')');
        }
    }
}

/// Collects a tree's keys as strings, in iteration order.
pub fn keys<V>(tree: &Tree<V>) -> Vec<String> {
    tree.iter()
        .map(|(k, _)| String::from_utf8_lossy(k).into_owned())
        .collect()
}
