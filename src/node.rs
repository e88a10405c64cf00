//! Radix trie node types and byte-prefix helpers.

use std::fmt;
use std::sync::Arc;

/// A stored key-value pair.
///
/// Leaves are shared behind [`Arc`] so they can move between positions in
/// the trie (inline slot, child edge, collapsed node) without cloning `V`.
pub struct Leaf<V> {
    key: Box<[u8]>,
    value: V,
}

impl<V> Leaf<V> {
    /// Creates a leaf holding `key` and `value`.
    #[must_use]
    pub const fn new(key: Box<[u8]>, value: V) -> Self {
        Self { key, value }
    }

    /// Returns the full key of this leaf.
    #[must_use]
    pub const fn key(&self) -> &[u8] {
        &self.key
    }

    /// Returns the stored value.
    #[must_use]
    pub const fn value(&self) -> &V {
        &self.value
    }
}

/// Radix trie node.
///
/// A node sits at some `depth`: the number of key bytes consumed by the
/// edges above it.
/// - [`Leaf`](Self::Leaf): a single entry; the remaining key bytes are implicit
/// - [`Inner`](Self::Inner): a compressed prefix, an optional inline leaf and
///   the child edges
pub enum Node<V> {
    /// Single entry.
    Leaf(Arc<Leaf<V>>),
    /// Branching node.
    ///
    /// Invariant: `edges.len() >= 2`, or an inline leaf and at least one edge.
    Inner(Arc<Inner<V>>),
}

/// Contents of an internal node.
pub struct Inner<V> {
    /// Key bytes shared by every entry below, starting at the node's depth.
    pub(crate) prefix: Box<[u8]>,
    /// Entry whose key ends exactly after `prefix`.
    pub(crate) leaf: Option<Arc<Leaf<V>>>,
    /// Children, sorted by strictly ascending label.
    pub(crate) edges: Vec<Edge<V>>,
}

/// Labeled child reference.
///
/// The label is the first key byte after the parent's prefix; the child sits
/// one byte deeper than that.
pub struct Edge<V> {
    /// Distinguishing key byte.
    pub(crate) label: u8,
    /// Child subtree.
    pub(crate) node: Node<V>,
}

// ---------------------------------------------------------------------------
// Prefix helpers
// ---------------------------------------------------------------------------

/// Returns the length of the longest common prefix of `a` and `b`.
#[inline]
#[must_use]
pub fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

// ---------------------------------------------------------------------------
// Node accessors
// ---------------------------------------------------------------------------

impl<V> Node<V> {
    /// Returns `true` if both handles point at the same allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Leaf(a), Self::Leaf(b)) => Arc::ptr_eq(a, b),
            (Self::Inner(a), Self::Inner(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Returns the number of child edges (always 0 for leaves).
    #[must_use]
    pub fn children_len(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Inner(inner) => inner.edges.len(),
        }
    }
}

impl<V> Inner<V> {
    /// Creates an empty internal node with the given prefix.
    pub(crate) fn with_prefix(prefix: &[u8]) -> Self {
        Self {
            prefix: prefix.into(),
            leaf: None,
            edges: Vec::new(),
        }
    }

    /// Returns the compressed prefix.
    #[must_use]
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Returns the inline leaf, if any.
    #[must_use]
    pub fn leaf(&self) -> Option<&Leaf<V>> {
        self.leaf.as_deref()
    }

    /// Iterates `(label, child)` pairs in ascending label order.
    #[must_use]
    pub fn children(&self) -> impl DoubleEndedIterator<Item = (u8, &Node<V>)> {
        self.edges.iter().map(|e| (e.label, &e.node))
    }

    /// Returns the child under `label`.
    #[must_use]
    pub fn child(&self, label: u8) -> Option<&Node<V>> {
        self.position(label).ok().map(|i| &self.edges[i].node)
    }

    /// Binary-searches the edge list for `label`.
    pub(crate) fn position(&self, label: u8) -> Result<usize, usize> {
        self.edges.binary_search_by_key(&label, |e| e.label)
    }

    /// Places `leaf` below this node, whose prefix ends at `pos` in the key.
    ///
    /// The key must end at `pos` (inline slot) or continue with a label that
    /// has no edge yet.
    pub(crate) fn attach(&mut self, leaf: Arc<Leaf<V>>, pos: usize) {
        if leaf.key.len() == pos {
            self.leaf = Some(leaf);
        } else {
            let label = leaf.key[pos];
            let at = self.position(label).unwrap_or_else(|i| i);
            self.edges.insert(
                at,
                Edge {
                    label,
                    node: Node::Leaf(leaf),
                },
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Manual trait impls, without a `V: Clone` bound.
// Cloning only bumps reference counts.
// ---------------------------------------------------------------------------

impl<V> Clone for Node<V> {
    fn clone(&self) -> Self {
        match self {
            Self::Leaf(leaf) => Self::Leaf(Arc::clone(leaf)),
            Self::Inner(inner) => Self::Inner(Arc::clone(inner)),
        }
    }
}

impl<V> Clone for Inner<V> {
    fn clone(&self) -> Self {
        Self {
            prefix: self.prefix.clone(),
            leaf: self.leaf.clone(),
            edges: self.edges.clone(),
        }
    }
}

impl<V> Clone for Edge<V> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            node: self.node.clone(),
        }
    }
}

impl<V> fmt::Debug for Leaf<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaf")
            .field("key", &String::from_utf8_lossy(&self.key))
            .finish_non_exhaustive()
    }
}

impl<V> fmt::Debug for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(leaf) => fmt::Debug::fmt(leaf, f),
            Self::Inner(inner) => f
                .debug_struct("Inner")
                .field("prefix", &String::from_utf8_lossy(&inner.prefix))
                .field("leaf", &inner.leaf)
                .field("edges", &inner.edges.len())
                .finish(),
        }
    }
}
