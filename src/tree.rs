//! Persistent radix tree: one immutable snapshot of the key space.

use std::fmt;
use std::ops;
use std::sync::Arc;

use crate::InsertResult;
use crate::iter::{Iter, Values};
use crate::node::{Leaf, Node};
use crate::ops::get::get;
use crate::ops::insert::{InsertOutcome, insert_recursive};
use crate::ops::remove::remove;

/// Persistent ordered map from byte-string keys to `V`, backed by a
/// path-compressed radix trie.
///
/// Cloning is O(1) and shares every node. Mutating a tree path-copies the
/// O(depth) nodes it shares with any other tree and leaves the rest shared,
/// so a clone taken before an edit never observes it.
pub struct Tree<V> {
    root: Option<Node<V>>,
    size: usize,
}

// ---------------------------------------------------------------------------
// Construction & accessors (no trait bounds)
// ---------------------------------------------------------------------------

impl<V> Tree<V> {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the tree contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the root node, or `None` for an empty tree.
    #[must_use]
    pub const fn root(&self) -> Option<&Node<V>> {
        self.root.as_ref()
    }

    /// Returns `true` if both trees have the same root allocation.
    ///
    /// Two empty trees are identical.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (Some(a), Some(b)) => a.ptr_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Read operations
// ---------------------------------------------------------------------------

impl<V> Tree<V> {
    /// Returns a reference to the value bound to `key`.
    #[must_use]
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&V> {
        get(self.root.as_ref()?, key.as_ref()).map(Leaf::value)
    }

    /// Returns `true` if the tree contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.get(key).is_some()
    }

    /// Returns an iterator over all `(key, value)` pairs in ascending key
    /// order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self.root.as_ref(), &[])
    }

    /// Returns an iterator over the entries whose key starts with `prefix`,
    /// in ascending key order.
    ///
    /// An unmatched prefix yields nothing.
    #[must_use]
    pub fn iter_prefix(&self, prefix: impl AsRef<[u8]>) -> Iter<'_, V> {
        Iter::new(self.root.as_ref(), prefix.as_ref())
    }

    /// Returns an iterator over the values whose key starts with `prefix`.
    #[must_use]
    pub fn values(&self, prefix: impl AsRef<[u8]>) -> Values<'_, V> {
        Values::new(self.iter_prefix(prefix))
    }
}

// ---------------------------------------------------------------------------
// Write operations
// ---------------------------------------------------------------------------

impl<V> Tree<V> {
    /// Binds `key` to `value`.
    ///
    /// Returns [`Inserted`](InsertResult::Inserted) if the key was new, or
    /// [`Updated`](InsertResult::Updated) if an existing value was replaced.
    pub fn insert(&mut self, key: impl AsRef<[u8]>, value: V) -> InsertResult {
        let leaf = Arc::new(Leaf::new(key.as_ref().into(), value));
        let Some(root) = self.root.as_mut() else {
            self.root = Some(Node::Leaf(leaf));
            self.size = 1;
            return InsertResult::Inserted;
        };
        match insert_recursive(root, leaf, 0) {
            InsertOutcome::Inserted => {
                self.size += 1;
                InsertResult::Inserted
            }
            InsertOutcome::Updated => InsertResult::Updated,
        }
    }

    /// Removes `key`. Returns `true` if the key was present.
    ///
    /// A miss leaves the tree untouched: [`ptr_eq`](Self::ptr_eq) with a
    /// clone taken before the call still holds.
    pub fn remove(&mut self, key: impl AsRef<[u8]>) -> bool {
        if remove(&mut self.root, key.as_ref()).is_some() {
            self.size -= 1;
            true
        } else {
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<V> Clone for Tree<V> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            size: self.size,
        }
    }
}

impl<V> Default for Tree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for Tree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.size)
            .field("root", &self.root)
            .finish()
    }
}

impl<K: AsRef<[u8]>, V> Extend<(K, V)> for Tree<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: AsRef<[u8]>, V> FromIterator<(K, V)> for Tree<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: AsRef<[u8]> + ?Sized, V> ops::Index<&K> for Tree<V> {
    type Output = V;

    fn index(&self, key: &K) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, V> IntoIterator for &'a Tree<V> {
    type Item = (&'a [u8], &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}
