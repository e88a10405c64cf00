//! In-memory ordered key-value store with snapshot-isolated transactions.
//!
//! The key space lives in a persistent radix trie: nodes are immutable once
//! another tree can see them, edits path-copy the root-to-leaf chain, and
//! every untouched subtree stays shared. On top of that sits an MVCC
//! coordinator with one atomically replaced root and a single writer lock.
//!
//! # Key properties
//!
//! - **Snapshot isolation**: a transaction sees the root that was current
//!   when it began, never another transaction's uncommitted edits
//! - **Single writer, unblocked readers**: write transactions are serialized;
//!   readers never wait on them
//! - **O(1) snapshots**: taking a snapshot clones one root handle
//! - **Ordered prefix iteration**: lazy, lexicographic by key bytes
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`
//!
//! # Example
//!
//! ```
//! use radix_mvcc::Database;
//!
//! let db = Database::new();
//!
//! let mut txn = db.begin(true);
//! txn.put("a.1", 1).unwrap();
//! txn.put("a.2", 2).unwrap();
//! txn.put("c.1", 3).unwrap();
//! txn.commit();
//!
//! let txn = db.begin(false);
//! assert_eq!(txn.get("a.2"), Some(&2));
//! assert_eq!(txn.all("a").copied().collect::<Vec<_>>(), [1, 2]);
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod iter;
pub mod node;
pub mod options;

mod db;
mod ops;
mod tree;
mod txn;

#[cfg(test)]
mod tests;

pub use db::Database;
pub use error::{Error, Result};
pub use iter::{Iter, Values};
pub use options::Options;
pub use tree::Tree;
pub use txn::Txn;

/// Result of [`Tree::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    /// The key was not present and has been added.
    Inserted,
    /// The key was present and its value has been replaced.
    Updated,
}
