//! MVCC coordinator: the shared database handle.

use std::fmt;

use parking_lot::{Mutex, MutexGuard, RwLock};

use crate::options::Options;
use crate::tree::Tree;
use crate::txn::Txn;

/// In-memory ordered key-value store with snapshot-isolated transactions.
///
/// Holds the current committed [`Tree`] and the writer lock. Any number of
/// read transactions run alongside at most one write transaction; each one
/// sees the tree that was current when it began.
///
/// Share it across threads by reference (it is `Sync` when `V` is
/// `Send + Sync`) or behind an [`Arc`](std::sync::Arc).
///
/// # Blocking
///
/// Only [`begin(true)`](Self::begin) waits for another transaction. Taking a
/// snapshot reads the root slot without yielding to queued publishers, so a
/// reader waits at most while a commit replaces the root handle, never for
/// the commit's transaction or for other readers.
pub struct Database<V> {
    /// Current committed root. Locked only to clone or replace the handle,
    /// never across a transaction. Readers take it with `read_recursive` so
    /// a queued publish cannot park them.
    root: RwLock<Tree<V>>,
    /// Held by the live write transaction for its whole lifetime.
    writer: Mutex<()>,
    options: Options,
}

// ---------------------------------------------------------------------------
// Construction & accessors
// ---------------------------------------------------------------------------

impl<V> Database<V> {
    /// Creates an empty database with default [`Options`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Creates an empty database.
    #[must_use]
    pub const fn with_options(options: Options) -> Self {
        Self {
            root: RwLock::new(Tree::new()),
            writer: Mutex::new(()),
            options,
        }
    }

    /// Returns the options this database was created with.
    #[must_use]
    pub const fn options(&self) -> Options {
        self.options
    }

    /// Returns the current committed tree.
    ///
    /// The snapshot is O(1) to take and stays valid and unchanged for as
    /// long as it is held, whatever is committed afterwards.
    #[must_use]
    pub fn snapshot(&self) -> Tree<V> {
        self.root.read_recursive().clone()
    }

    /// Returns the number of entries in the current committed tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.read_recursive().len()
    }

    /// Returns `true` if the current committed tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

impl<V> Database<V> {
    /// Begins a transaction.
    ///
    /// A write transaction first waits for the writer lock, so its snapshot
    /// is always the latest commit. A read transaction never waits.
    pub fn begin(&self, write: bool) -> Txn<'_, V> {
        if write {
            let writer = self.writer.lock();
            let base = self.snapshot();
            log::debug!("write transaction began at {} entries", base.len());
            Txn::writable(self, base, writer)
        } else {
            let base = self.snapshot();
            log::trace!("read transaction began at {} entries", base.len());
            Txn::read_only(self, base)
        }
    }

    /// Begins a read-only transaction.
    pub fn read(&self) -> Txn<'_, V> {
        self.begin(false)
    }

    /// Begins a write transaction, blocking while another one is live.
    pub fn write(&self) -> Txn<'_, V> {
        self.begin(true)
    }

    /// Makes `tree` the current committed root in a single replace.
    pub(crate) fn publish(&self, tree: Tree<V>) {
        let old = std::mem::replace(&mut *self.root.write(), tree);
        // Dropping the old root may free a large subtree; keep that outside
        // the lock.
        drop(old);
    }

    /// Releases the writer lock held by a finished write transaction.
    pub(crate) fn release(&self, writer: MutexGuard<'_, ()>) {
        if self.options.fair_handoff {
            MutexGuard::unlock_fair(writer);
        } else {
            drop(writer);
        }
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<V> Default for Database<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for Database<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("len", &self.len())
            .field("writer_locked", &self.writer.is_locked())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
