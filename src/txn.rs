//! Transactions: read-only snapshots and the write overlay.

use std::fmt;
use std::mem;

use parking_lot::MutexGuard;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::iter::{Iter, Values};
use crate::tree::Tree;

/// A transaction bound to one [`Database`].
///
/// Reads see the snapshot captured at [`Database::begin`]. A write
/// transaction layers its edits over that snapshot in a private working
/// tree: edits path-copy shared nodes, and nodes the transaction created
/// itself are edited in place. Nothing is visible outside until
/// [`commit`](Self::commit).
///
/// Dropping a live write transaction aborts it.
pub struct Txn<'db, V> {
    db: &'db Database<V>,
    /// Snapshot reads fall back to; after a commit, the committed tree.
    base: Tree<V>,
    mode: Mode<'db, V>,
}

enum Mode<'db, V> {
    ReadOnly,
    Write {
        working: Tree<V>,
        writer: MutexGuard<'db, ()>,
    },
    /// A write transaction after commit or abort.
    Finished,
}

impl<'db, V> Txn<'db, V> {
    pub(crate) const fn read_only(db: &'db Database<V>, base: Tree<V>) -> Self {
        Self {
            db,
            base,
            mode: Mode::ReadOnly,
        }
    }

    pub(crate) fn writable(
        db: &'db Database<V>,
        base: Tree<V>,
        writer: MutexGuard<'db, ()>,
    ) -> Self {
        let working = base.clone();
        Self {
            db,
            base,
            mode: Mode::Write { working, writer },
        }
    }

    /// Returns `true` for a write transaction that has not finished yet.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        matches!(self.mode, Mode::Write { .. })
    }

    /// Returns `true` once a write transaction has committed or aborted.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self.mode, Mode::Finished)
    }

    /// The tree reads go to: the working tree while writing, otherwise the
    /// snapshot.
    const fn view(&self) -> &Tree<V> {
        match &self.mode {
            Mode::Write { working, .. } => working,
            Mode::ReadOnly | Mode::Finished => &self.base,
        }
    }

    const fn working_mut(&mut self, op: &'static str) -> Result<&mut Tree<V>> {
        match &mut self.mode {
            Mode::Write { working, .. } => Ok(working),
            Mode::ReadOnly => Err(Error::InvalidOperation {
                op,
                state: "read-only",
            }),
            Mode::Finished => Err(Error::InvalidOperation {
                op,
                state: "finished",
            }),
        }
    }

    /// Ends a live write transaction, handing back its working tree and the
    /// writer lock. Returns `None` for read-only or finished transactions.
    fn finish(&mut self) -> Option<(Tree<V>, MutexGuard<'db, ()>)> {
        match mem::replace(&mut self.mode, Mode::Finished) {
            Mode::Write { working, writer } => Some((working, writer)),
            other => {
                self.mode = other;
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Read operations
// ---------------------------------------------------------------------------

impl<V> Txn<'_, V> {
    /// Returns the value bound to `key`, including this transaction's own
    /// uncommitted edits.
    #[must_use]
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&V> {
        self.view().get(key)
    }

    /// Returns the values whose key starts with `prefix`, lazily, in
    /// ascending key order.
    ///
    /// An empty prefix yields every value; an unmatched prefix yields none.
    #[must_use]
    pub fn all(&self, prefix: impl AsRef<[u8]>) -> Values<'_, V> {
        self.view().values(prefix)
    }

    /// Returns the `(key, value)` pairs whose key starts with `prefix`, in
    /// ascending key order.
    #[must_use]
    pub fn iter_prefix(&self, prefix: impl AsRef<[u8]>) -> Iter<'_, V> {
        self.view().iter_prefix(prefix)
    }

    /// Returns the number of entries visible to this transaction.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.view().len()
    }

    /// Returns `true` if no entries are visible to this transaction.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.view().is_empty()
    }

    /// Returns the tree visible to this transaction as a standalone
    /// snapshot, in O(1).
    #[must_use]
    pub fn snapshot(&self) -> Tree<V> {
        self.view().clone()
    }
}

// ---------------------------------------------------------------------------
// Write operations
// ---------------------------------------------------------------------------

impl<V> Txn<'_, V> {
    /// Binds `key` to `value` in the working tree.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidOperation`] if the transaction is read-only or has
    /// already committed or aborted.
    pub fn put(&mut self, key: impl AsRef<[u8]>, value: V) -> Result<()> {
        self.working_mut("put")?.insert(key, value);
        Ok(())
    }

    /// Removes `key` from the working tree.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidOperation`] if the transaction is read-only or has
    /// already committed or aborted; [`Error::NotFound`] if `key` is absent.
    pub fn delete(&mut self, key: impl AsRef<[u8]>) -> Result<()> {
        let key = key.as_ref();
        if self.working_mut("delete")?.remove(key) {
            Ok(())
        } else {
            Err(Error::NotFound { key: key.to_vec() })
        }
    }

    /// Publishes the working tree as the database's current root and
    /// releases the writer lock.
    ///
    /// No-op on a read-only or finished transaction. Afterwards reads see
    /// the committed tree.
    pub fn commit(&mut self) {
        let Some((working, writer)) = self.finish() else {
            return;
        };
        let len = working.len();
        self.db.publish(working.clone());
        self.base = working;
        self.db.release(writer);
        log::debug!("write transaction committed at {len} entries");
    }

    /// Discards the working tree and releases the writer lock.
    ///
    /// No-op on a read-only or finished transaction. The database root is
    /// untouched; reads go back to the original snapshot.
    pub fn abort(&mut self) {
        let Some((working, writer)) = self.finish() else {
            return;
        };
        drop(working);
        self.db.release(writer);
        log::debug!("write transaction aborted");
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<V> Drop for Txn<'_, V> {
    fn drop(&mut self) {
        self.abort();
    }
}

impl<V> fmt::Debug for Txn<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.mode {
            Mode::ReadOnly => "read-only",
            Mode::Write { .. } => "write",
            Mode::Finished => "finished",
        };
        f.debug_struct("Txn")
            .field("mode", &mode)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
