//! Error types for transactional operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by mutating transaction calls.
///
/// Reads never fail: an absent key is `None`, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A mutation was attempted on a transaction that cannot accept it.
    #[error("cannot {op} in a {state} transaction")]
    InvalidOperation {
        /// The rejected operation (`"put"` or `"delete"`).
        op: &'static str,
        /// Why it was rejected (`"read-only"` or `"finished"`).
        state: &'static str,
    },

    /// A delete targeted a key that is not present.
    #[error("key {:?} not found", String::from_utf8_lossy(.key))]
    NotFound {
        /// The missing key.
        key: Vec<u8>,
    },
}
