//! Trie operations, one module per operation.

pub mod get;
pub mod insert;
pub mod remove;
