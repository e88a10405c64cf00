//! Database configuration.

/// Tuning knobs for a [`Database`](crate::Database).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Hand the writer lock straight to the longest-waiting writer on commit
    /// or abort.
    ///
    /// When `false`, a writer that releases the lock may win it back before
    /// the queued writers wake up, which is faster under contention but can
    /// starve them.
    pub fair_handoff: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { fair_handoff: true }
    }
}
