//! Core identifier newtypes.
//!
//! Sequence-based ids are minted only by their owners (result binder, debouncer);
//! raw constructors stay crate-private.

use std::fmt;

/// Monotonically increasing tag attached to every catalog fetch.
///
/// A response is bound only if its id is the latest one issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub(crate) fn from_seq(seq: u64) -> Self {
        Self(seq)
    }

    /// Raw sequence number.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// Handle for one scheduled debounce firing.
///
/// Each `schedule` call mints a new id; the id of a replaced or cancelled
/// firing never fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub(crate) fn from_seq(seq: u64) -> Self {
        Self(seq)
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}
