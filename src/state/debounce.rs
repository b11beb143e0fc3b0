//! Cancellable debounce timer (pure).
//!
//! The debouncer never reads the clock itself: callers pass `now` into
//! `schedule` and `poll`. The event loop polls on every tick, which makes the
//! poll the timer callback. Tests drive it with synthetic instants.
//!
//! Semantics:
//! - `schedule` replaces any pending value and restarts the delay (last write wins)
//! - a value fires once, no earlier than `delay` after the last `schedule`
//! - `cancel` guarantees the pending value never fires

use crate::model::identifiers::TimerId;
use std::time::{Duration, Instant};

/// Default quiet period for search input.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
struct Pending<V> {
    id: TimerId,
    value: V,
    deadline: Instant,
}

/// Collapses a rapid sequence of values into one delayed delivery.
#[derive(Debug, Clone)]
pub struct Debouncer<V> {
    next_seq: u64,
    pending: Option<Pending<V>>,
}

impl<V> Default for Debouncer<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Debouncer<V> {
    /// Empty debouncer; timer ids start at 1.
    pub fn new() -> Self {
        Self {
            next_seq: 0,
            pending: None,
        }
    }

    /// Schedule `value` to fire `delay` after `now`.
    ///
    /// Any previously pending value is dropped and its timer id is dead.
    pub fn schedule(&mut self, value: V, delay: Duration, now: Instant) -> TimerId {
        self.next_seq += 1;
        let id = TimerId::from_seq(self.next_seq);
        self.pending = Some(Pending {
            id,
            value,
            deadline: now + delay,
        });
        id
    }

    /// Cancel whatever is pending. Returns the cancelled timer, if any.
    pub fn cancel(&mut self) -> Option<TimerId> {
        self.pending.take().map(|p| p.id)
    }

    /// Cancel only if `id` is still the pending timer.
    ///
    /// Returns false when the timer already fired or was replaced.
    pub fn cancel_timer(&mut self, id: TimerId) -> bool {
        if self.pending_id() == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Whether a value is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Id of the pending timer.
    pub fn pending_id(&self) -> Option<TimerId> {
        self.pending.as_ref().map(|p| p.id)
    }

    /// Value that will fire next.
    pub fn pending_value(&self) -> Option<&V> {
        self.pending.as_ref().map(|p| &p.value)
    }

    /// When the pending value will fire, if one is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Take the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<V> {
        match &self.pending {
            Some(p) if now >= p.deadline => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Callback form of [`poll`](Self::poll): invokes `on_fire` with the due value.
    ///
    /// Returns whether it fired.
    pub fn poll_with(&mut self, now: Instant, on_fire: impl FnOnce(V)) -> bool {
        match self.poll(now) {
            Some(value) => {
                on_fire(value);
                true
            }
            None => false,
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "debounce_tests.rs"]
mod tests;
