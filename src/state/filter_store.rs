//! Filter state store: applies edits and decides when they propagate.
//!
//! Two copies of `FilterState` are kept:
//! - `local`: what the inputs show, updated on every keystroke
//! - `applied`: what the last fetch was built from
//!
//! Search text is staged in `local` immediately and reaches `applied` through
//! the debouncer. Every other field reaches `applied` synchronously. An
//! immediate propagation carries the staged search along and cancels the
//! pending debounce, so one change never yields two fetches.

use crate::model::error::{FieldError, FieldName};
use crate::model::filter::{FilterEdit, FilterState, Price};
use crate::model::identifiers::TimerId;
use crate::model::query::{to_query, Query};
use crate::state::debounce::{Debouncer, DEFAULT_SEARCH_DEBOUNCE};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Result of applying one edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Search text staged; it will propagate when the timer fires.
    Staged(TimerId),
    /// The applied filters changed; the caller must fetch.
    Applied,
    /// Nothing changed.
    Unchanged,
    /// Invalid input. The previous valid value is kept.
    Rejected(FieldError),
}

impl FilterOutcome {
    /// Whether the applied query changed.
    pub fn needs_fetch(&self) -> bool {
        matches!(self, FilterOutcome::Applied)
    }
}

/// Holds the filters as typed (`local`) and as last propagated (`applied`).
///
/// Search edits reach `applied` through the debouncer; every other edit is
/// applied at once.
#[derive(Debug, Clone)]
pub struct FilterStore {
    local: FilterState,
    applied: FilterState,
    debouncer: Debouncer<String>,
    delay: Duration,
    field_errors: BTreeMap<FieldName, String>,
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}

impl FilterStore {
    /// Store with default filters and the given search debounce delay.
    pub fn new(delay: Duration) -> Self {
        Self::with_state(FilterState::default(), delay)
    }

    /// Store seeded with `initial` as both local and applied state.
    pub fn with_state(initial: FilterState, delay: Duration) -> Self {
        Self {
            local: initial.clone(),
            applied: initial,
            debouncer: Debouncer::new(),
            delay,
            field_errors: BTreeMap::new(),
        }
    }

    /// Filters as currently shown in the inputs (includes staged search text).
    pub fn state(&self) -> &FilterState {
        &self.local
    }

    /// Filters the current results were requested with.
    pub fn applied(&self) -> &FilterState {
        &self.applied
    }

    /// Canonical query for the applied filters.
    pub fn query(&self) -> Query {
        to_query(&self.applied)
    }

    /// Search debounce delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Apply one user edit.
    pub fn set_field(&mut self, edit: FilterEdit, now: Instant) -> FilterOutcome {
        match edit {
            FilterEdit::Search(text) => {
                self.local.search = text.clone();
                let id = self.debouncer.schedule(text, self.delay, now);
                debug!(timer = %id, "search staged");
                FilterOutcome::Staged(id)
            }
            FilterEdit::Category(category) => {
                self.local.category = category;
                self.propagate_if_changed()
            }
            FilterEdit::MinPrice(raw) => self.set_price(FieldName::MinPrice, &raw),
            FilterEdit::MaxPrice(raw) => self.set_price(FieldName::MaxPrice, &raw),
            FilterEdit::InStock(stock) => {
                self.local.in_stock = stock;
                self.propagate_if_changed()
            }
            FilterEdit::SortBy(sort_by) => {
                self.local.sort_by = sort_by;
                self.propagate_if_changed()
            }
            FilterEdit::SortOrder(order) => {
                self.local.sort_order = order;
                self.propagate_if_changed()
            }
        }
    }

    /// Propagate the staged search now (Enter / Search button).
    ///
    /// Always reports `Applied` so an explicit submit re-runs the query.
    pub fn submit_search(&mut self) -> FilterOutcome {
        self.debouncer.cancel();
        self.applied = self.local.clone();
        FilterOutcome::Applied
    }

    /// Reset every field to its default in one step.
    ///
    /// Cancels any pending search firing and clears field messages. Always
    /// reports `Applied`: the cleared state propagates immediately.
    pub fn clear(&mut self) -> FilterOutcome {
        if let Some(id) = self.debouncer.cancel() {
            debug!(timer = %id, "pending search cancelled by clear");
        }
        self.field_errors.clear();
        self.local = FilterState::default();
        self.applied = FilterState::default();
        FilterOutcome::Applied
    }

    /// Fire the debounced search if due.
    pub fn tick(&mut self, now: Instant) -> FilterOutcome {
        let Some(search) = self.debouncer.poll(now) else {
            return FilterOutcome::Unchanged;
        };
        debug!(search = %search, "debounced search fired");
        if self.applied.search == search && self.applied == self.local {
            return FilterOutcome::Unchanged;
        }
        self.local.search = search;
        self.applied = self.local.clone();
        FilterOutcome::Applied
    }

    /// Drop any pending search firing (owner teardown).
    pub fn cancel_pending(&mut self) -> Option<TimerId> {
        self.debouncer.cancel()
    }

    /// Search text waiting on the debounce.
    pub fn pending_search(&self) -> Option<&str> {
        self.debouncer.pending_value().map(String::as_str)
    }

    /// When the pending search will fire.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// True iff any field differs from its default. Drives UI affordances only.
    pub fn has_active_filters(&self) -> bool {
        !self.local.is_default()
    }

    /// Message for a rejected field.
    pub fn field_error(&self, field: FieldName) -> Option<&str> {
        self.field_errors.get(&field).map(String::as_str)
    }

    /// All rejected fields, in field order.
    pub fn field_errors(&self) -> Vec<FieldError> {
        self.field_errors
            .iter()
            .map(|(field, message)| FieldError::new(*field, message.clone()))
            .collect()
    }

    // ===== Helpers =====

    fn set_price(&mut self, field: FieldName, raw: &str) -> FilterOutcome {
        let price = match Price::parse_input(raw) {
            Ok(price) => price,
            Err(message) => {
                debug!(%field, raw, "rejected price input");
                self.field_errors.insert(field, message.clone());
                return FilterOutcome::Rejected(FieldError::new(field, message));
            }
        };
        self.field_errors.remove(&field);
        match field {
            FieldName::MinPrice => self.local.min_price = price,
            _ => self.local.max_price = price,
        }
        self.propagate_if_changed()
    }

    /// Immediate propagation of the whole local state, staged search included.
    fn propagate_if_changed(&mut self) -> FilterOutcome {
        if self.local == self.applied {
            return FilterOutcome::Unchanged;
        }
        if let Some(id) = self.debouncer.cancel() {
            debug!(timer = %id, "staged search folded into immediate update");
        }
        self.applied = self.local.clone();
        FilterOutcome::Applied
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "filter_store_tests.rs"]
mod tests;
