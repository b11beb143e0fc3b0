//! Binds fetch responses to the displayed result set.
//!
//! Every request gets a fresh [`RequestId`]. Only a response for the most
//! recently issued request is bound; anything older is discarded on arrival.
//!
//! Failure policy: a failed fetch keeps the previous plants on screen, records
//! an error, and offers `retry`, which re-issues the same parameters.

use crate::model::catalog_action::FetchRequest;
use crate::model::error::FetchError;
use crate::model::identifiers::RequestId;
use crate::model::plant::{Plant, PlantPage};
use crate::model::query::Query;
use crate::state::pagination::PageState;
use tracing::{debug, info, warn};

/// Plants for the current page plus the server's total count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    items: Vec<Plant>,
    count: u64,
}

impl ResultSet {
    /// Items on the current page.
    pub fn items(&self) -> &[Plant] {
        &self.items
    }

    /// Server-reported total.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// No items bound.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// What `resolve` did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Items and count replaced.
    Applied,
    /// Error recorded; previous items kept.
    Failed,
    /// Response belonged to a superseded request and was ignored.
    Discarded,
}

/// Issues tagged requests and binds only the latest response.
#[derive(Debug, Clone, Default)]
pub struct ResultBinder {
    next_seq: u64,
    latest: Option<FetchRequest>,
    in_flight: Option<RequestId>,
    result: ResultSet,
    error: Option<FetchError>,
}

impl ResultBinder {
    /// Empty binder with no request issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch for `query` at the given page. Supersedes any in-flight request.
    pub fn issue(&mut self, query: Query, page: &PageState) -> FetchRequest {
        self.next_seq += 1;
        let request = FetchRequest {
            id: RequestId::from_seq(self.next_seq),
            query,
            page: page.current_page(),
            limit: page.items_per_page(),
        };
        if let Some(previous) = self.in_flight {
            debug!(superseded = %previous, by = %request.id, "fetch superseded");
        }
        info!(id = %request.id, params = ?request.params(), "fetch issued");
        self.in_flight = Some(request.id);
        self.latest = Some(request.clone());
        request
    }

    /// Bind a settled fetch.
    pub fn resolve(&mut self, id: RequestId, outcome: Result<PlantPage, FetchError>) -> Resolution {
        if self.in_flight != Some(id) {
            debug!(%id, latest = ?self.in_flight, "stale response discarded");
            return Resolution::Discarded;
        }
        self.in_flight = None;

        match outcome {
            Ok(page) => {
                info!(%id, items = page.data.len(), count = page.count, "fetch applied");
                self.result = ResultSet {
                    items: page.data,
                    count: page.count,
                };
                self.error = None;
                Resolution::Applied
            }
            Err(err) => {
                warn!(%id, error = %err, "fetch failed");
                self.error = Some(err);
                Resolution::Failed
            }
        }
    }

    /// Re-issue the last request under a new id. None unless the last fetch failed.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        if self.error.is_none() || self.in_flight.is_some() {
            return None;
        }
        let previous = self.latest.clone()?;
        self.next_seq += 1;
        let request = FetchRequest {
            id: RequestId::from_seq(self.next_seq),
            ..previous
        };
        info!(id = %request.id, "fetch retried");
        self.in_flight = Some(request.id);
        self.latest = Some(request.clone());
        Some(request)
    }

    /// Append a plant created by this client, without refetching.
    pub fn append_created(&mut self, plant: Plant) {
        self.result.items.push(plant);
        self.result.count += 1;
    }

    /// Currently bound results.
    pub fn result(&self) -> &ResultSet {
        &self.result
    }

    /// True while the latest request is in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Error from the latest request.
    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Most recently issued request, kept for retry.
    pub fn latest_request(&self) -> Option<&FetchRequest> {
        self.latest.as_ref()
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "result_binder_tests.rs"]
mod tests;
