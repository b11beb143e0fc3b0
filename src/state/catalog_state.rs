//! Catalog state and transitions.
//!
//! `CatalogState` is the root state container. It owns the filter store, page
//! state and result binder, and is mutated only through [`CatalogState::update`]
//! following the Elm architecture: an action goes in, the state changes, and
//! the I/O the change requires comes back out as [`Effect`]s.
//!
//! # Fetch triggers
//!
//! - Filter change (immediate or debounced): page resets to 1, one fetch
//! - Page or page-size change: one fetch with the current query
//! - Response whose count removes the current page: page clamped, one fetch
//! - Retry after a failure: same parameters, new request id

use crate::model::catalog_action::{CatalogAction, Effect, FetchRequest};
use crate::model::error::{FetchError, FieldError};
use crate::model::filter::FilterState;
use crate::model::plant::{Plant, PlantDraft, PlantPage};
use crate::model::identifiers::RequestId;
use crate::state::debounce::DEFAULT_SEARCH_DEBOUNCE;
use crate::state::filter_store::{FilterOutcome, FilterStore};
use crate::state::pagination::{PageSize, PageState};
use crate::state::result_binder::{Resolution, ResultBinder, ResultSet};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

// ===== Settings =====

/// Construction-time settings, resolved from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSettings {
    /// Quiet period before a typed search propagates.
    pub search_debounce: Duration,
    /// Initial items per page.
    pub page_size: PageSize,
    /// Filters applied by the first fetch.
    pub initial_filters: FilterState,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
            page_size: PageSize::default(),
            initial_filters: FilterState::default(),
        }
    }
}

// ===== Snapshot =====

/// Read-only view of everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    /// Filters as shown in the inputs.
    pub filters: FilterState,
    /// Whether "clear filters" should be offered.
    pub has_active_filters: bool,
    /// Search text waiting on the debounce.
    pub pending_search: Option<String>,
    /// Rejected filter inputs.
    pub filter_errors: Vec<FieldError>,
    /// Current page and page size.
    pub page: PageState,
    /// 1-based "showing X-Y" bounds; `(0, 0)` when empty.
    pub display_range: (u64, u64),
    /// Items currently bound.
    pub items: Vec<Plant>,
    /// Total matches across pages.
    pub count: u64,
    /// A listing request is outstanding.
    pub loading: bool,
    /// Last listing failure, as shown to the user.
    pub error: Option<String>,
    /// Known category names.
    pub categories: Vec<String>,
    /// Add-plant validation failures.
    pub form_errors: Vec<FieldError>,
    /// A create request is outstanding.
    pub creating: bool,
    /// Last create failure.
    pub create_error: Option<String>,
}

// ===== CatalogState =====

/// Root container for the catalog screen.
///
/// Every change goes through [`CatalogState::update`], which returns the I/O
/// the caller must perform.
#[derive(Debug, Clone)]
pub struct CatalogState {
    filters: FilterStore,
    pages: PageState,
    binder: ResultBinder,
    categories: Vec<String>,
    started: bool,
    torn_down: bool,
    form_errors: Vec<FieldError>,
    creating: bool,
    create_error: Option<String>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(CatalogSettings::default())
    }
}

impl CatalogState {
    /// Fresh state; nothing is fetched until `Start`.
    pub fn new(settings: CatalogSettings) -> Self {
        Self {
            filters: FilterStore::with_state(settings.initial_filters, settings.search_debounce),
            pages: PageState::new(settings.page_size),
            binder: ResultBinder::new(),
            categories: Vec::new(),
            started: false,
            torn_down: false,
            form_errors: Vec::new(),
            creating: false,
            create_error: None,
        }
    }

    /// Apply one action at time `now` and return the I/O it requires.
    pub fn update(&mut self, action: CatalogAction, now: Instant) -> Vec<Effect> {
        if self.torn_down {
            debug!(?action, "action after teardown ignored");
            return Vec::new();
        }

        match action {
            CatalogAction::Start => self.start(),
            CatalogAction::Teardown => {
                if let Some(id) = self.filters.cancel_pending() {
                    debug!(timer = %id, "pending search cancelled on teardown");
                }
                self.torn_down = true;
                Vec::new()
            }
            CatalogAction::Tick => {
                let outcome = self.filters.tick(now);
                self.after_filter_change(outcome)
            }
            CatalogAction::EditFilter(edit) => {
                let outcome = self.filters.set_field(edit, now);
                self.after_filter_change(outcome)
            }
            CatalogAction::SubmitSearch => {
                let outcome = self.filters.submit_search();
                self.after_filter_change(outcome)
            }
            CatalogAction::ClearFilters => {
                let outcome = self.filters.clear();
                self.after_filter_change(outcome)
            }
            CatalogAction::GoToPage(page) => {
                if self.pages.go_to(page) {
                    vec![self.fetch_current()]
                } else {
                    Vec::new()
                }
            }
            CatalogAction::SetPageSize(size) => {
                if self.pages.set_page_size(size) {
                    vec![self.fetch_current()]
                } else {
                    Vec::new()
                }
            }
            CatalogAction::FetchCompleted { id, outcome } => self.on_fetch_completed(id, outcome),
            CatalogAction::Retry => self
                .binder
                .retry()
                .map(Effect::FetchPlants)
                .into_iter()
                .collect(),
            CatalogAction::CategoriesLoaded(result) => {
                self.on_categories_loaded(result);
                Vec::new()
            }
            CatalogAction::SubmitPlant(draft) => self.submit_plant(draft),
            CatalogAction::PlantCreated(result) => {
                self.on_plant_created(result);
                Vec::new()
            }
        }
    }

    /// When the runtime must next dispatch `Tick`.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.filters.next_deadline()
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> CatalogSnapshot {
        let result = self.binder.result();
        CatalogSnapshot {
            filters: self.filters.state().clone(),
            has_active_filters: self.filters.has_active_filters(),
            pending_search: self.filters.pending_search().map(str::to_string),
            filter_errors: self.filters.field_errors(),
            page: self.pages,
            display_range: self.pages.display_range(),
            items: result.items().to_vec(),
            count: result.count(),
            loading: self.binder.is_loading(),
            error: self.binder.error().map(FetchError::user_message),
            categories: self.categories.clone(),
            form_errors: self.form_errors.clone(),
            creating: self.creating,
            create_error: self.create_error.clone(),
        }
    }

    // ===== Accessors =====

    /// Filter store.
    pub fn filters(&self) -> &FilterStore {
        &self.filters
    }

    /// Page state.
    pub fn pages(&self) -> &PageState {
        &self.pages
    }

    /// Currently bound results.
    pub fn results(&self) -> &ResultSet {
        self.binder.result()
    }

    /// A listing request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.binder.is_loading()
    }

    /// Last listing failure.
    pub fn error(&self) -> Option<&FetchError> {
        self.binder.error()
    }

    /// Known category names.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// `Teardown` has been dispatched.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // ===== Transitions =====

    fn start(&mut self) -> Vec<Effect> {
        if self.started {
            return Vec::new();
        }
        self.started = true;
        vec![self.fetch_current(), Effect::FetchCategories]
    }

    fn after_filter_change(&mut self, outcome: FilterOutcome) -> Vec<Effect> {
        match outcome {
            FilterOutcome::Applied => {
                self.pages.reset();
                vec![self.fetch_current()]
            }
            FilterOutcome::Rejected(err) => {
                debug!(error = %err, "filter edit rejected");
                Vec::new()
            }
            FilterOutcome::Staged(_) | FilterOutcome::Unchanged => Vec::new(),
        }
    }

    fn fetch_current(&mut self) -> Effect {
        let request: FetchRequest = self.binder.issue(self.filters.query(), &self.pages);
        Effect::FetchPlants(request)
    }

    fn on_fetch_completed(
        &mut self,
        id: RequestId,
        outcome: Result<PlantPage, FetchError>,
    ) -> Vec<Effect> {
        match self.binder.resolve(id, outcome) {
            Resolution::Applied => {
                let count = self.binder.result().count();
                if self.pages.set_total(count) {
                    info!(
                        page = self.pages.current_page(),
                        count, "current page no longer exists, refetching"
                    );
                    vec![self.fetch_current()]
                } else {
                    Vec::new()
                }
            }
            Resolution::Failed | Resolution::Discarded => Vec::new(),
        }
    }

    fn on_categories_loaded(&mut self, result: Result<Vec<String>, FetchError>) {
        match result {
            Ok(categories) => {
                info!(count = categories.len(), "categories loaded");
                self.categories = categories;
            }
            Err(err) => warn!(error = %err, "failed to load categories"),
        }
    }

    fn submit_plant(&mut self, draft: PlantDraft) -> Vec<Effect> {
        if self.creating {
            debug!("create already in flight");
            return Vec::new();
        }
        match draft.validate() {
            Ok(payload) => {
                self.form_errors.clear();
                self.create_error = None;
                self.creating = true;
                vec![Effect::CreatePlant(payload)]
            }
            Err(errors) => {
                debug!(errors = errors.len(), "plant draft rejected");
                self.form_errors = errors;
                Vec::new()
            }
        }
    }

    fn on_plant_created(&mut self, result: Result<Plant, FetchError>) {
        self.creating = false;
        match result {
            Ok(plant) => {
                info!(id = %plant.id, name = %plant.name, "plant created");
                self.binder.append_created(plant);
                self.pages.set_total(self.binder.result().count());
            }
            Err(err) => {
                warn!(error = %err, "failed to create plant");
                self.create_error = Some(err.user_message());
            }
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "catalog_state_tests.rs"]
mod tests;
