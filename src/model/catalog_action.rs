//! Domain-level catalog actions and the effects they request.
//!
//! Actions represent user intent or I/O completions; effects are the I/O the
//! runtime must perform. Neither depends on how input is collected.

use crate::model::error::FetchError;
use crate::model::filter::FilterEdit;
use crate::model::identifiers::RequestId;
use crate::model::plant::{NewPlant, Plant, PlantDraft, PlantPage};
use crate::model::query::Query;
use crate::state::pagination::PageSize;

/// Messages accepted by `CatalogState::update`.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    // Lifecycle
    /// Session start: load the first page and the category list.
    Start,
    /// Owner is going away: cancel pending timers.
    Teardown,
    /// Clock advanced; fire any due debounce.
    Tick,

    // Filters
    /// Edit one filter field.
    EditFilter(FilterEdit),
    /// Explicit search submit (Enter / Search button): skip the debounce wait.
    SubmitSearch,
    /// Reset every filter to its default.
    ClearFilters,

    // Pagination
    /// Jump to a 1-based page number.
    GoToPage(u32),
    /// Change the number of items per page.
    SetPageSize(PageSize),

    // Results
    /// A plants fetch settled.
    FetchCompleted {
        /// Request the response belongs to.
        id: RequestId,
        /// Page or failure.
        outcome: Result<PlantPage, FetchError>,
    },
    /// Re-issue the last fetch after an error.
    Retry,
    /// The one-time category list fetch settled.
    CategoriesLoaded(Result<Vec<String>, FetchError>),

    // Add plant
    /// Validate and submit the add-plant form.
    SubmitPlant(PlantDraft),
    /// The create request settled.
    PlantCreated(Result<Plant, FetchError>),
}

/// One catalog page request, tagged with the id that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Tag checked on arrival; only the latest id is bound.
    pub id: RequestId,
    /// Filter parameters in canonical order.
    pub query: Query,
    /// 1-based page number.
    pub page: u32,
    /// Items per page.
    pub limit: u32,
}

impl FetchRequest {
    /// Full `GET /api/plants` parameters.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        self.query.with_page(self.page, self.limit)
    }
}

/// I/O requested by a state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// `GET /api/plants` with the request's parameters.
    FetchPlants(FetchRequest),
    /// `GET /api/plants/categories/all`.
    FetchCategories,
    /// `POST /api/plants`.
    CreatePlant(NewPlant),
}

impl Effect {
    /// The fetch request carried by this effect, if any.
    pub fn as_fetch(&self) -> Option<&FetchRequest> {
        match self {
            Effect::FetchPlants(request) => Some(request),
            _ => None,
        }
    }
}
