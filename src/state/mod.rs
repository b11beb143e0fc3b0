//! Catalog state machine (pure).
//!
//! All state transitions are pure functions of an action and the current
//! instant, testable without a network or a clock.

pub mod catalog_state;
pub mod debounce;
pub mod filter_store;
pub mod pagination;
pub mod result_binder;

// Re-export for convenience
pub use catalog_state::{CatalogSettings, CatalogSnapshot, CatalogState};
pub use debounce::{Debouncer, DEFAULT_SEARCH_DEBOUNCE};
pub use filter_store::{FilterOutcome, FilterStore};
pub use pagination::{PageSize, PageState, ALLOWED_PAGE_SIZES};
pub use result_binder::{Resolution, ResultBinder, ResultSet};
