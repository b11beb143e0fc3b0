//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod catalog_action;
pub mod error;
pub mod filter;
pub mod identifiers;
pub mod plant;
pub mod query;

// Re-export for convenience
pub use catalog_action::{CatalogAction, Effect, FetchRequest};
pub use error::{AppError, FetchError, FieldError, FieldName};
pub use filter::{FilterEdit, FilterState, Price, SortBy, SortOrder, StockFilter};
pub use identifiers::{RequestId, TimerId};
pub use plant::{CareLevel, NewPlant, Plant, PlantDraft, PlantPage, PlantSize, StockStatus};
pub use query::{to_query, Query};
