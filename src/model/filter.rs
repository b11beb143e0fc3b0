//! Filter, sort and search values for the catalog listing.
//!
//! `FilterState` is pure data. Edits arrive as [`FilterEdit`] messages and are
//! applied by the filter store (`crate::state::filter_store`).

use std::fmt;
use std::str::FromStr;

// ===== Price =====

/// A validated price filter bound. Never negative, never NaN/infinite.
/// Smart constructor enforces the invariant.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    /// Smart constructor for an already-numeric value.
    /// Returns None for negative or non-finite values.
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && value >= 0.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Parse raw input from a price field.
    ///
    /// Empty or whitespace-only input means "no bound" and yields `Ok(None)`.
    /// Non-numeric or negative input yields `Err` with the field message.
    pub fn parse_input(raw: &str) -> Result<Option<Self>, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let value: f64 = trimmed
            .parse()
            .map_err(|_| "Price must be a number".to_string())?;
        Price::new(value)
            .map(Some)
            .ok_or_else(|| "Price must be a positive number".to_string())
    }

    /// The validated amount.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Price {
    /// Numeric string form: integral values print without a fractional part.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ===== StockFilter =====

/// Tri-state stock availability filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StockFilter {
    /// No stock constraint.
    #[default]
    Any,
    /// Only plants with stock > 0.
    InStock,
    /// Only plants with stock == 0.
    OutOfStock,
}

impl StockFilter {
    /// Query value, or None when the filter is unset.
    pub fn as_query_value(&self) -> Option<&'static str> {
        match self {
            StockFilter::Any => None,
            StockFilter::InStock => Some("true"),
            StockFilter::OutOfStock => Some("false"),
        }
    }
}

impl FromStr for StockFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "any" | "all" => Ok(StockFilter::Any),
            "in" | "true" | "in-stock" => Ok(StockFilter::InStock),
            "out" | "false" | "out-of-stock" => Ok(StockFilter::OutOfStock),
            other => Err(format!("Unknown stock filter: {other}")),
        }
    }
}

// ===== SortBy / SortOrder =====

/// Sort key understood by the catalog API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortBy {
    /// Alphabetical by name.
    #[default]
    Name,
    /// By price.
    Price,
    /// By units in stock.
    Stock,
    /// By creation date.
    CreatedAt,
}

impl SortBy {
    /// Wire value for `sortBy`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Name => "name",
            SortBy::Price => "price",
            SortBy::Stock => "stock",
            SortBy::CreatedAt => "createdAt",
        }
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(SortBy::Name),
            "price" => Ok(SortBy::Price),
            "stock" => Ok(SortBy::Stock),
            "createdAt" | "created" | "date" => Ok(SortBy::CreatedAt),
            other => Err(format!("Unknown sort field: {other}")),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Wire value for `sortOrder`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("Unknown sort order: {other}")),
        }
    }
}

// ===== FilterState =====

/// Current search, filter and sort values.
///
/// `Default` is the cleared state: everything empty, sorted by name ascending.
/// `min_price <= max_price` is not enforced here; the server decides.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    /// Free-text search, as typed.
    pub search: String,
    /// Selected category. Empty means all categories.
    pub category: String,
    /// Lower price bound, inclusive.
    pub min_price: Option<Price>,
    /// Upper price bound, inclusive.
    pub max_price: Option<Price>,
    /// Stock availability filter.
    pub in_stock: StockFilter,
    /// Sort key.
    pub sort_by: SortBy,
    /// Sort direction.
    pub sort_order: SortOrder,
}

impl FilterState {
    /// True iff every field equals the cleared state.
    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }
}

// ===== FilterEdit =====

/// A single user edit to one filter field.
///
/// Price edits carry the raw input text; validation happens in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEdit {
    /// Search text, debounced.
    Search(String),
    /// Category name; empty clears it.
    Category(String),
    /// Raw minimum price input; empty clears it.
    MinPrice(String),
    /// Raw maximum price input; empty clears it.
    MaxPrice(String),
    /// Stock availability.
    InStock(StockFilter),
    /// Sort key.
    SortBy(SortBy),
    /// Sort direction.
    SortOrder(SortOrder),
}

impl FilterEdit {
    /// Whether this edit goes through the search debounce.
    pub fn is_debounced(&self) -> bool {
        matches!(self, FilterEdit::Search(_))
    }
}
