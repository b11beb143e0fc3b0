//! Canonical catalog query derived from filter state.
//!
//! `to_query` is a pure function: the same `FilterState` always yields the same
//! `Query`, with parameters in a fixed order.

use crate::model::filter::FilterState;

/// Request parameter names, bit-compatible with the catalog API.
pub mod param {
    /// Free-text search.
    pub const SEARCH: &str = "search";
    /// Category name.
    pub const CATEGORY: &str = "category";
    /// Lower price bound.
    pub const MIN_PRICE: &str = "minPrice";
    /// Upper price bound.
    pub const MAX_PRICE: &str = "maxPrice";
    /// `true` or `false`; absent means any.
    pub const IN_STOCK: &str = "inStock";
    /// Sort key.
    pub const SORT_BY: &str = "sortBy";
    /// Sort direction.
    pub const SORT_ORDER: &str = "sortOrder";
    /// 1-based page number.
    pub const PAGE: &str = "page";
    /// Items per page.
    pub const LIMIT: &str = "limit";
}

/// Serialized form of a `FilterState`, restricted to non-empty fields.
///
/// `sortBy` and `sortOrder` are always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    params: Vec<(&'static str, String)>,
}

impl Query {
    /// Parameters in canonical order.
    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// Look up a parameter value by wire name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Full request parameters: the query followed by `page` and `limit`.
    pub fn with_page(&self, page: u32, limit: u32) -> Vec<(&'static str, String)> {
        let mut params = self.params.clone();
        params.push((param::PAGE, page.to_string()));
        params.push((param::LIMIT, limit.to_string()));
        params
    }
}

/// Map filter state to its canonical query.
///
/// Empty strings, unset prices and an unset stock filter are omitted.
/// Strings are passed through unmodified.
pub fn to_query(state: &FilterState) -> Query {
    let mut params = Vec::with_capacity(7);

    if !state.search.is_empty() {
        params.push((param::SEARCH, state.search.clone()));
    }
    if !state.category.is_empty() {
        params.push((param::CATEGORY, state.category.clone()));
    }
    if let Some(min) = state.min_price {
        params.push((param::MIN_PRICE, min.to_string()));
    }
    if let Some(max) = state.max_price {
        params.push((param::MAX_PRICE, max.to_string()));
    }
    if let Some(stock) = state.in_stock.as_query_value() {
        params.push((param::IN_STOCK, stock.to_string()));
    }
    params.push((param::SORT_BY, state.sort_by.as_str().to_string()));
    params.push((param::SORT_ORDER, state.sort_order.as_str().to_string()));

    Query { params }
}
