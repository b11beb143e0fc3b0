//! Page and page-size bookkeeping (pure).
//!
//! The server is authoritative for the total count; these functions keep the
//! current page consistent with it.
//!
//! # Conventions
//!
//! - Pages are 1-based
//! - `total_pages` is 0 when there are no items, but the selectable page range
//!   is still `[1, 1]`
//! - Item positions in `display_range` are 1-based and inclusive

use std::fmt;
use std::str::FromStr;

// ===== PageSize =====

/// Items-per-page choices offered by the selector.
pub const ALLOWED_PAGE_SIZES: [u32; 4] = [12, 24, 48, 96];

/// Number of items per page. Only values in [`ALLOWED_PAGE_SIZES`] exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageSize(u32);

impl PageSize {
    /// Smart constructor: None unless `n` is an allowed size.
    pub fn new(n: u32) -> Option<Self> {
        ALLOWED_PAGE_SIZES.contains(&n).then_some(Self(n))
    }

    /// Raw item count.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(ALLOWED_PAGE_SIZES[0])
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(PageSize::new)
            .ok_or_else(|| format!("Page size must be one of {ALLOWED_PAGE_SIZES:?}, got {s:?}"))
    }
}

// ===== Pure calculations =====

/// Number of pages needed for `total_items`. Zero when there are no items.
pub fn total_pages(total_items: u64, items_per_page: u32) -> u32 {
    if total_items == 0 || items_per_page == 0 {
        return 0;
    }
    let per_page = u64::from(items_per_page);
    let pages = total_items.div_ceil(per_page);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Selectable page range `(first, last)`. Never empty: at least `(1, 1)`.
pub fn page_bounds(total_items: u64, items_per_page: u32) -> (u32, u32) {
    (1, total_pages(total_items, items_per_page).max(1))
}

/// Clamp `page` into the selectable range.
pub fn clamp_page(page: u32, total_items: u64, items_per_page: u32) -> u32 {
    let (first, last) = page_bounds(total_items, items_per_page);
    page.clamp(first, last)
}

/// 1-based inclusive item range shown on `current_page`.
///
/// `(0, 0)` when there are no items. An out-of-range page is clamped first.
pub fn display_range(current_page: u32, items_per_page: u32, total_items: u64) -> (u64, u64) {
    if total_items == 0 || items_per_page == 0 {
        return (0, 0);
    }
    let page = u64::from(clamp_page(current_page, total_items, items_per_page));
    let per_page = u64::from(items_per_page);
    let start = (page - 1) * per_page + 1;
    let end = (page * per_page).min(total_items);
    (start, end)
}

/// Page to show after a page-size change.
///
/// Keeps the first item that was visible under the old size visible under the
/// new one, clamped to the selectable range.
pub fn reconcile_page(
    current_page: u32,
    old_items_per_page: u32,
    new_items_per_page: u32,
    total_items: u64,
) -> u32 {
    if new_items_per_page == 0 {
        return 1;
    }
    let first_visible = u64::from(current_page.max(1) - 1) * u64::from(old_items_per_page) + 1;
    let page = (first_visible - 1) / u64::from(new_items_per_page) + 1;
    let page = u32::try_from(page).unwrap_or(u32::MAX);
    clamp_page(page, total_items, new_items_per_page)
}

// ===== PageState =====

/// Current page, page size and last known total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: u32,
    page_size: PageSize,
    total_items: u64,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl PageState {
    /// Page 1 of an empty result.
    pub fn new(page_size: PageSize) -> Self {
        Self {
            current_page: 1,
            page_size,
            total_items: 0,
        }
    }

    /// 1-based current page.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Selected page size.
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Selected page size as a number.
    pub fn items_per_page(&self) -> u32 {
        self.page_size.get()
    }

    /// Last known total.
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Pages needed for the known total.
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_items, self.items_per_page())
    }

    /// "Showing X-Y" bounds for the current page.
    pub fn display_range(&self) -> (u64, u64) {
        display_range(self.current_page, self.items_per_page(), self.total_items)
    }

    /// Selectable page range.
    pub fn bounds(&self) -> (u32, u32) {
        page_bounds(self.total_items, self.items_per_page())
    }

    /// Move to `page`, clamped. Returns whether the page changed.
    pub fn go_to(&mut self, page: u32) -> bool {
        let target = clamp_page(page, self.total_items, self.items_per_page());
        let changed = target != self.current_page;
        self.current_page = target;
        changed
    }

    /// Change the page size, reconciling the current page.
    /// Returns whether anything changed.
    pub fn set_page_size(&mut self, page_size: PageSize) -> bool {
        if page_size == self.page_size {
            return false;
        }
        self.current_page = reconcile_page(
            self.current_page,
            self.items_per_page(),
            page_size.get(),
            self.total_items,
        );
        self.page_size = page_size;
        true
    }

    /// Back to page 1 (query changed).
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Record the server's total.
    ///
    /// Returns true when the current page no longer exists and was clamped.
    pub fn set_total(&mut self, total_items: u64) -> bool {
        self.total_items = total_items;
        let clamped = clamp_page(self.current_page, total_items, self.items_per_page());
        let moved = clamped != self.current_page;
        self.current_page = clamped;
        moved
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
