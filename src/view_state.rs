//! View state for the chip card list.
//!
//! Features:
//! - Family filter and free-text search
//! - Incremental "load more" pagination over the filtered result
//! - Pure [`compute_visible`] so the view can re-render idempotently
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut state = ViewState::new(DEFAULT_PAGE_SIZE);
//! state.set_filter(FamilyFilter::Cmos);
//! let visible = compute_visible(&catalog, &state);
//! if visible.has_more {
//!     state.request_more(visible.has_more, false);
//! }
//! ```

use crate::constants::{DEFAULT_PAGE_SIZE, SLOW_QUERY_MS};
use crate::data::Catalog;
use crate::profile_scope;
use crate::types::{ChipRecord, FamilyFilter};
use serde::Serialize;

/// Filter, search term and pagination cursor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub filter: FamilyFilter,
    /// Search text as typed; folded only when matching
    pub search_term: String,
    /// Number of matching records currently shown
    pub visible_count: usize,
    /// Records added per "load more" request
    pub page_size: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ViewState {
    /// Defaults: all families, empty search, one page visible.
    ///
    /// A zero page size is bumped to one so pagination always advances.
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            filter: FamilyFilter::All,
            search_term: String::new(),
            visible_count: page_size,
            page_size,
        }
    }

    /// Change the family filter and go back to the first page
    pub fn set_filter(&mut self, filter: FamilyFilter) {
        self.filter = filter;
        self.reset_pagination();
    }

    /// Change the search text and go back to the first page
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.reset_pagination();
    }

    /// Show one more page.
    ///
    /// No-op when nothing more matches or a load is in flight. Returns
    /// whether the cursor moved.
    pub fn request_more(&mut self, has_more: bool, load_in_flight: bool) -> bool {
        if !has_more || load_in_flight {
            return false;
        }
        self.visible_count = self.visible_count.saturating_add(self.page_size);
        true
    }

    pub fn reset_pagination(&mut self) {
        self.visible_count = self.page_size;
    }

    /// Search term lowercased for matching
    pub fn folded_term(&self) -> String {
        self.search_term.to_lowercase()
    }

    /// Whether a record passes both the family filter and the search term.
    pub fn matches(&self, record: &ChipRecord, folded_term: &str) -> bool {
        self.filter.matches(record.family) && record.matches_term(folded_term)
    }

    /// Pages currently materialized
    pub fn pages_shown(&self) -> usize {
        self.visible_count.div_ceil(self.page_size)
    }
}

/// The records to render plus pagination info.
#[derive(Clone, Debug)]
pub struct VisibleSlice<'a> {
    /// Matching records in catalog order, at most `visible_count` of them
    pub records: Vec<&'a ChipRecord>,
    /// Whether more matching records exist beyond the slice
    pub has_more: bool,
    /// Size of the full filtered/searched result
    pub total_matches: usize,
}

impl VisibleSlice<'_> {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Apply filter, search and pagination to the catalog.
///
/// Never reorders: the slice follows catalog order. A cursor past the end
/// of the result is clamped.
pub fn compute_visible<'a>(catalog: &'a Catalog, state: &ViewState) -> VisibleSlice<'a> {
    profile_scope!("compute_visible", SLOW_QUERY_MS);
    let folded = state.folded_term();

    let mut records = Vec::with_capacity(state.visible_count.min(catalog.len()));
    let mut total_matches = 0;
    for record in catalog.records() {
        if state.matches(record, &folded) {
            if total_matches < state.visible_count {
                records.push(record);
            }
            total_matches += 1;
        }
    }

    VisibleSlice {
        records,
        has_more: total_matches > state.visible_count,
        total_matches,
    }
}

/// Count matching records without materializing a slice
pub fn count_matches(catalog: &Catalog, state: &ViewState) -> usize {
    let folded = state.folded_term();
    catalog
        .records()
        .iter()
        .filter(|record| state.matches(record, &folded))
        .count()
}

/// Format a result count (e.g., "1 chip", "1.2K chips")
pub fn format_result_count(count: usize) -> String {
    let formatted = if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    };

    if count == 1 {
        format!("{} chip", formatted)
    } else {
        format!("{} chips", formatted)
    }
}
