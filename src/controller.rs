//! Catalog controller - the single owner of catalog, view state and status.
//!
//! All mutation goes through named events (`set_filter`, `set_search_term`,
//! `request_more`, the load methods). After each event the view layer reads
//! [`CatalogController::view`] and re-renders.
//!
//! Loading is split into [`begin_load`](CatalogController::begin_load) and
//! [`finish_load`](CatalogController::finish_load) so a host can drive the
//! fetch future itself; [`load`](CatalogController::load) does both. If the
//! `load` future is dropped before it completes, the controller returns to
//! the status it had before the load started.

use crate::data::{
    Catalog, CatalogStore, DataError, DataResult, LoadOutcome, SourceFetcher, SourceSkip,
    SourceSpec, load_catalog,
};
use crate::constants::SLOW_QUERY_MS;
use crate::perf::QueryMonitor;
use crate::settings::CatalogSettings;
use crate::types::{ChipRecord, FamilyFilter, Status};
use crate::view_model::{ChipCard, ChipDetail};
use crate::view_state::{ViewState, compute_visible, count_matches, format_result_count};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// What the view layer renders after an event
#[derive(Clone, Debug)]
pub struct CatalogView<'a> {
    pub records: Vec<&'a ChipRecord>,
    pub has_more: bool,
    pub total_matches: usize,
    pub status: Status,
}

impl CatalogView<'_> {
    /// Cards for the visible records
    pub fn cards(&self) -> Vec<ChipCard> {
        self.records.iter().map(|r| ChipCard::from_record(r)).collect()
    }

    /// e.g. "42 chips"
    pub fn result_label(&self) -> String {
        format_result_count(self.total_matches)
    }
}

pub struct CatalogController {
    settings: CatalogSettings,
    store: CatalogStore,
    /// Snapshot taken from `store` when the last load finished
    catalog: Arc<Catalog>,
    state: ViewState,
    status: Status,
    /// Matches for the current filter/search, refreshed after every event
    total_matches: usize,
    last_error: Option<String>,
    skipped: Vec<SourceSkip>,
    monitor: QueryMonitor,
}

impl Default for CatalogController {
    fn default() -> Self {
        Self::new(CatalogSettings::default())
    }
}

impl CatalogController {
    pub fn new(settings: CatalogSettings) -> Self {
        let store = CatalogStore::new();
        let catalog = store.snapshot();
        Self {
            state: ViewState::new(settings.page_size),
            settings,
            store,
            catalog,
            status: Status::Idle,
            total_matches: 0,
            last_error: None,
            skipped: Vec::new(),
            monitor: QueryMonitor::new(),
        }
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Mark a load as started.
    ///
    /// Fails with [`DataError::LoadInFlight`] if one is already running.
    pub fn begin_load(&mut self) -> DataResult<()> {
        if self.status.is_loading() {
            return Err(DataError::LoadInFlight);
        }
        self.status = Status::Loading;
        self.last_error = None;
        debug!("Catalog load started");
        Ok(())
    }

    /// Publish the result of a load started with [`begin_load`](Self::begin_load).
    ///
    /// On success returns the number of records; on failure the catalog is
    /// emptied, the status becomes `Error` and the error is returned.
    pub fn finish_load(&mut self, result: DataResult<LoadOutcome>) -> DataResult<usize> {
        match result {
            Ok(outcome) => {
                self.skipped = outcome.skipped;
                self.catalog = self.store.publish(outcome.catalog);
                self.status = Status::Ready;
                self.state = ViewState::new(self.settings.page_size);
                self.refresh();
                info!(
                    records = self.catalog.len(),
                    skipped = self.skipped.len(),
                    "Catalog ready"
                );
                self.monitor.log_summary_if_slow(SLOW_QUERY_MS);
                Ok(self.catalog.len())
            }
            Err(err) => {
                error!(error = %err, "Catalog load failed");
                self.store.clear();
                self.catalog = self.store.snapshot();
                self.skipped.clear();
                self.status = Status::Error;
                self.total_matches = 0;
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Fetch, parse and publish the given sources.
    pub async fn load<F: SourceFetcher>(
        &mut self,
        fetcher: &F,
        sources: &[SourceSpec],
    ) -> DataResult<usize> {
        let previous = (self.status, self.last_error.clone());
        self.begin_load()?;
        let mut guard = LoadGuard {
            controller: self,
            previous: Some(previous),
        };

        let start = Instant::now();
        let result = load_catalog(fetcher, sources).await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        guard.previous = None;
        let controller = &mut *guard.controller;
        controller.monitor.record_operation("load_catalog", elapsed_ms);
        controller.finish_load(result)
    }

    /// Load the sources listed in the settings.
    pub async fn load_configured<F: SourceFetcher>(&mut self, fetcher: &F) -> DataResult<usize> {
        let sources = self.settings.sources.clone();
        self.load(fetcher, &sources).await
    }

    // ========================================================================
    // Events
    // ========================================================================

    pub fn set_filter(&mut self, filter: FamilyFilter) -> CatalogView<'_> {
        self.state.set_filter(filter);
        self.refresh();
        self.view()
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) -> CatalogView<'_> {
        self.state.set_search_term(term);
        self.refresh();
        self.view()
    }

    /// Show one more page. Ignored while loading or when nothing is left.
    pub fn request_more(&mut self) -> CatalogView<'_> {
        let has_more = self.total_matches > self.state.visible_count;
        if !self.state.request_more(has_more, self.status.is_loading()) {
            debug!(visible = self.state.visible_count, "request_more ignored");
        }
        self.view()
    }

    /// Recount matches and derive the status for a loaded catalog
    fn refresh(&mut self) {
        if !self.status.is_loaded() {
            return;
        }
        let catalog = &self.catalog;
        let state = &self.state;
        self.total_matches = self.monitor.time("count_matches", || count_matches(catalog, state));
        self.status = if self.total_matches == 0 {
            Status::EmptyResults
        } else {
            Status::Ready
        };
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Current slice, pagination flag and status
    pub fn view(&self) -> CatalogView<'_> {
        let visible = compute_visible(&self.catalog, &self.state);
        CatalogView {
            records: visible.records,
            has_more: visible.has_more,
            total_matches: visible.total_matches,
            status: self.status,
        }
    }

    pub fn get_record_by_key(&self, number: &str) -> DataResult<&ChipRecord> {
        self.catalog.get(number)
    }

    /// Detail view data for a chip
    pub fn detail(&self, number: &str) -> DataResult<ChipDetail> {
        let record = self.get_record_by_key(number)?;
        Ok(ChipDetail::from_record(record, &self.settings.image_root))
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Shared handle for readers outside the controller
    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    /// Message of the last failed load
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Rows the parser dropped during the last successful load
    pub fn skipped_rows(&self) -> &[SourceSkip] {
        &self.skipped
    }

    pub fn monitor(&self) -> &QueryMonitor {
        &self.monitor
    }
}

/// Restores the pre-load status if a `load` future is dropped mid-flight
struct LoadGuard<'a> {
    controller: &'a mut CatalogController,
    /// Cleared once the load has completed
    previous: Option<(Status, Option<String>)>,
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        if let Some((status, last_error)) = self.previous.take() {
            warn!(restored = ?status, "Catalog load cancelled before completion");
            self.controller.status = status;
            self.controller.last_error = last_error;
        }
    }
}
