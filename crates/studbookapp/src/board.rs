//! # Record Board
//!
//! The board is the single object a UI holds: it owns a [`RecordStore`], the
//! active [`RecordFilter`], and the derived state computed from them.
//!
//! ```text
//! RecordStore ──► RecordFilter ──► filtered records ──► RecordStats
//! ```
//!
//! Every mutation and every filter change runs a full, synchronous recompute of
//! the filtered view and the statistics. There is no dirty tracking and no
//! partial update, so `filtered()` and `stats()` are always consistent with the
//! store and filter as they are right now.
//!
//! ## Today
//!
//! Overdue and upcoming depend on the current date. By default the board reads
//! the UTC date at every recompute; [`RecordBoard::with_today`] pins it, which is
//! what tests and reproducible reports use.

use chrono::{NaiveDate, Utc};
use log::debug;

use crate::filter::{DateRange, RecordFilter};
use crate::model::{Priority, Record, RecordKind, RecordPatch, RecordStatus};
use crate::stats::{RecordStats, DEFAULT_UPCOMING_DAYS};
use crate::store::RecordStore;

#[derive(Debug, Clone)]
pub struct RecordBoard {
    store: RecordStore,
    filter: RecordFilter,
    window_days: u32,
    pinned_today: Option<NaiveDate>,
    filtered: Vec<Record>,
    stats: RecordStats,
}

impl Default for RecordBoard {
    fn default() -> Self {
        Self::new(RecordStore::new())
    }
}

impl RecordBoard {
    pub fn new(store: RecordStore) -> Self {
        let mut board = Self {
            store,
            filter: RecordFilter::default(),
            window_days: DEFAULT_UPCOMING_DAYS,
            pinned_today: None,
            filtered: Vec::new(),
            stats: RecordStats::default(),
        };
        board.refresh();
        board
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.pinned_today = Some(today);
        self.refresh();
        self
    }

    pub fn with_window_days(mut self, days: u32) -> Self {
        self.window_days = days;
        self.refresh();
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.pinned_today
            .unwrap_or_else(|| Utc::now().date_naive())
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Swap the store back to an earlier snapshot and recompute.
    pub fn restore_store(&mut self, store: RecordStore) {
        self.store = store;
        self.refresh();
    }

    pub fn filter(&self) -> &RecordFilter {
        &self.filter
    }

    /// Records passing the active filter, in store order.
    pub fn filtered(&self) -> &[Record] {
        &self.filtered
    }

    /// Statistics over [`RecordBoard::filtered`].
    pub fn stats(&self) -> &RecordStats {
        &self.stats
    }

    // --- Store operations ---

    pub fn add_record(&mut self, record: Record) {
        self.store.add(record);
        self.refresh();
    }

    pub fn update_record(&mut self, id: &str, patch: RecordPatch) -> bool {
        let changed = self.store.update(id, patch);
        self.refresh();
        changed
    }

    pub fn delete_record(&mut self, id: &str) -> bool {
        let removed = self.store.delete(id);
        self.refresh();
        removed
    }

    pub fn get_record(&self, id: &str) -> Option<&Record> {
        self.store.get(id)
    }

    pub fn records_by_type(&self, kind: RecordKind) -> Vec<Record> {
        self.store.by_type(kind)
    }

    pub fn records_by_horse(&self, horse_id: &str) -> Vec<Record> {
        self.store.by_horse(horse_id)
    }

    pub fn overdue_records(&self) -> Vec<Record> {
        self.store.overdue(self.today())
    }

    /// Records scheduled within `days` of today; `None` uses the board's window.
    pub fn upcoming_records(&self, days: Option<u32>) -> Vec<Record> {
        self.store
            .upcoming(self.today(), days.unwrap_or(self.window_days))
    }

    // --- Filter setters ---

    pub fn set_filter(&mut self, filter: RecordFilter) {
        self.filter = filter;
        self.refresh();
    }

    pub fn set_search(&mut self, term: Option<String>) {
        self.filter.search = term;
        self.refresh();
    }

    pub fn set_types(&mut self, types: Vec<RecordKind>) {
        self.filter.types = types;
        self.refresh();
    }

    pub fn set_statuses(&mut self, statuses: Vec<RecordStatus>) {
        self.filter.statuses = statuses;
        self.refresh();
    }

    pub fn set_priorities(&mut self, priorities: Vec<Priority>) {
        self.filter.priorities = priorities;
        self.refresh();
    }

    pub fn set_horse(&mut self, horse_id: Option<String>) {
        self.filter.horse_id = horse_id;
        self.refresh();
    }

    pub fn set_veterinarian(&mut self, name: Option<String>) {
        self.filter.veterinarian = name;
        self.refresh();
    }

    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.filter.date_range = range;
        self.refresh();
    }

    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.filter.tags = tags;
        self.refresh();
    }

    pub fn clear_filters(&mut self) {
        self.set_filter(RecordFilter::default());
    }

    fn refresh(&mut self) {
        let today = self.today();
        self.filtered = self.filter.apply(self.store.records());
        self.stats = RecordStats::compute(&self.filtered, today, self.window_days);
        debug!(
            "board: {} of {} records visible, {} overdue, {} upcoming",
            self.stats.total,
            self.store.len(),
            self.stats.overdue,
            self.stats.upcoming
        );
    }
}
