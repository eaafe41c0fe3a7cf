//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every studbook operation, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the [`RecordBoard`] and a [`SnapshotBackend`]
//! - **Dispatches** to the appropriate command function
//! - **Persists** the store after every command that changed it, rolling the
//!   board back when the save fails so memory never holds unsaved changes
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **Presentation**: returns data structures, not strings
//!
//! ## Generic Over SnapshotBackend
//!
//! `StudbookApi<B: SnapshotBackend>`:
//! - Production: `StudbookApi<FsBackend>`
//! - Testing: `StudbookApi<MemBackend>`
//!
//! API tests verify dispatch and persistence, not command logic.

use chrono::NaiveDate;
use log::{debug, warn};

use crate::board::RecordBoard;
use crate::commands::{self, CmdResult, ListQuery};
use crate::error::Result;
use crate::filter::RecordFilter;
use crate::forms::RecordDraft;
use crate::model::RecordPatch;
use crate::store::backend::SnapshotBackend;
use crate::store::RecordStore;

pub use crate::commands::{CmdMessage, MessageLevel};

pub struct StudbookApi<B: SnapshotBackend> {
    board: RecordBoard,
    backend: B,
}

impl<B: SnapshotBackend> StudbookApi<B> {
    /// Load the backend's records into a fresh board.
    pub fn open(backend: B) -> Result<Self> {
        let records = backend.load()?;
        debug!(
            "api: opened {} with {} records",
            backend.location().display(),
            records.len()
        );
        Ok(Self {
            board: RecordBoard::new(RecordStore::from_records(records)),
            backend,
        })
    }

    pub fn with_window_days(mut self, days: u32) -> Self {
        self.board = self.board.with_window_days(days);
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.board = self.board.with_today(today);
        self
    }

    pub fn board(&self) -> &RecordBoard {
        &self.board
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn create_record(&mut self, draft: &RecordDraft) -> Result<CmdResult> {
        self.mutate(|board| commands::create::run(board, draft))
    }

    pub fn update_record(&mut self, id: &str, patch: RecordPatch) -> Result<CmdResult> {
        self.mutate(|board| commands::update::run(board, id, patch))
    }

    pub fn complete_record(&mut self, id: &str) -> Result<CmdResult> {
        self.mutate(|board| commands::update::complete(board, id))
    }

    pub fn delete_record(&mut self, id: &str) -> Result<CmdResult> {
        self.mutate(|board| commands::delete::run(board, id))
    }

    pub fn show_record(&self, id: &str) -> Result<CmdResult> {
        commands::get::show(&self.board, id)
    }

    pub fn list_records(&mut self, query: &ListQuery) -> Result<CmdResult> {
        commands::get::list(&mut self.board, query)
    }

    pub fn horse_records(&self, horse_id: &str) -> Result<CmdResult> {
        commands::get::by_horse(&self.board, horse_id)
    }

    pub fn overdue_records(&self) -> Result<CmdResult> {
        commands::due::overdue(&self.board)
    }

    pub fn upcoming_records(&self, days: Option<u32>) -> Result<CmdResult> {
        commands::due::upcoming(&self.board, days)
    }

    pub fn stats(&mut self, filter: RecordFilter) -> Result<CmdResult> {
        commands::stats::run(&mut self.board, filter)
    }

    fn mutate<F>(&mut self, command: F) -> Result<CmdResult>
    where
        F: FnOnce(&mut RecordBoard) -> Result<CmdResult>,
    {
        let snapshot = self.board.store().clone();
        let result = command(&mut self.board)?;
        if result.is_modification() {
            if let Err(err) = self.backend.save(self.board.store().records()) {
                warn!("api: save failed, rolling back: {}", err);
                self.board.restore_store(snapshot);
                return Err(err);
            }
        }
        Ok(result)
    }
}
