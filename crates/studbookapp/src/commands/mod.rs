//! # Command Layer
//!
//! This module contains the business operations of studbook. Each command lives
//! in its own submodule as plain functions over a
//! [`RecordBoard`](crate::board::RecordBoard).
//!
//! ## Role and Responsibilities
//!
//! Commands:
//! - Implement each operation on top of the board (store + filter + stats)
//! - Turn form drafts into records, reporting validation failures as errors
//! - Return a structured [`CmdResult`] with affected/listed records and messages
//! - Are completely UI-agnostic
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O**: no stdout, stderr, or file formatting
//! - **Persistence**: saving snapshots is the API facade's job
//! - **Argument parsing**: that's the CLI layer's job
//!
//! ## Unknown Ids
//!
//! Updating, completing or deleting an id that is not in the store is not an
//! error. The store ignores it and the command adds a warning message. Only
//! `show`, which must return a record, fails with
//! [`StudbookError::RecordNotFound`](crate::error::StudbookError::RecordNotFound).
//!
//! ## Command Modules
//!
//! - [`create`]: Validate a draft and add the record
//! - [`update`]: Partial updates and completion
//! - [`delete`]: Remove records
//! - [`get`]: Show one record, list with filters and sorting, records per horse
//! - [`due`]: Overdue and upcoming records
//! - [`stats`]: Statistics over a filtered view

use crate::filter::RecordFilter;
use crate::model::Record;
use crate::sort::SortKey;
use crate::stats::RecordStats;
use serde::Serialize;

pub mod create;
pub mod delete;
pub mod due;
pub mod get;
pub mod stats;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    /// Records created or modified by the command, post-operation.
    pub affected_records: Vec<Record>,
    /// Records to display.
    pub listed_records: Vec<Record>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<RecordStats>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<Record>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<Record>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_stats(mut self, stats: RecordStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// True when the command changed the store.
    pub fn is_modification(&self) -> bool {
        !self.affected_records.is_empty()
    }
}

/// What to list and in which order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub filter: RecordFilter,
    /// `None` keeps store order.
    pub sort: Option<SortKey>,
}

impl ListQuery {
    pub fn new(filter: RecordFilter) -> Self {
        Self { filter, sort: None }
    }

    pub fn sorted_by(mut self, key: SortKey) -> Self {
        self.sort = Some(key);
        self
    }
}

pub(crate) fn not_found_warning(id: &str) -> CmdMessage {
    CmdMessage::warning(format!("No record with id {}", id))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::board::RecordBoard;
    use crate::model::HorseRef;
    use crate::store::fixtures::StoreFixture;

    pub fn bella() -> HorseRef {
        HorseRef::new("h-bella", "Bella")
    }

    pub fn comet() -> HorseRef {
        HorseRef::new("h-comet", "Comet")
    }

    /// Overdue "Regumate" (Bella), completed "Farrier visit" (Bella),
    /// "Dentist" in 3 days (Comet), "Vaccines" in 10 days (Comet).
    pub fn board() -> RecordBoard {
        let fixture = StoreFixture::new()
            .with_overdue("Regumate", &bella())
            .with_completed("Farrier visit", &bella())
            .with_scheduled_in("Dentist", &comet(), 3)
            .with_scheduled_in("Vaccines", &comet(), 10);
        let today = fixture.today;
        RecordBoard::new(fixture.store).with_today(today)
    }

    pub fn id_of(board: &RecordBoard, title: &str) -> String {
        board
            .store()
            .records()
            .iter()
            .find(|r| r.title == title)
            .map(|r| r.id.clone())
            .unwrap()
    }
}
