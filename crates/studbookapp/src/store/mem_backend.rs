use super::backend::SnapshotBackend;
use crate::error::{Result, StudbookError};
use crate::model::Record;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

/// In-memory snapshot backend for testing.
///
/// Uses `RefCell` for interior mutability since studbook is single-threaded,
/// letting `SnapshotBackend` keep `&self` on every method.
#[derive(Default)]
pub struct MemBackend {
    records: RefCell<Vec<Record>>,
    saves: Cell<usize>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: RefCell::new(records),
            ..Self::default()
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl SnapshotBackend for MemBackend {
    fn load(&self) -> Result<Vec<Record>> {
        Ok(self.records.borrow().clone())
    }

    fn save(&self, records: &[Record]) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(StudbookError::Store("Simulated write error".to_string()));
        }
        *self.records.borrow_mut() = records.to_vec();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://records.json")
    }
}
