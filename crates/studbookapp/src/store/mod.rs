//! # Storage Layer
//!
//! The record collection lives in a [`RecordStore`]: a plain, ordered, in-memory
//! `Vec<Record>` that the store exclusively owns. Consumers get borrowed slices or
//! cloned, filtered views. Nothing outside the store mutates records directly.
//!
//! ## Store Contract
//!
//! - `add` appends. Ids are not checked for uniqueness; callers generate them
//!   with [`crate::ids::generate_record_id`].
//! - `update` merges a [`RecordPatch`] and bumps `updated_at`. Unknown ids are
//!   ignored.
//! - `delete` removes the record. Unknown ids are ignored. There is no cascade:
//!   records do not reference each other.
//! - No call ever fails. `update` and `delete` return whether anything changed
//!   so callers can report it.
//!
//! ## Snapshots
//!
//! The store has no persistence of its own. A [`backend::SnapshotBackend`] can
//! load a store's records and save them back as a whole:
//!
//! - [`fs_backend::FsBackend`]: a JSON file, written atomically.
//! - [`mem_backend::MemBackend`]: for testing logic without filesystem I/O.
//!
//! ```text
//! <data dir>/
//! └── records.json        # Vec<Record>, pretty-printed
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, warn};

use crate::model::{Record, RecordKind, RecordPatch};
use crate::stats::{is_overdue, is_upcoming};

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn add(&mut self, record: Record) {
        debug!("store: add {} ({})", record.id, record.kind());
        self.records.push(record);
    }

    pub fn update(&mut self, id: &str, patch: RecordPatch) -> bool {
        self.update_at(id, patch, Utc::now())
    }

    /// Like [`RecordStore::update`], stamping `updated_at` with `now`.
    pub fn update_at(&mut self, id: &str, patch: RecordPatch, now: DateTime<Utc>) -> bool {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            debug!("store: update ignored, no record {}", id);
            return false;
        };
        if !record.apply_patch(patch, now) {
            warn!(
                "store: ignored details of a different kind for {} ({})",
                record.id,
                record.kind()
            );
        }
        true
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = self.records.len() != before;
        if !removed {
            debug!("store: delete ignored, no record {}", id);
        }
        removed
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn by_type(&self, kind: RecordKind) -> Vec<Record> {
        self.collect(|r| r.kind() == kind)
    }

    pub fn by_horse(&self, horse_id: &str) -> Vec<Record> {
        self.collect(|r| r.horse.id == horse_id)
    }

    pub fn overdue(&self, today: NaiveDate) -> Vec<Record> {
        self.collect(|r| is_overdue(r, today))
    }

    pub fn upcoming(&self, today: NaiveDate, days: u32) -> Vec<Record> {
        self.collect(|r| is_upcoming(r, today, days))
    }

    fn collect(&self, pred: impl Fn(&Record) -> bool) -> Vec<Record> {
        self.records.iter().filter(|r| pred(r)).cloned().collect()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{
        AppointmentDetails, HorseRef, MedicationDetails, RecordDetails, RecordStatus,
    };
    use chrono::{Duration, TimeZone};

    /// Builds stores with a fixed "today" of 2026-06-15.
    pub struct StoreFixture {
        pub store: RecordStore,
        pub today: NaiveDate,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: RecordStore::new(),
                today: NaiveDate::from_ymd_opt(2026, 6, 15).unwrap(),
            }
        }

        pub fn created_at(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2026, 6, 1, 8, 0, 0).unwrap()
        }

        pub fn day(&self, offset: i64) -> NaiveDate {
            self.today + Duration::days(offset)
        }

        pub fn medication(&self, title: &str, horse: &HorseRef) -> Record {
            Record::new_at(
                title,
                horse.clone(),
                RecordDetails::Medication(MedicationDetails {
                    medication_name: "Altrenogest".into(),
                    dosage: "10ml".into(),
                    ..Default::default()
                }),
                self.created_at(),
            )
        }

        pub fn appointment(&self, title: &str, horse: &HorseRef) -> Record {
            Record::new_at(
                title,
                horse.clone(),
                RecordDetails::Appointment(AppointmentDetails {
                    appointment_type: "farrier".into(),
                    ..Default::default()
                }),
                self.created_at(),
            )
        }

        pub fn with_record(mut self, record: Record) -> Self {
            self.store.add(record);
            self
        }

        pub fn with_medications(mut self, count: usize, horse: &HorseRef) -> Self {
            for i in 0..count {
                let record = self.medication(&format!("Medication {}", i + 1), horse);
                self.store.add(record);
            }
            self
        }

        pub fn with_overdue(mut self, title: &str, horse: &HorseRef) -> Self {
            let record = self.medication(title, horse).with_due_date(self.day(-1));
            self.store.add(record);
            self
        }

        pub fn with_completed(mut self, title: &str, horse: &HorseRef) -> Self {
            let record = self
                .appointment(title, horse)
                .with_due_date(self.day(-1))
                .with_status(RecordStatus::Completed);
            self.store.add(record);
            self
        }

        pub fn with_scheduled_in(mut self, title: &str, horse: &HorseRef, days: i64) -> Self {
            let record = self
                .appointment(title, horse)
                .with_scheduled_date(self.day(days));
            self.store.add(record);
            self
        }
    }
}
