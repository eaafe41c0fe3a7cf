//! # Statistics and Due-Date Classification
//!
//! [`RecordStats`] summarizes a (usually already filtered) set of records. It is
//! always recomputed from scratch; there is no incremental bookkeeping to drift.
//!
//! ## Overdue and Upcoming
//!
//! Both classifications work on calendar days and are defined once, here:
//!
//! - **Overdue**: `due_date < today` and the status is not `completed`.
//!   A record due today is not overdue yet.
//! - **Upcoming**: `today <= scheduled_date <= today + window_days`.
//!   Both ends are inclusive, so with the default 7 day window a record
//!   scheduled exactly a week out is upcoming and one at eight days is not.
//!   A window reaching past the last representable date has no upper bound.
//!
//! The stored `overdue` status is unrelated: it is whatever the user set.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::{Priority, Record, RecordKind, RecordStatus};

/// Default forward-looking window for upcoming records, in days.
pub const DEFAULT_UPCOMING_DAYS: u32 = 7;

pub fn is_overdue(record: &Record, today: NaiveDate) -> bool {
    record.status != RecordStatus::Completed && record.due_date.is_some_and(|due| due < today)
}

pub fn is_upcoming(record: &Record, today: NaiveDate, window_days: u32) -> bool {
    let horizon = today.checked_add_days(Days::new(window_days.into()));
    record.scheduled_date.is_some_and(|scheduled| {
        scheduled >= today && horizon.map_or(true, |limit| scheduled <= limit)
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordStats {
    pub total: usize,
    pub by_type: BTreeMap<RecordKind, usize>,
    pub by_status: BTreeMap<RecordStatus, usize>,
    pub by_priority: BTreeMap<Priority, usize>,
    pub overdue: usize,
    pub upcoming: usize,
}

impl Default for RecordStats {
    fn default() -> Self {
        Self {
            total: 0,
            by_type: RecordKind::ALL.into_iter().map(|k| (k, 0)).collect(),
            by_status: RecordStatus::ALL.into_iter().map(|s| (s, 0)).collect(),
            by_priority: Priority::ALL.into_iter().map(|p| (p, 0)).collect(),
            overdue: 0,
            upcoming: 0,
        }
    }
}

impl RecordStats {
    pub fn compute<'a, I>(records: I, today: NaiveDate, window_days: u32) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut stats = Self::default();
        for record in records {
            stats.total += 1;
            *stats.by_type.entry(record.kind()).or_default() += 1;
            *stats.by_status.entry(record.status).or_default() += 1;
            *stats.by_priority.entry(record.priority).or_default() += 1;
            if is_overdue(record, today) {
                stats.overdue += 1;
            }
            if is_upcoming(record, today, window_days) {
                stats.upcoming += 1;
            }
        }
        stats
    }

    pub fn count_type(&self, kind: RecordKind) -> usize {
        self.by_type.get(&kind).copied().unwrap_or(0)
    }

    pub fn count_status(&self, status: RecordStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    pub fn count_priority(&self, priority: Priority) -> usize {
        self.by_priority.get(&priority).copied().unwrap_or(0)
    }

    /// Records that are neither completed nor cancelled.
    pub fn open(&self) -> usize {
        self.total
            - self.count_status(RecordStatus::Completed)
            - self.count_status(RecordStatus::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AppointmentDetails, HorseRef, MedicationDetails, RecordDetails};
    use chrono::{Duration, TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    fn days(n: i64) -> NaiveDate {
        today() + Duration::days(n)
    }

    fn record(details: RecordDetails) -> Record {
        Record::new_at(
            "Record",
            HorseRef::new("h1", "Bella"),
            details,
            Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap(),
        )
    }

    fn medication() -> Record {
        record(RecordDetails::Medication(MedicationDetails::default()))
    }

    fn appointment() -> Record {
        record(RecordDetails::Appointment(AppointmentDetails::default()))
    }

    #[test]
    fn test_overdue_requires_past_due_and_open_status() {
        assert!(is_overdue(&medication().with_due_date(days(-1)), today()));
        assert!(!is_overdue(&medication().with_due_date(days(0)), today()));
        assert!(!is_overdue(&medication(), today()));
        assert!(!is_overdue(
            &medication()
                .with_due_date(days(-30))
                .with_status(RecordStatus::Completed),
            today()
        ));
    }

    #[test]
    fn test_overdue_classification_ignores_stored_overdue_status() {
        let flagged = medication().with_status(RecordStatus::Overdue);
        assert!(!is_overdue(&flagged, today()));
    }

    #[test]
    fn test_upcoming_window_is_inclusive() {
        assert!(is_upcoming(&appointment().with_scheduled_date(days(0)), today(), 7));
        assert!(is_upcoming(&appointment().with_scheduled_date(days(7)), today(), 7));
        assert!(!is_upcoming(&appointment().with_scheduled_date(days(8)), today(), 7));
        assert!(!is_upcoming(&appointment().with_scheduled_date(days(-1)), today(), 7));
        assert!(!is_upcoming(&appointment(), today(), 7));
    }

    #[test]
    fn test_upcoming_with_huge_window_is_unbounded() {
        let far = appointment().with_scheduled_date(days(365 * 100));
        assert!(is_upcoming(&far, today(), u32::MAX));
        assert!(!is_upcoming(&appointment().with_scheduled_date(days(-1)), today(), u32::MAX));

        let stats = RecordStats::compute([&far], today(), u32::MAX);
        assert_eq!(stats.upcoming, 1);
    }

    #[test]
    fn test_empty_stats_have_every_bucket() {
        let stats = RecordStats::compute(std::iter::empty(), today(), 7);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.by_type.len(), RecordKind::ALL.len());
        assert_eq!(stats.by_status.len(), RecordStatus::ALL.len());
        assert_eq!(stats.by_priority.len(), Priority::ALL.len());
        assert!(stats.by_type.values().all(|&n| n == 0));
    }

    #[test]
    fn test_compute_counts() {
        let records = vec![
            medication().with_due_date(days(-1)),
            appointment()
                .with_due_date(days(-1))
                .with_status(RecordStatus::Completed),
            appointment()
                .with_scheduled_date(days(3))
                .with_priority(Priority::Urgent),
        ];
        let stats = RecordStats::compute(&records, today(), 7);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.count_type(RecordKind::Medication), 1);
        assert_eq!(stats.count_type(RecordKind::Appointment), 2);
        assert_eq!(stats.count_type(RecordKind::Foaling), 0);
        assert_eq!(stats.count_status(RecordStatus::Completed), 1);
        assert_eq!(stats.count_status(RecordStatus::Scheduled), 2);
        assert_eq!(stats.count_priority(Priority::Urgent), 1);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.upcoming, 1);
        assert_eq!(stats.open(), 2);
    }

    #[test]
    fn test_bucket_sums_equal_total() {
        let records: Vec<Record> = (0..12)
            .map(|i| {
                let base = if i % 3 == 0 { medication() } else { appointment() };
                base.with_status(RecordStatus::ALL[i % RecordStatus::ALL.len()])
                    .with_priority(Priority::ALL[i % Priority::ALL.len()])
            })
            .collect();
        let stats = RecordStats::compute(&records, today(), 7);

        assert_eq!(stats.total, stats.by_status.values().sum::<usize>());
        assert_eq!(stats.total, stats.by_type.values().sum::<usize>());
        assert_eq!(stats.total, stats.by_priority.values().sum::<usize>());
    }

    #[test]
    fn test_stats_serialize_with_snake_case_keys() {
        let stats = RecordStats::compute(&[medication()], today(), 7);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["by_type"]["medication"], 1);
        assert_eq!(json["by_status"]["in_progress"], 0);
    }
}
