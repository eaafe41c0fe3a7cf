//! Listing order for records.
//!
//! Sorting is stable, so records that compare equal keep their store order.
//! Records missing the date a key sorts on always go last.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::model::{ParseEnumError, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Earliest scheduled date first, ties broken by creation time.
    Scheduled,
    /// Earliest due date first.
    Due,
    /// Urgent first.
    Priority,
    /// Newest first.
    Created,
    /// Case-insensitive alphabetical.
    Title,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Scheduled,
        SortKey::Due,
        SortKey::Priority,
        SortKey::Created,
        SortKey::Title,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Scheduled => "scheduled",
            SortKey::Due => "due",
            SortKey::Priority => "priority",
            SortKey::Created => "created",
            SortKey::Title => "title",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| ParseEnumError::new("sort key", s))
    }
}

pub fn sort_records(records: &mut [Record], key: SortKey) {
    match key {
        SortKey::Scheduled => records.sort_by(|a, b| {
            missing_last(a.scheduled_date, b.scheduled_date)
                .then_with(|| a.created_at.cmp(&b.created_at))
        }),
        SortKey::Due => records.sort_by(|a, b| missing_last(a.due_date, b.due_date)),
        SortKey::Priority => records.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank())),
        SortKey::Created => records.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Title => records.sort_by_key(|r| r.title.to_lowercase()),
    }
}

fn missing_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HorseRef, MedicationDetails, Priority, RecordDetails};
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    fn rec(title: &str, hours: i64) -> Record {
        Record::new_at(
            title,
            HorseRef::new("h1", "Bella"),
            RecordDetails::Medication(MedicationDetails::default()),
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hours),
        )
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
    }

    fn titles(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_sort_by_scheduled_missing_last() {
        let mut records = vec![
            rec("none", 0),
            rec("late", 1).with_scheduled_date(date(20)),
            rec("early", 2).with_scheduled_date(date(3)),
        ];
        sort_records(&mut records, SortKey::Scheduled);
        assert_eq!(titles(&records), vec!["early", "late", "none"]);
    }

    #[test]
    fn test_sort_by_priority_urgent_first_and_stable() {
        let mut records = vec![
            rec("a", 0).with_priority(Priority::Low),
            rec("b", 1).with_priority(Priority::Urgent),
            rec("c", 2).with_priority(Priority::Low),
        ];
        sort_records(&mut records, SortKey::Priority);
        assert_eq!(titles(&records), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sort_by_created_newest_first() {
        let mut records = vec![rec("old", 0), rec("new", 5), rec("mid", 2)];
        sort_records(&mut records, SortKey::Created);
        assert_eq!(titles(&records), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_sort_by_title_ignores_case() {
        let mut records = vec![rec("beta", 0), rec("Alpha", 0), rec("gamma", 0)];
        sort_records(&mut records, SortKey::Title);
        assert_eq!(titles(&records), vec!["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_parse_sort_key() {
        assert_eq!("Due".parse::<SortKey>(), Ok(SortKey::Due));
        assert!("horse".parse::<SortKey>().is_err());
    }
}
