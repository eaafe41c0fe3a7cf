//! Record filtering.
//!
//! A [`RecordFilter`] is a set of optional predicates. A record passes when it
//! satisfies every active dimension (AND). The tags dimension is the one
//! exception inside a dimension: any single matching tag is enough (OR).
//!
//! An unset or empty dimension does not filter at all, so
//! `RecordFilter::default()` matches every record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Priority, Record, RecordKind, RecordStatus};

/// Inclusive calendar date range. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Case-insensitive substring matched against title or horse name.
    pub search: Option<String>,
    pub types: Vec<RecordKind>,
    pub statuses: Vec<RecordStatus>,
    pub priorities: Vec<Priority>,
    pub horse_id: Option<String>,
    pub veterinarian: Option<String>,
    pub date_range: Option<DateRange>,
    /// Any one of these tags qualifies.
    pub tags: Vec<String>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_types(mut self, types: Vec<RecordKind>) -> Self {
        self.types = types;
        self
    }

    pub fn with_statuses(mut self, statuses: Vec<RecordStatus>) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn with_priorities(mut self, priorities: Vec<Priority>) -> Self {
        self.priorities = priorities;
        self
    }

    pub fn with_horse(mut self, horse_id: impl Into<String>) -> Self {
        self.horse_id = Some(horse_id.into());
        self
    }

    pub fn with_veterinarian(mut self, name: impl Into<String>) -> Self {
        self.veterinarian = Some(name.into());
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// True when no dimension would narrow the collection.
    pub fn is_empty(&self) -> bool {
        self.search_term().is_none()
            && self.types.is_empty()
            && self.statuses.is_empty()
            && self.priorities.is_empty()
            && self.horse_id.as_deref().map_or(true, str::is_empty)
            && self.veterinarian.as_deref().map_or(true, str::is_empty)
            && self.date_range.map_or(true, |r| r.is_open())
            && self.tags.is_empty()
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.matches_search(record, self.search_term().as_deref())
            && self.matches_structured(record)
    }

    /// Filters `records`, keeping their order.
    pub fn apply<'a, I>(&self, records: I) -> Vec<Record>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let term = self.search_term();
        records
            .into_iter()
            .filter(|record| {
                self.matches_search(record, term.as_deref()) && self.matches_structured(record)
            })
            .cloned()
            .collect()
    }

    fn matches_search(&self, record: &Record, term: Option<&str>) -> bool {
        let Some(term) = term else {
            return true;
        };
        record.title.to_lowercase().contains(term)
            || record.horse.name.to_lowercase().contains(term)
    }

    fn matches_structured(&self, record: &Record) -> bool {
        if !self.types.is_empty() && !self.types.contains(&record.kind()) {
            return false;
        }
        if !self.statuses.is_empty() && !self.statuses.contains(&record.status) {
            return false;
        }
        if !self.priorities.is_empty() && !self.priorities.contains(&record.priority) {
            return false;
        }
        if let Some(horse_id) = self.horse_id.as_deref().filter(|id| !id.is_empty()) {
            if record.horse.id != horse_id {
                return false;
            }
        }
        if let Some(vet) = self.veterinarian.as_deref().filter(|vet| !vet.is_empty()) {
            if record.veterinarian.as_deref() != Some(vet) {
                return false;
            }
        }
        if let Some(range) = self.date_range {
            if !range.contains(record.reference_date()) {
                return false;
            }
        }
        if !self.tags.is_empty() && !self.tags.iter().any(|tag| record.tags.contains(tag)) {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AppointmentDetails, HorseRef, MedicationDetails, RecordDetails,
    };
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn medication(title: &str, horse: &str) -> Record {
        Record::new_at(
            title,
            HorseRef::new(horse.to_lowercase(), horse),
            RecordDetails::Medication(MedicationDetails {
                medication_name: "Regumate".into(),
                dosage: "10ml".into(),
                ..Default::default()
            }),
            Utc.with_ymd_and_hms(2026, 2, 10, 8, 0, 0).unwrap(),
        )
    }

    fn appointment(title: &str, horse: &str) -> Record {
        Record::new_at(
            title,
            HorseRef::new(horse.to_lowercase(), horse),
            RecordDetails::Appointment(AppointmentDetails {
                appointment_type: "farrier".into(),
                ..Default::default()
            }),
            Utc.with_ymd_and_hms(2026, 2, 12, 8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = RecordFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&medication("Dose", "Bella")));
        assert!(filter.matches(&appointment("Shoes", "Comet")));
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filter = RecordFilter::new().with_search("   ");
        assert!(filter.is_empty());
        assert!(filter.matches(&medication("Dose", "Bella")));
    }

    #[test]
    fn test_search_matches_title_or_horse_name_case_insensitive() {
        let filter = RecordFilter::new().with_search("BELL");
        assert!(filter.matches(&medication("Dose", "Bella")));
        assert!(filter.matches(&appointment("Call Bellamy's farrier", "Comet")));
        assert!(!filter.matches(&appointment("Shoes", "Comet")));
    }

    #[test]
    fn test_type_filter_with_search_narrows() {
        let records = vec![
            medication("Regumate dose", "Bella"),
            medication("Antibiotics", "Comet"),
            appointment("Regumate delivery", "Bella"),
        ];

        let by_type = RecordFilter::new().with_types(vec![RecordKind::Medication]);
        let result = by_type.apply(&records);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|r| r.kind() == RecordKind::Medication));

        let narrowed = by_type.with_search("regumate");
        let result = narrowed.apply(&records);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Regumate dose");
    }

    #[test]
    fn test_status_and_priority_filters() {
        let done = medication("Done", "Bella")
            .with_status(RecordStatus::Completed)
            .with_priority(Priority::High);
        let open = medication("Open", "Bella");

        let filter = RecordFilter::new().with_statuses(vec![RecordStatus::Completed]);
        assert!(filter.matches(&done));
        assert!(!filter.matches(&open));

        let filter = RecordFilter::new().with_priorities(vec![Priority::Low, Priority::Medium]);
        assert!(!filter.matches(&done));
        assert!(filter.matches(&open));
    }

    #[test]
    fn test_horse_and_veterinarian_filters() {
        let record = medication("Dose", "Bella").with_veterinarian("Dr. Hale");

        assert!(RecordFilter::new().with_horse("bella").matches(&record));
        assert!(!RecordFilter::new().with_horse("comet").matches(&record));
        assert!(RecordFilter::new()
            .with_veterinarian("Dr. Hale")
            .matches(&record));
        assert!(!RecordFilter::new()
            .with_veterinarian("Dr. Ames")
            .matches(&medication("Dose", "Bella")));
    }

    #[test]
    fn test_tags_match_any() {
        let record = medication("Dose", "Bella").with_tags(["reproductive", "daily"]);

        let any = RecordFilter::new().with_tags(vec!["daily".into(), "surgery".into()]);
        assert!(any.matches(&record));

        let none = RecordFilter::new().with_tags(vec!["surgery".into()]);
        assert!(!none.matches(&record));
        assert!(!none.matches(&medication("Untagged", "Bella")));
    }

    #[test]
    fn test_date_range_uses_scheduled_then_created() {
        let range = DateRange::new(Some(date(2026, 2, 11)), Some(date(2026, 2, 20)));
        let filter = RecordFilter::new().with_date_range(range);

        // created 2026-02-10, no scheduled date
        assert!(!filter.matches(&medication("Dose", "Bella")));
        // created 2026-02-12
        assert!(filter.matches(&appointment("Shoes", "Comet")));
        // scheduled date wins over created date
        let scheduled = medication("Dose", "Bella").with_scheduled_date(date(2026, 2, 20));
        assert!(filter.matches(&scheduled));
        let outside = appointment("Shoes", "Comet").with_scheduled_date(date(2026, 3, 1));
        assert!(!filter.matches(&outside));
    }

    #[test]
    fn test_open_ended_date_range() {
        let from = DateRange::new(Some(date(2026, 2, 11)), None);
        assert!(from.contains(date(2030, 1, 1)));
        assert!(!from.contains(date(2026, 2, 10)));
        assert!(DateRange::default().is_open());
    }

    #[test]
    fn test_dimensions_combine_with_and() {
        let record = medication("Dose", "Bella")
            .with_status(RecordStatus::Scheduled)
            .with_tags(["daily"]);
        let filter = RecordFilter::new()
            .with_types(vec![RecordKind::Medication])
            .with_statuses(vec![RecordStatus::Completed])
            .with_tags(vec!["daily".into()]);
        assert!(!filter.matches(&record));
    }
}
