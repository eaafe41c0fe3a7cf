//! # Domain Model: Records, Kinds and Partial Updates
//!
//! This module defines the core data structures for studbook: [`Record`], its
//! kind-specific [`RecordDetails`], and the closed enums used for filtering
//! ([`RecordKind`], [`RecordStatus`], [`Priority`]).
//!
//! ## Shape of a Record
//!
//! Every record shares a common base (title, status, priority, horse, dates,
//! personnel, costs, tags) and carries exactly one detail variant:
//!
//! ```text
//! Record
//! ├── id, title, description, status, priority
//! ├── horse: HorseRef { id, name }
//! ├── created_at, updated_at            (timestamps, UTC)
//! ├── scheduled_date, due_date, completed_date   (calendar dates)
//! ├── veterinarian, assigned_to, estimated_cost, actual_cost, tags, notes
//! └── details: RecordDetails::{Medication, Appointment, ..., HeatCycle}
//! ```
//!
//! The record's kind is *derived* from `details`. There is no separate type
//! field that could drift out of sync with the kind-specific data.
//!
//! ## Status Is Caller-Assigned
//!
//! [`RecordStatus::Overdue`] exists as a value users may pick, but nothing in
//! the library transitions a record into it. "Overdue" as a classification is
//! computed in [`crate::stats`] from the due date.
//!
//! ## Partial Updates
//!
//! [`RecordPatch`] carries only the fields to change. Optional record fields use
//! `Option<Option<T>>` so a patch can distinguish "leave alone" (`None`) from
//! "clear" (`Some(None)`). A detail patch must keep the record's kind; a patch
//! that would change it is dropped.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ids::generate_record_id;

/// Average equine gestation length used to estimate foaling dates.
pub const GESTATION_DAYS: i64 = 340;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Medication,
    Appointment,
    VeterinaryCheckup,
    Ultrasound,
    Breeding,
    Pregnancy,
    Foaling,
    HealthAssessment,
    HeatCycle,
}

impl RecordKind {
    pub const ALL: [RecordKind; 9] = [
        RecordKind::Medication,
        RecordKind::Appointment,
        RecordKind::VeterinaryCheckup,
        RecordKind::Ultrasound,
        RecordKind::Breeding,
        RecordKind::Pregnancy,
        RecordKind::Foaling,
        RecordKind::HealthAssessment,
        RecordKind::HeatCycle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Medication => "medication",
            RecordKind::Appointment => "appointment",
            RecordKind::VeterinaryCheckup => "veterinary_checkup",
            RecordKind::Ultrasound => "ultrasound",
            RecordKind::Breeding => "breeding",
            RecordKind::Pregnancy => "pregnancy",
            RecordKind::Foaling => "foaling",
            RecordKind::HealthAssessment => "health_assessment",
            RecordKind::HeatCycle => "heat_cycle",
        }
    }

    /// Short tag placed at the front of generated record ids.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            RecordKind::Medication => "med",
            RecordKind::Appointment => "apt",
            RecordKind::VeterinaryCheckup => "chk",
            RecordKind::Ultrasound => "us",
            RecordKind::Breeding => "brd",
            RecordKind::Pregnancy => "preg",
            RecordKind::Foaling => "foal",
            RecordKind::HealthAssessment => "hlth",
            RecordKind::HeatCycle => "heat",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Medication => "Medication",
            RecordKind::Appointment => "Appointment",
            RecordKind::VeterinaryCheckup => "Veterinary Checkup",
            RecordKind::Ultrasound => "Ultrasound",
            RecordKind::Breeding => "Breeding",
            RecordKind::Pregnancy => "Pregnancy",
            RecordKind::Foaling => "Foaling",
            RecordKind::HealthAssessment => "Health Assessment",
            RecordKind::HeatCycle => "Heat Cycle",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_token(s);
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ParseEnumError::new("record type", s))
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Draft,
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    Overdue,
}

impl RecordStatus {
    pub const ALL: [RecordStatus; 6] = [
        RecordStatus::Draft,
        RecordStatus::Scheduled,
        RecordStatus::InProgress,
        RecordStatus::Completed,
        RecordStatus::Cancelled,
        RecordStatus::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Draft => "draft",
            RecordStatus::Scheduled => "scheduled",
            RecordStatus::InProgress => "in_progress",
            RecordStatus::Completed => "completed",
            RecordStatus::Cancelled => "cancelled",
            RecordStatus::Overdue => "overdue",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_token(s);
        RecordStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseEnumError::new("status", s))
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    /// Higher is more pressing.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
            Priority::Urgent => 3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_token(s);
        Priority::ALL
            .into_iter()
            .find(|priority| priority.as_str() == normalized)
            .ok_or_else(|| ParseEnumError::new("priority", s))
    }
}

/// Error returned when a string does not name a known enum value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    what: &'static str,
    input: String,
}

impl ParseEnumError {
    pub(crate) fn new(what: &'static str, input: &str) -> Self {
        Self {
            what,
            input: input.to_string(),
        }
    }
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: '{}'", self.what, self.input)
    }
}

impl std::error::Error for ParseEnumError {}

// Accept "in-progress", "In Progress" and "in_progress" alike.
fn normalize_token(s: &str) -> String {
    s.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}

/// A reference to the horse a record belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HorseRef {
    pub id: String,
    pub name: String,
}

impl HorseRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreedingMethod {
    NaturalCover,
    FreshAi,
    CooledAi,
    FrozenAi,
    EmbryoTransfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoalSex {
    Colt,
    Filly,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicationDetails {
    pub medication_name: String,
    pub dosage: String,
    pub frequency: Option<String>,
    pub route: Option<String>,
    pub duration_days: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppointmentDetails {
    pub appointment_type: String,
    pub location: Option<String>,
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckupDetails {
    pub checkup_type: Option<String>,
    pub findings: Option<String>,
    pub temperature_c: Option<f64>,
    pub heart_rate_bpm: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UltrasoundDetails {
    pub days_post_breeding: Option<u32>,
    pub left_follicle_mm: Option<f64>,
    pub right_follicle_mm: Option<f64>,
    pub pregnancy_detected: Option<bool>,
    pub heartbeat_detected: Option<bool>,
    pub findings: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreedingDetails {
    pub stallion: HorseRef,
    pub method: BreedingMethod,
    pub breeding_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PregnancyDetails {
    pub breeding_date: NaiveDate,
    pub expected_foaling_date: NaiveDate,
    pub stallion_name: Option<String>,
    pub stage: Option<String>,
}

impl PregnancyDetails {
    /// Builds pregnancy details, estimating the foaling date from the breeding date.
    pub fn from_breeding_date(breeding_date: NaiveDate) -> Self {
        Self {
            breeding_date,
            expected_foaling_date: expected_foaling_date(breeding_date),
            stallion_name: None,
            stage: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoalingDetails {
    pub foaling_date: NaiveDate,
    pub foal_sex: Option<FoalSex>,
    pub foal_name: Option<String>,
    pub complications: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthAssessmentDetails {
    /// Henneke body condition score, 1 (poor) to 9 (extremely fat).
    pub body_condition_score: Option<u8>,
    pub weight_kg: Option<f64>,
    pub findings: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatCycleDetails {
    pub cycle_start: NaiveDate,
    pub intensity: Option<String>,
    pub ovulation_detected: Option<bool>,
}

/// Kind-specific record data. The variant determines the record's [`RecordKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordDetails {
    Medication(MedicationDetails),
    Appointment(AppointmentDetails),
    VeterinaryCheckup(CheckupDetails),
    Ultrasound(UltrasoundDetails),
    Breeding(BreedingDetails),
    Pregnancy(PregnancyDetails),
    Foaling(FoalingDetails),
    HealthAssessment(HealthAssessmentDetails),
    HeatCycle(HeatCycleDetails),
}

impl RecordDetails {
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordDetails::Medication(_) => RecordKind::Medication,
            RecordDetails::Appointment(_) => RecordKind::Appointment,
            RecordDetails::VeterinaryCheckup(_) => RecordKind::VeterinaryCheckup,
            RecordDetails::Ultrasound(_) => RecordKind::Ultrasound,
            RecordDetails::Breeding(_) => RecordKind::Breeding,
            RecordDetails::Pregnancy(_) => RecordKind::Pregnancy,
            RecordDetails::Foaling(_) => RecordKind::Foaling,
            RecordDetails::HealthAssessment(_) => RecordKind::HealthAssessment,
            RecordDetails::HeatCycle(_) => RecordKind::HeatCycle,
        }
    }

    /// One-line summary of the kind-specific fields, for listings.
    pub fn summary(&self) -> String {
        match self {
            RecordDetails::Medication(d) => match &d.frequency {
                Some(freq) => format!("{} {} {}", d.medication_name, d.dosage, freq),
                None => format!("{} {}", d.medication_name, d.dosage),
            },
            RecordDetails::Appointment(d) => match &d.location {
                Some(location) => format!("{} @ {}", d.appointment_type, location),
                None => d.appointment_type.clone(),
            },
            RecordDetails::VeterinaryCheckup(d) => d
                .checkup_type
                .clone()
                .or_else(|| d.findings.clone())
                .unwrap_or_default(),
            RecordDetails::Ultrasound(d) => match (d.days_post_breeding, d.pregnancy_detected) {
                (Some(days), Some(true)) => format!("day {}: pregnant", days),
                (Some(days), Some(false)) => format!("day {}: open", days),
                (Some(days), None) => format!("day {}", days),
                (None, Some(true)) => "pregnant".to_string(),
                (None, Some(false)) => "open".to_string(),
                (None, None) => d.findings.clone().unwrap_or_default(),
            },
            RecordDetails::Breeding(d) => {
                format!("{} on {}", d.stallion.name, d.breeding_date)
            }
            RecordDetails::Pregnancy(d) => format!("due {}", d.expected_foaling_date),
            RecordDetails::Foaling(d) => match &d.foal_name {
                Some(name) => format!("{} born {}", name, d.foaling_date),
                None => format!("born {}", d.foaling_date),
            },
            RecordDetails::HealthAssessment(d) => match (d.body_condition_score, d.weight_kg) {
                (Some(bcs), Some(kg)) => format!("BCS {} / {} kg", bcs, kg),
                (Some(bcs), None) => format!("BCS {}", bcs),
                (None, Some(kg)) => format!("{} kg", kg),
                (None, None) => d.findings.clone().unwrap_or_default(),
            },
            RecordDetails::HeatCycle(d) => format!("cycle from {}", d.cycle_start),
        }
    }
}

/// Expected foaling date for a mare bred on `breeding_date`.
pub fn expected_foaling_date(breeding_date: NaiveDate) -> NaiveDate {
    breeding_date + Duration::days(GESTATION_DAYS)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: RecordStatus,
    pub priority: Priority,
    pub horse: HorseRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed_date: Option<NaiveDate>,
    #[serde(default)]
    pub veterinarian: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub estimated_cost: Option<f64>,
    #[serde(default)]
    pub actual_cost: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub details: RecordDetails,
}

impl Record {
    pub fn new(title: impl Into<String>, horse: HorseRef, details: RecordDetails) -> Self {
        Self::new_at(title, horse, details, Utc::now())
    }

    /// Creates a record stamped with `now` instead of the wall clock.
    pub fn new_at(
        title: impl Into<String>,
        horse: HorseRef,
        details: RecordDetails,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: generate_record_id(details.kind(), now),
            title: title.into(),
            description: None,
            status: RecordStatus::default(),
            priority: Priority::default(),
            horse,
            created_at: now,
            updated_at: now,
            scheduled_date: None,
            due_date: None,
            completed_date: None,
            veterinarian: None,
            assigned_to: None,
            estimated_cost: None,
            actual_cost: None,
            tags: Vec::new(),
            notes: None,
            details,
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.details.kind()
    }

    /// The date used for range filtering: the scheduled date, or the day the
    /// record was created.
    pub fn reference_date(&self) -> NaiveDate {
        self.scheduled_date
            .unwrap_or_else(|| self.created_at.date_naive())
    }

    pub fn with_status(mut self, status: RecordStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_scheduled_date(mut self, date: NaiveDate) -> Self {
        self.scheduled_date = Some(date);
        self
    }

    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn with_veterinarian(mut self, name: impl Into<String>) -> Self {
        self.veterinarian = Some(name.into());
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Merge `patch` into this record and stamp `updated_at`.
    ///
    /// Returns `false` when the patch carried details of a different kind, which
    /// are left unapplied. All other fields are still merged.
    pub fn apply_patch(&mut self, patch: RecordPatch, now: DateTime<Utc>) -> bool {
        let mut details_applied = true;

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(horse) = patch.horse {
            self.horse = horse;
        }
        if let Some(date) = patch.scheduled_date {
            self.scheduled_date = date;
        }
        if let Some(date) = patch.due_date {
            self.due_date = date;
        }
        if let Some(date) = patch.completed_date {
            self.completed_date = date;
        }
        if let Some(vet) = patch.veterinarian {
            self.veterinarian = vet;
        }
        if let Some(assignee) = patch.assigned_to {
            self.assigned_to = assignee;
        }
        if let Some(cost) = patch.estimated_cost {
            self.estimated_cost = cost;
        }
        if let Some(cost) = patch.actual_cost {
            self.actual_cost = cost;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(details) = patch.details {
            if details.kind() == self.kind() {
                self.details = details;
            } else {
                details_applied = false;
            }
        }

        self.updated_at = now;
        details_applied
    }
}

/// A partial update to a [`Record`]. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<RecordStatus>,
    pub priority: Option<Priority>,
    pub horse: Option<HorseRef>,
    pub scheduled_date: Option<Option<NaiveDate>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub completed_date: Option<Option<NaiveDate>>,
    pub veterinarian: Option<Option<String>>,
    pub assigned_to: Option<Option<String>>,
    pub estimated_cost: Option<Option<f64>>,
    pub actual_cost: Option<Option<f64>>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<Option<String>>,
    pub details: Option<RecordDetails>,
}

impl RecordPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_status(mut self, status: RecordStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_scheduled_date(mut self, date: Option<NaiveDate>) -> Self {
        self.scheduled_date = Some(date);
        self
    }

    pub fn with_due_date(mut self, date: Option<NaiveDate>) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn with_completed_date(mut self, date: Option<NaiveDate>) -> Self {
        self.completed_date = Some(date);
        self
    }

    pub fn with_veterinarian(mut self, vet: Option<String>) -> Self {
        self.veterinarian = Some(vet);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn with_details(mut self, details: RecordDetails) -> Self {
        self.details = Some(details);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
