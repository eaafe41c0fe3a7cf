//! # Record Forms
//!
//! Records are never built straight from user input. Input is collected into a
//! [`RecordDraft`] whose fields are all optional, and [`RecordDraft::validate`]
//! turns it into a [`Record`] only when every required field is present.
//!
//! ## Required Fields
//!
//! | Kind | Required beyond title + horse |
//! |------|-------------------------------|
//! | medication | medication name, dosage |
//! | appointment | appointment type, scheduled date |
//! | veterinary_checkup | - |
//! | ultrasound | scheduled date |
//! | breeding | stallion name, breeding date |
//! | pregnancy | breeding date |
//! | foaling | foaling date |
//! | health_assessment | - |
//! | heat_cycle | cycle start |
//!
//! Blank or whitespace-only strings count as missing. Validation reports every
//! problem at once rather than stopping at the first, so a form can highlight
//! all of them.

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

use crate::model::{
    expected_foaling_date, AppointmentDetails, BreedingDetails, BreedingMethod, CheckupDetails,
    FoalSex, FoalingDetails, HealthAssessmentDetails, HeatCycleDetails, HorseRef,
    MedicationDetails, PregnancyDetails, Priority, Record, RecordDetails, RecordKind,
    RecordStatus, UltrasoundDetails,
};

const BCS_RANGE: std::ops::RangeInclusive<u8> = 1..=9;

/// Why a draft could not become a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormError {
    /// Names of required fields that were absent or blank.
    pub missing: Vec<&'static str>,
    /// Human-readable descriptions of fields with unacceptable values.
    pub invalid: Vec<String>,
}

impl FormError {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            parts.push(format!("missing required fields: {}", self.missing.join(", ")));
        }
        parts.extend(self.invalid.iter().cloned());
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for FormError {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MedicationDraft {
    pub medication_name: Option<String>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub route: Option<String>,
    pub duration_days: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentDraft {
    pub appointment_type: Option<String>,
    pub location: Option<String>,
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BreedingDraft {
    pub stallion_id: Option<String>,
    pub stallion_name: Option<String>,
    /// Defaults to natural cover.
    pub method: Option<BreedingMethod>,
    pub breeding_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PregnancyDraft {
    pub breeding_date: Option<NaiveDate>,
    /// Estimated from the breeding date when absent.
    pub expected_foaling_date: Option<NaiveDate>,
    pub stallion_name: Option<String>,
    pub stage: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoalingDraft {
    pub foaling_date: Option<NaiveDate>,
    pub foal_sex: Option<FoalSex>,
    pub foal_name: Option<String>,
    pub complications: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeatCycleDraft {
    pub cycle_start: Option<NaiveDate>,
    pub intensity: Option<String>,
    pub ovulation_detected: Option<bool>,
}

/// Kind-specific form input. Kinds without required fields reuse the record's
/// detail structs directly.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailsDraft {
    Medication(MedicationDraft),
    Appointment(AppointmentDraft),
    VeterinaryCheckup(CheckupDetails),
    Ultrasound(UltrasoundDetails),
    Breeding(BreedingDraft),
    Pregnancy(PregnancyDraft),
    Foaling(FoalingDraft),
    HealthAssessment(HealthAssessmentDetails),
    HeatCycle(HeatCycleDraft),
}

impl DetailsDraft {
    /// An empty form for `kind`.
    pub fn empty(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Medication => DetailsDraft::Medication(Default::default()),
            RecordKind::Appointment => DetailsDraft::Appointment(Default::default()),
            RecordKind::VeterinaryCheckup => DetailsDraft::VeterinaryCheckup(Default::default()),
            RecordKind::Ultrasound => DetailsDraft::Ultrasound(Default::default()),
            RecordKind::Breeding => DetailsDraft::Breeding(Default::default()),
            RecordKind::Pregnancy => DetailsDraft::Pregnancy(Default::default()),
            RecordKind::Foaling => DetailsDraft::Foaling(Default::default()),
            RecordKind::HealthAssessment => DetailsDraft::HealthAssessment(Default::default()),
            RecordKind::HeatCycle => DetailsDraft::HeatCycle(Default::default()),
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            DetailsDraft::Medication(_) => RecordKind::Medication,
            DetailsDraft::Appointment(_) => RecordKind::Appointment,
            DetailsDraft::VeterinaryCheckup(_) => RecordKind::VeterinaryCheckup,
            DetailsDraft::Ultrasound(_) => RecordKind::Ultrasound,
            DetailsDraft::Breeding(_) => RecordKind::Breeding,
            DetailsDraft::Pregnancy(_) => RecordKind::Pregnancy,
            DetailsDraft::Foaling(_) => RecordKind::Foaling,
            DetailsDraft::HealthAssessment(_) => RecordKind::HealthAssessment,
            DetailsDraft::HeatCycle(_) => RecordKind::HeatCycle,
        }
    }

    /// Checks kind-specific fields. `scheduled_date` comes from the common
    /// part of the form since some kinds require it.
    fn build(
        &self,
        scheduled_date: Option<NaiveDate>,
        errors: &mut FormError,
    ) -> Option<RecordDetails> {
        match self {
            DetailsDraft::Medication(d) => {
                let name = required(&d.medication_name, "medication_name", errors);
                let dosage = required(&d.dosage, "dosage", errors);
                Some(RecordDetails::Medication(MedicationDetails {
                    medication_name: name?,
                    dosage: dosage?,
                    frequency: optional(&d.frequency),
                    route: optional(&d.route),
                    duration_days: d.duration_days,
                }))
            }
            DetailsDraft::Appointment(d) => {
                let appointment_type = required(&d.appointment_type, "appointment_type", errors);
                if scheduled_date.is_none() {
                    errors.missing.push("scheduled_date");
                }
                Some(RecordDetails::Appointment(AppointmentDetails {
                    appointment_type: appointment_type?,
                    location: optional(&d.location),
                    duration_minutes: d.duration_minutes,
                }))
            }
            DetailsDraft::VeterinaryCheckup(d) => Some(RecordDetails::VeterinaryCheckup(d.clone())),
            DetailsDraft::Ultrasound(d) => {
                if scheduled_date.is_none() {
                    errors.missing.push("scheduled_date");
                }
                Some(RecordDetails::Ultrasound(d.clone()))
            }
            DetailsDraft::Breeding(d) => {
                let stallion_name = required(&d.stallion_name, "stallion", errors);
                let breeding_date = required_date(d.breeding_date, "breeding_date", errors);
                let stallion_name = stallion_name?;
                let stallion_id = optional(&d.stallion_id).unwrap_or_else(|| slug(&stallion_name));
                Some(RecordDetails::Breeding(BreedingDetails {
                    stallion: HorseRef::new(stallion_id, stallion_name),
                    method: d.method.unwrap_or(BreedingMethod::NaturalCover),
                    breeding_date: breeding_date?,
                }))
            }
            DetailsDraft::Pregnancy(d) => {
                let breeding_date = required_date(d.breeding_date, "breeding_date", errors)?;
                Some(RecordDetails::Pregnancy(PregnancyDetails {
                    breeding_date,
                    expected_foaling_date: d
                        .expected_foaling_date
                        .unwrap_or_else(|| expected_foaling_date(breeding_date)),
                    stallion_name: optional(&d.stallion_name),
                    stage: optional(&d.stage),
                }))
            }
            DetailsDraft::Foaling(d) => {
                let foaling_date = required_date(d.foaling_date, "foaling_date", errors)?;
                Some(RecordDetails::Foaling(FoalingDetails {
                    foaling_date,
                    foal_sex: d.foal_sex,
                    foal_name: optional(&d.foal_name),
                    complications: optional(&d.complications),
                }))
            }
            DetailsDraft::HealthAssessment(d) => {
                if let Some(bcs) = d.body_condition_score {
                    if !BCS_RANGE.contains(&bcs) {
                        errors.invalid.push(format!(
                            "body condition score must be between 1 and 9 (got {})",
                            bcs
                        ));
                    }
                }
                if d.weight_kg.is_some_and(|kg| kg <= 0.0) {
                    errors.invalid.push("weight must be positive".to_string());
                }
                Some(RecordDetails::HealthAssessment(d.clone()))
            }
            DetailsDraft::HeatCycle(d) => {
                let cycle_start = required_date(d.cycle_start, "cycle_start", errors)?;
                Some(RecordDetails::HeatCycle(HeatCycleDetails {
                    cycle_start,
                    intensity: optional(&d.intensity),
                    ovulation_detected: d.ovulation_detected,
                }))
            }
        }
    }
}

/// User input for a new record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<RecordStatus>,
    pub priority: Option<Priority>,
    pub horse_id: Option<String>,
    /// Falls back to the horse id when blank.
    pub horse_name: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub completed_date: Option<NaiveDate>,
    pub veterinarian: Option<String>,
    pub assigned_to: Option<String>,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub details: DetailsDraft,
}

impl RecordDraft {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            title: None,
            description: None,
            status: None,
            priority: None,
            horse_id: None,
            horse_name: None,
            scheduled_date: None,
            due_date: None,
            completed_date: None,
            veterinarian: None,
            assigned_to: None,
            estimated_cost: None,
            actual_cost: None,
            tags: Vec::new(),
            notes: None,
            details: DetailsDraft::empty(kind),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.details.kind()
    }

    /// Returns every problem with the draft, or an empty error when it can be
    /// submitted.
    pub fn check(&self) -> FormError {
        match self.build(Utc::now()) {
            Ok(_) => FormError::default(),
            Err(errors) => errors,
        }
    }

    pub fn is_submittable(&self) -> bool {
        self.check().is_empty()
    }

    pub fn validate(&self) -> Result<Record, FormError> {
        self.build(Utc::now())
    }

    /// Like [`RecordDraft::validate`], stamping the record with `now`.
    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<Record, FormError> {
        self.build(now)
    }

    fn build(&self, now: DateTime<Utc>) -> Result<Record, FormError> {
        let mut errors = FormError::default();

        let title = required(&self.title, "title", &mut errors);
        let horse_id = required(&self.horse_id, "horse", &mut errors);
        for (label, cost) in [
            ("estimated cost", self.estimated_cost),
            ("actual cost", self.actual_cost),
        ] {
            if cost.is_some_and(|c| c < 0.0) {
                errors.invalid.push(format!("{} cannot be negative", label));
            }
        }
        let details = self.details.build(self.scheduled_date, &mut errors);

        let (Some(title), Some(horse_id), Some(details)) = (title, horse_id, details) else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        let horse_name = optional(&self.horse_name).unwrap_or_else(|| horse_id.clone());
        let mut record = Record::new_at(title, HorseRef::new(horse_id, horse_name), details, now);
        record.description = optional(&self.description);
        record.status = self.status.unwrap_or_default();
        record.priority = self.priority.unwrap_or_default();
        record.scheduled_date = self.scheduled_date;
        record.due_date = self.due_date;
        record.completed_date = self.completed_date;
        record.veterinarian = optional(&self.veterinarian);
        record.assigned_to = optional(&self.assigned_to);
        record.estimated_cost = self.estimated_cost;
        record.actual_cost = self.actual_cost;
        record.tags = clean_tags(&self.tags);
        record.notes = optional(&self.notes);
        Ok(record)
    }
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn required(value: &Option<String>, field: &'static str, errors: &mut FormError) -> Option<String> {
    let value = optional(value);
    if value.is_none() {
        errors.missing.push(field);
    }
    value
}

fn required_date(
    value: Option<NaiveDate>,
    field: &'static str,
    errors: &mut FormError,
) -> Option<NaiveDate> {
    if value.is_none() {
        errors.missing.push(field);
    }
    value
}

// Trimmed, non-empty, first occurrence wins.
fn clean_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

fn slug(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
