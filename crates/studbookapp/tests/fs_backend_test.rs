use chrono::{NaiveDate, TimeZone, Utc};
use studbookapp::api::StudbookApi;
use studbookapp::error::StudbookError;
use studbookapp::model::{
    FoalSex, FoalingDetails, HorseRef, PregnancyDetails, Record, RecordDetails, RecordStatus,
};
use studbookapp::store::backend::SnapshotBackend;
use studbookapp::store::fs_backend::FsBackend;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::in_dir(dir.path());
    (dir, backend)
}

fn records() -> Vec<Record> {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
    let bred = NaiveDate::from_ymd_opt(2025, 4, 20).unwrap();
    vec![
        Record::new_at(
            "In foal",
            HorseRef::new("h-bella", "Bella"),
            RecordDetails::Pregnancy(PregnancyDetails::from_breeding_date(bred)),
            now,
        ),
        Record::new_at(
            "Filly born",
            HorseRef::new("h-bella", "Bella"),
            RecordDetails::Foaling(FoalingDetails {
                foaling_date: NaiveDate::from_ymd_opt(2026, 3, 26).unwrap(),
                foal_sex: Some(FoalSex::Filly),
                foal_name: Some("Star".into()),
                complications: None,
            }),
            now,
        )
        .with_status(RecordStatus::Completed)
        .with_tags(["foaling-26"]),
    ]
}

#[test]
fn test_missing_file_loads_empty() {
    let (_dir, backend) = setup();
    assert!(backend.load().unwrap().is_empty());
}

#[test]
fn test_empty_file_loads_empty() {
    let (dir, backend) = setup();
    fs::write(dir.path().join("records.json"), "  \n").unwrap();
    assert!(backend.load().unwrap().is_empty());
}

#[test]
fn test_save_then_load_keeps_records_and_order() {
    let (_dir, backend) = setup();
    let saved = records();

    backend.save(&saved).unwrap();
    let loaded = backend.load().unwrap();

    assert_eq!(loaded, saved);
    assert_eq!(loaded[0].title, "In foal");
}

#[test]
fn test_atomic_write_artifacts() {
    let (dir, backend) = setup();
    backend.save(&records()).unwrap();
    backend.save(&records()[..1]).unwrap();

    assert_eq!(backend.load().unwrap().len(), 1);

    // Verify NO .tmp files are left behind
    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_failed_rename_removes_tmp_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.json");
    fs::create_dir(&path).unwrap();
    let backend = FsBackend::new(&path);

    assert!(matches!(
        backend.save(&records()),
        Err(StudbookError::Io(_))
    ));

    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stud").join("2026").join("records.json");
    let backend = FsBackend::new(&path);

    backend.save(&records()).unwrap();

    assert!(path.exists());
    assert_eq!(backend.location(), path);
}

#[test]
fn test_on_disk_format_is_tagged_json() {
    let (dir, backend) = setup();
    backend.save(&records()).unwrap();

    let raw = fs::read_to_string(dir.path().join("records.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["details"]["type"], "pregnancy");
    assert_eq!(value[0]["details"]["expected_foaling_date"], "2026-03-26");
    assert_eq!(value[1]["details"]["foal_sex"], "filly");
    assert_eq!(value[1]["status"], "completed");
}

#[test]
fn test_optional_fields_may_be_absent_on_disk() {
    let (dir, backend) = setup();
    let raw = r#"[{
        "id": "heat_abc_123456789",
        "title": "Teasing",
        "status": "scheduled",
        "priority": "low",
        "horse": {"id": "h-bella", "name": "Bella"},
        "created_at": "2026-04-01T08:00:00Z",
        "updated_at": "2026-04-01T08:00:00Z",
        "details": {"type": "heat_cycle", "cycle_start": "2026-04-02"}
    }]"#;
    fs::write(dir.path().join("records.json"), raw).unwrap();

    let loaded = backend.load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(loaded[0].tags.is_empty());
    assert_eq!(loaded[0].due_date, None);
}

#[test]
fn test_corrupt_file_is_a_serialization_error() {
    let (dir, backend) = setup();
    fs::write(dir.path().join("records.json"), "{not json").unwrap();

    assert!(matches!(
        backend.load(),
        Err(StudbookError::Serialization(_))
    ));
}

#[test]
fn test_api_round_trip_through_disk() {
    let (dir, backend) = setup();
    let saved = records();
    backend.save(&saved).unwrap();
    let id = saved[0].id.clone();

    let mut api = StudbookApi::open(FsBackend::in_dir(dir.path())).unwrap();
    api.delete_record(&id).unwrap();

    let reopened = StudbookApi::open(FsBackend::in_dir(dir.path())).unwrap();
    assert_eq!(reopened.board().store().len(), 1);
    assert!(reopened.board().get_record(&id).is_none());
}
