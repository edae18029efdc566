use std::fs;
use std::path::Path;

use course_core::schedule::{AttendanceSheet, Catalog, Course};
use course_core::storage::{JsonStorage, StorageBackend};
use tempfile::tempdir;

fn sample_catalog() -> Catalog {
    let mut catalog = Catalog::new("Spring Term");
    let course: Course = serde_json::from_str(
        r#"{
            "_id": "c1",
            "name": "Open Water",
            "cost": "95",
            "discountPct": "5",
            "courseDatesTimes": [
                { "date": "2024-04-01", "start_time": "16:00", "end_time": "18:00" }
            ]
        }"#,
    )
    .unwrap();
    catalog.add_course(course);
    catalog
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

#[test]
fn catalog_survives_a_save_load_cycle_intact() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), None).unwrap();

    let catalog = sample_catalog();
    storage.save(&catalog, "Spring Term").unwrap();

    let loaded = storage.load("Spring Term").unwrap();
    assert_eq!(loaded.name, "Spring Term");
    assert_eq!(loaded.course_count(), 1);
    let course = loaded.course("c1").unwrap();
    assert_eq!(course.cost_per_student, 95.0);
    assert_eq!(course.discount, course_core::schedule::Discount::percent(5.0));
    assert_eq!(course.sessions.len(), 1);
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), Some(2)).unwrap();

    let mut catalog = sample_catalog();
    storage.save(&catalog, "reliable").unwrap();
    let path = storage.catalog_path("reliable");
    let original = fs::read_to_string(&path).expect("read original file");

    // A directory squatting on the staging path forces File::create to fail.
    let tmp_path = tmp_path_for(&path);
    fs::create_dir_all(&tmp_path).unwrap();

    catalog.add_course(Course::new("Nitrox"));
    let result = storage.save(&catalog, "reliable");
    assert!(result.is_err());

    let current = fs::read_to_string(&path).expect("read after failure");
    assert_eq!(current, original);
}

#[test]
fn noted_backups_are_listed_and_pruned_to_retention() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), Some(2)).unwrap();
    let catalog = sample_catalog();

    storage.backup(&catalog, "term", Some("first")).unwrap();
    storage.backup(&catalog, "term", Some("second")).unwrap();
    storage.backup(&catalog, "term", Some("third")).unwrap();

    let backups = storage.list_backups("term").unwrap();
    assert_eq!(backups.len(), 2);
    for name in &backups {
        assert!(name.starts_with("term_"));
        assert!(name.ends_with(".json"));
    }
}

#[test]
fn restore_replaces_the_live_catalog() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), None).unwrap();

    let catalog = sample_catalog();
    storage.backup(&catalog, "term", None).unwrap();
    let backups = storage.list_backups("term").unwrap();
    assert_eq!(backups.len(), 1);

    let restored = storage.restore("term", &backups[0]).unwrap();
    assert_eq!(restored.name, "Spring Term");
    assert!(storage.catalog_path("term").exists());
}

#[test]
fn attendance_sheets_fall_back_to_empty_when_missing() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), None).unwrap();

    assert!(storage.load_attendance("ghost").is_empty());

    let mut sheet = AttendanceSheet::new();
    sheet.mark("ins-1", "2024-04-01");
    sheet.mark("ins-1", "2024-04-03");
    storage.save_attendance("c1", &sheet).unwrap();

    let loaded = storage.load_attendance("c1");
    assert_eq!(loaded.present_count("ins-1"), 2);

    // Corrupt file degrades to empty rather than erroring.
    fs::write(storage.attendance_path("c1"), "{ not json").unwrap();
    assert!(storage.load_attendance("c1").is_empty());
}

#[test]
fn last_catalog_pointer_round_trips_through_state() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), None).unwrap();

    assert_eq!(storage.last_catalog().unwrap(), None);
    storage.record_last_catalog(Some("Spring Term")).unwrap();
    assert_eq!(
        storage.last_catalog().unwrap(),
        Some("spring_term".to_string())
    );
    storage.record_last_catalog(None).unwrap();
    assert_eq!(storage.last_catalog().unwrap(), None);
}
