//! Dataset persistence tests: JSON documents, merge policies, field listing

use pretty_assertions::assert_eq;
use royalbit_tabula::core::RecordService;
use royalbit_tabula::store::{DatasetStore, JsonFileStore};
use royalbit_tabula::types::{record, DatasetState, Record};
use royalbit_tabula::TabulaError;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, RecordService<JsonFileStore>) {
    let dir = TempDir::new().unwrap();
    let service = RecordService::new(JsonFileStore::new(dir.path().join("uploads")));
    (dir, service)
}

fn a(value: &str) -> Record {
    record([("A", value)])
}

// ═══════════════════════════════════════════════════════════════════════════
// ROUND TRIP
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_save_then_load_preserves_order_and_field_order() {
    let (_dir, service) = setup();
    let records = vec![
        record([("Zeta", json!("z")), ("Alpha", json!("a"))]),
        record([("Alpha", json!(1)), ("Zeta", json!(true))]),
        record([("Mid", json!(null))]),
    ];

    service.store().save("mixed", &records).unwrap();
    let loaded = service.store().load("mixed").unwrap();
    assert_eq!(loaded, records);

    let keys: Vec<&String> = loaded[0].keys().collect();
    assert_eq!(keys, ["Zeta", "Alpha"]);

    service.store().save("mixed", &loaded).unwrap();
    assert_eq!(service.fetch_all("mixed").unwrap(), records);
}

#[test]
fn test_document_layout() {
    let (_dir, service) = setup();
    service
        .import_bulk("parts", vec![record([("Name", "bolt"), ("Qty", "4")])])
        .unwrap();

    let path = service.store().path_for("parts");
    assert_eq!(path.file_name().unwrap(), "parts.json");
    let content = fs::read_to_string(path).unwrap();
    assert_eq!(
        content,
        "[\n  {\n    \"Name\": \"bolt\",\n    \"Qty\": \"4\"\n  }\n]"
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// MERGE POLICIES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_append_duplicate_is_dropped() {
    let (_dir, service) = setup();
    service.import_bulk("c", vec![a("1")]).unwrap();
    assert_eq!(service.import_bulk("c", vec![a("1")]).unwrap(), vec![a("1")]);
}

#[test]
fn test_prepend_duplicate_keeps_front() {
    let (_dir, service) = setup();
    service.import_bulk("c", vec![a("1"), a("2")]).unwrap();
    assert_eq!(
        service.add_single("c", a("1")).unwrap(),
        vec![a("1"), a("2")]
    );
}

#[test]
fn test_import_bulk_twice_equals_once() {
    let (_dir, service) = setup();
    let batch = vec![a("1"), a("2"), a("1"), record([("A", ""), ("B", "")])];

    let once = service.import_bulk("c", batch.clone()).unwrap();
    let on_disk_once = fs::read_to_string(service.store().path_for("c")).unwrap();

    service.import_bulk("c", batch).unwrap();
    let on_disk_twice = fs::read_to_string(service.store().path_for("c")).unwrap();

    assert_eq!(on_disk_once, on_disk_twice);
    assert_eq!(service.fetch_all("c").unwrap(), once);
}

#[test]
fn test_categories_are_independent() {
    let (_dir, service) = setup();
    service.import_bulk("parts", vec![a("1")]).unwrap();
    service.import_bulk("tools", vec![a("2")]).unwrap();
    assert_eq!(service.fetch_all("parts").unwrap(), vec![a("1")]);
    assert_eq!(service.fetch_all("tools").unwrap(), vec![a("2")]);
}

// ═══════════════════════════════════════════════════════════════════════════
// FIELD LISTING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_list_fields_absent_category() {
    let (_dir, service) = setup();
    let listing = service.list_fields("nothing").unwrap();
    assert!(listing.fields.is_empty());
    assert_eq!(listing.state, DatasetState::Missing);
}

#[test]
fn test_list_fields_uses_first_record() {
    let (_dir, service) = setup();
    service
        .import_bulk("c", vec![record([("B", "1"), ("A", "2")])])
        .unwrap();
    service.add_single("c", record([("X", "9")])).unwrap();

    let listing = service.list_fields("c").unwrap();
    assert_eq!(listing.fields, vec!["X".to_string()]);
}

// ═══════════════════════════════════════════════════════════════════════════
// FAILURES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_corrupt_document_blocks_writes() {
    let (dir, service) = setup();
    let uploads = dir.path().join("uploads");
    fs::create_dir_all(&uploads).unwrap();
    fs::write(uploads.join("broken.json"), "[{\"A\": ").unwrap();

    assert!(matches!(
        service.fetch_all("broken"),
        Err(TabulaError::StoreReadCorrupt { .. })
    ));
    assert!(matches!(
        service.import_bulk("broken", vec![a("1")]),
        Err(TabulaError::StoreReadCorrupt { .. })
    ));
    // Not repaired or overwritten
    assert_eq!(
        fs::read_to_string(uploads.join("broken.json")).unwrap(),
        "[{\"A\": "
    );
}

#[test]
fn test_invalid_category_writes_nothing() {
    let (dir, service) = setup();
    assert!(matches!(
        service.import_bulk("../escape", vec![a("1")]),
        Err(TabulaError::InvalidCategory(_))
    ));
    assert!(!dir.path().join("escape.json").exists());
    assert!(!dir.path().join("uploads").exists());
}
