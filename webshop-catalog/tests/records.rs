use webshop_catalog::{CatalogType, Record, RecordState};

fn mug_type() -> CatalogType {
    CatalogType {
        id: 1,
        type_name: "Mug".to_string(),
    }
}

#[test]
fn constructors_set_state() {
    assert_eq!(Record::added(mug_type()).state, RecordState::Added);
    assert_eq!(Record::modified(mug_type()).state, RecordState::Modified);
    assert_eq!(Record::unchanged(mug_type()).state, RecordState::Unchanged);
    assert_eq!(Record::deleted(mug_type()).state, RecordState::Deleted);
}

#[test]
fn pending_covers_added_and_modified_only() {
    assert!(Record::added(mug_type()).is_pending());
    assert!(Record::modified(mug_type()).is_pending());
    assert!(!Record::unchanged(mug_type()).is_pending());
    assert!(!Record::deleted(mug_type()).is_pending());
}

#[test]
fn accept_marks_record_unchanged() {
    let mut record = Record::added(mug_type());
    record.accept();
    assert_eq!(record.state, RecordState::Unchanged);
    assert!(!record.is_pending());
}
