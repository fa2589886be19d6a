mod support;

use chrono::{Local, NaiveDate, SecondsFormat, TimeZone, Utc};
use staycount_core::db::open_db_in_memory;
use staycount_core::{
    export_json, export_records, import_json, parse_import, IntervalStore, SqliteRangeRepository,
    StoreError, TransferError,
};
use std::collections::BTreeSet;
use support::{day, range, FailOn, MemoryRangeRepository};

#[test]
fn export_then_import_reproduces_the_same_spans() {
    let source_repo = MemoryRangeRepository::with_rows(&[
        (day(2024, 6, 1), day(2024, 6, 5)),
        (day(2024, 1, 1), day(2024, 1, 10)),
        (day(2024, 1, 8), day(2024, 1, 15)),
    ]);
    let source = IntervalStore::init(&source_repo).unwrap();
    let payload = export_json(source.ranges()).unwrap();

    let conn = open_db_in_memory().unwrap();
    let mut target = IntervalStore::init(SqliteRangeRepository::try_new(&conn).unwrap()).unwrap();
    let imported = import_json(&mut target, &payload).unwrap();

    assert_eq!(imported, 3);
    let spans = |ranges: &[staycount_core::DateRange]| {
        ranges
            .iter()
            .map(|stored| (stored.start, stored.end))
            .collect::<BTreeSet<_>>()
    };
    assert_eq!(spans(source.ranges()), spans(target.ranges()));
}

#[test]
fn export_uses_documented_wire_shape() {
    let ranges = vec![range(day(2024, 1, 1), day(2024, 1, 10)).with_id(7)];

    let value: serde_json::Value = serde_json::from_str(&export_json(&ranges).unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{ "id": 7, "start": "2024-01-01", "end": "2024-01-10" }])
    );

    let unsaved = export_records(&[range(day(2024, 2, 1), day(2024, 2, 1))]);
    let value = serde_json::to_value(&unsaved).unwrap();
    assert_eq!(value, serde_json::json!([{ "start": "2024-02-01", "end": "2024-02-01" }]));
}

#[test]
fn non_array_payload_is_rejected_and_collection_untouched() {
    let repo = MemoryRangeRepository::with_rows(&[(day(2024, 1, 1), day(2024, 1, 10))]);
    let mut store = IntervalStore::init(&repo).unwrap();
    let before = store.ranges().to_vec();

    for payload in [
        r#"{"start": "2024-01-01", "end": "2024-01-02"}"#,
        "42",
        "not json at all",
    ] {
        let err = import_json(&mut store, payload).unwrap_err();
        assert!(matches!(err, TransferError::InvalidFormat(_)), "{payload}: {err}");
    }

    assert_eq!(store.ranges(), before.as_slice());
    assert_eq!(repo.stored(), before);
}

#[test]
fn malformed_record_is_rejected_before_clearing() {
    let repo = MemoryRangeRepository::with_rows(&[(day(2024, 1, 1), day(2024, 1, 10))]);
    let mut store = IntervalStore::init(&repo).unwrap();

    let payload = r#"[
        {"start": "2024-03-01", "end": "2024-03-05"},
        {"start": "2024-13-01", "end": "2024-03-05"}
    ]"#;
    let err = import_json(&mut store, payload).unwrap_err();

    assert!(err.to_string().contains("record 1"), "{err}");
    assert_eq!(store.ranges().len(), 1);
    assert_eq!(repo.stored().len(), 1);

    let missing_end = r#"[{"start": "2024-03-01"}]"#;
    assert!(matches!(
        import_json(&mut store, missing_end),
        Err(TransferError::InvalidFormat(_))
    ));
}

#[test]
fn import_replaces_collection_and_ignores_imported_ids() {
    let repo = MemoryRangeRepository::with_rows(&[(day(2023, 5, 1), day(2023, 5, 9))]);
    let mut store = IntervalStore::init(&repo).unwrap();

    let payload = r#"[
        {"id": 900, "start": "2024-01-10T00:00:00.000", "end": "2024-01-01T08:30:00"},
        {"start": "2024-06-01", "end": "2024-06-05"}
    ]"#;
    let imported = import_json(&mut store, payload).unwrap();

    assert_eq!(imported, 2);
    let ranges = store.ranges();
    assert_eq!(ranges.len(), 2);
    assert_eq!((ranges[0].start, ranges[0].end), (day(2024, 1, 1), day(2024, 1, 10)));
    assert_eq!((ranges[1].start, ranges[1].end), (day(2024, 6, 1), day(2024, 6, 5)));
    assert!(ranges.iter().all(|stored| stored.id != Some(900)));
}

#[test]
fn empty_array_import_clears_collection() {
    let repo = MemoryRangeRepository::with_rows(&[(day(2024, 1, 1), day(2024, 1, 10))]);
    let mut store = IntervalStore::init(&repo).unwrap();

    assert_eq!(import_json(&mut store, "[]").unwrap(), 0);
    assert!(store.ranges().is_empty());
}

#[test]
fn storage_failure_after_clear_is_reported() {
    let repo = MemoryRangeRepository::with_rows(&[(day(2024, 1, 1), day(2024, 1, 10))]);
    let mut store = IntervalStore::init(&repo).unwrap();
    repo.fail_on(Some(FailOn::Add));

    let err = import_json(
        &mut store,
        r#"[{"start": "2024-02-01", "end": "2024-02-03"}]"#,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        TransferError::Store(StoreError::Persistence(_))
    ));
    assert!(store.ranges().is_empty());
    assert!(repo.stored().is_empty());
}

#[test]
fn parse_import_validates_without_a_store() {
    let parsed = parse_import(r#"[{"start": "2024-02-03", "end": "2024-02-01"}]"#).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].days(), 3);
    assert_eq!(parsed[0].id, None);
}

#[test]
fn imported_ids_of_any_json_type_are_ignored() {
    let parsed = parse_import(
        r#"[
            {"id": "a1", "start": "2024-01-01", "end": "2024-01-02"},
            {"id": 3.0, "start": "2024-02-01", "end": "2024-02-01"},
            {"id": null, "start": "2024-03-01", "end": "2024-03-04"},
            {"id": {"nested": true}, "start": "2024-04-01", "end": "2024-04-01"}
        ]"#,
    )
    .unwrap();

    assert_eq!(parsed.len(), 4);
    assert!(parsed.iter().all(|imported| imported.id.is_none()));
    assert_eq!(parsed[2].days(), 4);
}

#[test]
fn timestamp_of_local_midnight_imports_as_that_local_day() {
    let local_midnight = |date: NaiveDate| {
        Local
            .from_local_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
            .earliest()
            .unwrap()
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    };
    let payload = serde_json::json!([{
        "start": local_midnight(day(2024, 1, 10)),
        "end": local_midnight(day(2024, 1, 12)),
    }])
    .to_string();

    let parsed = parse_import(&payload).unwrap();

    assert_eq!((parsed[0].start, parsed[0].end), (day(2024, 1, 10), day(2024, 1, 12)));
}
