use assetimport_types::{
    AssetPayload, AssetRecord, ImportReport, ImportSummary, RowOutcome, RowStatus, RunMode,
};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

#[test]
fn row_status_serializes_snake_case() {
    assert_eq!(
        serde_json::to_value(RowStatus::Imported).expect("serialize"),
        serde_json::json!("imported")
    );
    assert_eq!(
        serde_json::to_value(RowStatus::Duplicate).expect("serialize"),
        serde_json::json!("duplicate")
    );
    assert_eq!(
        serde_json::to_value(RowStatus::Error).expect("serialize"),
        serde_json::json!("error")
    );
}

#[test]
fn empty_payload_only_carries_status() {
    let value = serde_json::to_value(AssetPayload::default()).expect("serialize");
    assert_eq!(value, serde_json::json!({ "asset_status": 1 }));
}

#[test]
fn synonym_keys_are_written_together() {
    let mut payload = AssetPayload::default();
    payload.set_asset_name("Desk".to_string());
    payload.set_asset_type("Furniture".to_string());

    let value = serde_json::to_value(&payload).expect("serialize");
    assert_eq!(value["asset_name"], "Desk");
    assert_eq!(value["name_asset"], "Desk");
    assert_eq!(value["asset_type"], "Furniture");
    assert_eq!(value["type"], "Furniture");
}

#[test]
fn record_flattens_payload_next_to_id() {
    let mut payload = AssetPayload::default();
    payload.price = Some(1200.0);
    payload.purchase_at = Some(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap());
    let mut record = AssetRecord::new("A1", payload);
    record.created_at = Some(Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap());

    let value = serde_json::to_value(&record).expect("serialize");
    assert_eq!(value["asset_id"], "A1");
    assert_eq!(value["price"], 1200.0);
    assert_eq!(value["purchase_at"], "2024-01-15T00:00:00Z");
    assert_eq!(value["created_at"], "2025-06-01T08:30:00Z");
    assert!(value.get("payload").is_none());

    let back: AssetRecord = serde_json::from_value(value).expect("deserialize");
    assert_eq!(back, record);
}

#[test]
fn pending_record_omits_created_at() {
    let record = AssetRecord::new("A1", AssetPayload::default());
    let value = serde_json::to_value(&record).expect("serialize");
    assert!(value.get("created_at").is_none());
}

#[test]
fn run_mode_requires_commit_without_dry_run() {
    assert_eq!(RunMode::from_flags(false, false), RunMode::DryRun);
    assert_eq!(RunMode::from_flags(true, false), RunMode::Commit);
    assert_eq!(RunMode::from_flags(true, true), RunMode::DryRun);
    assert_eq!(RunMode::default(), RunMode::DryRun);
}

#[test]
fn report_push_updates_summary() {
    let mut report = ImportReport::new(RunMode::DryRun, "assets.csv");
    report.push(RowOutcome {
        row: 1,
        status: RowStatus::Imported,
        asset_id: Some("A1".to_string()),
        message: None,
    });
    report.push(RowOutcome {
        row: 2,
        status: RowStatus::Duplicate,
        asset_id: Some("A1".to_string()),
        message: Some("duplicate asset_id".to_string()),
    });
    report.push(RowOutcome {
        row: 3,
        status: RowStatus::Error,
        asset_id: None,
        message: Some("missing asset_id".to_string()),
    });

    assert_eq!(
        report.summary,
        ImportSummary {
            rows: 0,
            imported: 1,
            duplicates: 1,
            errors: 1,
        }
    );
    assert_eq!(report.summary.processed(), 3);
    assert_eq!(report.schema, "assetimport.report.v1");
}
