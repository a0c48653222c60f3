//! SDK entry-point tests in offline mode against a seeded snapshot cache.

mod common;

use hocg_inventory::{InventoryError, InventorySdk, SnapshotCache, SnapshotSource};

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

#[test]
fn online_build_requires_url_and_key() {
    let tmp = tempfile::tempdir().unwrap();

    let err = InventorySdk::builder()
        .cache_dir(tmp.path())
        .api_key("key")
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, InventoryError::InvalidArgument(_)));
    assert!(err.to_string().contains("project URL"));

    let err = InventorySdk::builder()
        .cache_dir(tmp.path())
        .project_url("https://example.supabase.co")
        .api_key("  ")
        .build()
        .err()
        .unwrap();
    assert!(err.to_string().contains("API key"));
}

#[test]
fn online_build_is_lazy() {
    let tmp = tempfile::tempdir().unwrap();
    let sdk = InventorySdk::builder()
        .cache_dir(tmp.path())
        .project_url("https://example.supabase.co/")
        .api_key("key")
        .build()
        .unwrap();
    assert!(!sdk.is_offline());
    assert!(!sdk.cache().has_snapshot());
}

#[test]
fn display_reports_configuration() {
    let (sdk, _tmp) = common::offline_sdk_with(&common::sample_rows());
    let shown = sdk.to_string();
    assert!(shown.contains("view=v_portfolio_positions_jpy_v2"));
    assert!(shown.contains("offline=true"));
    assert!(shown.contains("currency=TWD"));
}

// ---------------------------------------------------------------------------
// Offline fetch
// ---------------------------------------------------------------------------

#[test]
fn offline_fetch_reads_snapshot() {
    let (sdk, _tmp) = common::offline_sdk_with(&common::sample_rows());
    let snapshot = sdk.fetch().unwrap();
    assert_eq!(snapshot.source(), SnapshotSource::Cache);
    assert_eq!(snapshot.len(), 6);
    assert_eq!(snapshot.positions(), common::sample_positions().as_slice());
}

#[test]
fn offline_fetch_without_snapshot_is_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let sdk = InventorySdk::builder()
        .cache_dir(tmp.path())
        .offline(true)
        .build()
        .unwrap();
    let err = sdk.fetch().unwrap_err();
    assert!(matches!(err, InventoryError::NotFound(_)));
}

#[test]
fn refresh_is_rejected_offline() {
    let (sdk, _tmp) = common::offline_sdk_with(&common::sample_rows());
    assert!(matches!(
        sdk.refresh().unwrap_err(),
        InventoryError::InvalidArgument(_)
    ));
}

#[test]
fn gzipped_snapshot_is_read_transparently() {
    let tmp = tempfile::tempdir().unwrap();
    common::write_gz_snapshot(tmp.path(), &common::sample_rows());
    let sdk = InventorySdk::builder()
        .cache_dir(tmp.path())
        .offline(true)
        .build()
        .unwrap();
    assert_eq!(sdk.fetch().unwrap().len(), 6);
}

#[test]
fn corrupt_snapshot_is_removed() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("positions.json"), "[{\"card_code\": ").unwrap();
    let cache = SnapshotCache::new(Some(tmp.path().to_path_buf())).unwrap();

    let err = cache.load().unwrap_err();
    assert!(err.to_string().contains("corrupt"));
    assert!(!cache.has_snapshot());
}

#[test]
fn saved_snapshot_round_trips_and_clears() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = SnapshotCache::new(Some(tmp.path().join("nested"))).unwrap();
    cache
        .save(&serde_json::to_string(&common::sample_rows()).unwrap())
        .unwrap();
    assert_eq!(cache.load().unwrap().len(), 6);
    assert!(!tmp.path().join("nested/positions.json.tmp").exists());

    cache.clear().unwrap();
    assert!(!cache.has_snapshot());
    assert!(cache.cache_dir.exists());
}

// ---------------------------------------------------------------------------
// Deck comparison through the SDK
// ---------------------------------------------------------------------------

#[test]
fn compare_deck_against_cached_inventory() {
    let (sdk, _tmp) = common::offline_sdk_with(&common::sample_rows());
    let snapshot = sdk.fetch().unwrap();

    let result = sdk
        .compare_deck(
            &snapshot,
            r#"{"oshi":{"hSD01-001":1},"main":{"BP01-001":4,"hbp01-004":2},"cheer":{"hY01-001":20}}"#,
        )
        .unwrap();

    let codes: Vec<String> = result.rows.iter().map(|r| r.identity.to_string()).collect();
    assert_eq!(codes, vec!["hBP01-001", "hSD01-001", "hBP01-004", "hY01-001"]);
    assert_eq!(result.summary.copies_demanded, 27);
    assert_eq!(result.summary.copies_short, 3);
    assert_eq!(result.summary.shortage_value, common::dec(1000));
    assert_eq!(result.shortages().count(), 2);
}

#[test]
fn compare_deck_surfaces_input_errors() {
    let (sdk, _tmp) = common::offline_sdk_with(&common::sample_rows());
    let snapshot = sdk.fetch().unwrap();

    let err = sdk.compare_deck(&snapshot, "{not json").unwrap_err();
    assert!(matches!(err, InventoryError::DeckParse(_)));

    let err = sdk.compare_deck(&snapshot, r#"{"foo": 1}"#).unwrap_err();
    assert!(matches!(err, InventoryError::DeckSchema(_)));
}

#[test]
fn inventory_and_holdings_accessors() {
    let (sdk, _tmp) = common::offline_sdk_with(&common::sample_rows());
    let snapshot = sdk.fetch().unwrap();
    assert_eq!(sdk.inventory(&snapshot).total_owned(), 25);
    assert_eq!(sdk.holdings(&snapshot).total_quantity, 25);
    assert_eq!(sdk.positions(&snapshot).search("azki").len(), 1);
}
