//! Shared fixtures for the inventory integration tests.
//!
//! Provides a small positions snapshot shaped like the REST view's rows
//! (including string-encoded numbers and missing fields) and helpers that
//! seed a temporary cache directory for offline SDK tests.

#![allow(dead_code)]

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use hocg_inventory::models::InventoryPosition;
use hocg_inventory::{InventorySdk, InventorySnapshot};
use rust_decimal::Decimal;

/// Raw JSON rows as the positions view serves them.
pub fn sample_rows() -> serde_json::Value {
    serde_json::json!([
        {
            "card_code": "hBP01-001",
            "name_ja": "ときのそら",
            "rarity_code": "OSR",
            "qty": 1,
            "sell_price_jpy": 500,
            "market_value_jpy": 500,
            "image_url": "https://img.example/hBP01-001_OSR.png",
            "yuyutei_url": "https://yuyu-tei.jp/sell/hocg/card/hbp01/10001"
        },
        {
            "card_code": "HBP01-001",
            "name_ja": "ときのそら",
            "rarity_code": "SEC",
            "qty": "1",
            "sell_price_jpy": "12000",
            "market_value_jpy": null,
            "image_url": "https://img.example/hBP01-001_SEC.png"
        },
        {
            "card_code": "hBP01-004",
            "name_ja": "AZKi",
            "rarity_code": "C",
            "qty": 3,
            "sell_price_jpy": 30,
            "image_url": null
        },
        {
            "card_code": "hSD01-003",
            "name_ja": "ときのそら",
            "rarity_code": "RR",
            "qty": 0,
            "sell_price_jpy": 80
        },
        {
            "card_code": "hY01-001",
            "name_ja": "白エール",
            "rarity_code": "C",
            "qty": 20,
            "sell_price_jpy": null
        },
        {
            "card_code": "",
            "qty": "abc"
        }
    ])
}

pub fn sample_positions() -> Vec<InventoryPosition> {
    serde_json::from_value(sample_rows()).unwrap()
}

pub fn sample_snapshot() -> InventorySnapshot {
    InventorySnapshot::from_positions(sample_positions())
}

pub fn position(code: &str, qty: u32, buy_price: Option<i64>) -> InventoryPosition {
    InventoryPosition {
        buy_price: buy_price.map(Decimal::from),
        ..InventoryPosition::new(code, qty)
    }
}

pub fn dec(n: i64) -> Decimal {
    Decimal::from(n)
}

/// Create an offline SDK whose cache already holds `rows` as its snapshot.
///
/// Returns `(InventorySdk, tempfile::TempDir)`. The caller must keep the
/// `TempDir` alive for the duration of the test.
pub fn offline_sdk_with(rows: &serde_json::Value) -> (InventorySdk, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp_dir.path().join("positions.json"),
        serde_json::to_string(rows).unwrap(),
    )
    .unwrap();
    let sdk = InventorySdk::builder()
        .cache_dir(tmp_dir.path())
        .offline(true)
        .build()
        .unwrap();
    (sdk, tmp_dir)
}

/// Write `rows` as a gzipped snapshot into `dir`.
pub fn write_gz_snapshot(dir: &std::path::Path, rows: &serde_json::Value) {
    let file = std::fs::File::create(dir.join("positions.json.gz")).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder
        .write_all(serde_json::to_string(rows).unwrap().as_bytes())
        .unwrap();
    encoder.finish().unwrap();
}
