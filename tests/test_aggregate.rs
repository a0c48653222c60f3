//! Inventory aggregation tests against the sample snapshot.

mod common;

use hocg_inventory::models::InventoryPosition;
use hocg_inventory::{aggregate, normalize};

#[test]
fn spellings_of_one_card_are_summed() {
    let index = aggregate(&common::sample_positions());
    assert_eq!(index.owned(&normalize("hBP01-001")), 2);
    assert_eq!(index.get(&normalize("BP01-001")).unwrap().positions, 2);
}

#[test]
fn zero_and_missing_quantities_are_excluded() {
    let index = aggregate(&common::sample_positions());
    assert!(index.get(&normalize("hSD01-003")).is_none());
    assert!(index.get(&normalize("")).is_none());
    assert_eq!(index.len(), 3);
}

#[test]
fn first_supplied_metadata_wins() {
    let index = aggregate(&common::sample_positions());
    let card = index.get(&normalize("hBP01-001")).unwrap();
    assert_eq!(card.name, "ときのそら");
    assert_eq!(
        card.image_url.as_deref(),
        Some("https://img.example/hBP01-001_OSR.png")
    );
    assert_eq!(card.sell_price, Some(common::dec(500)));
    assert_eq!(card.unit_price(), Some(common::dec(500)));
    assert!(card.sell_url.is_some());
}

#[test]
fn later_positions_fill_missing_fields() {
    let first = InventoryPosition {
        name: String::new(),
        ..InventoryPosition::new("hBP01-010", 1)
    };
    let second = InventoryPosition {
        name: "夏色まつり".to_string(),
        image_url: Some("https://img.example/b.png".to_string()),
        ..common::position("hbp01-010", 2, Some(900))
    };
    let index = aggregate(&[first, second]);
    let card = index.get(&normalize("hBP01-010")).unwrap();
    assert_eq!(card.owned, 3);
    assert_eq!(card.name, "夏色まつり");
    assert_eq!(card.buy_price, Some(common::dec(900)));
}

#[test]
fn unknown_price_stays_unknown() {
    let index = aggregate(&common::sample_positions());
    let cheer = index.get(&normalize("hY01-001")).unwrap();
    assert_eq!(cheer.owned, 20);
    assert_eq!(cheer.unit_price(), None);
}

#[test]
fn owned_total_is_conserved() {
    let positions = common::sample_positions();
    let expected: u64 = positions
        .iter()
        .map(|p| u64::from(p.quantity.unwrap_or(0)))
        .sum();
    let index = aggregate(&positions);
    assert_eq!(index.total_owned(), expected);
    assert_eq!(expected, 25);
}

#[test]
fn empty_snapshot_gives_empty_index() {
    let index = aggregate(&Vec::<InventoryPosition>::new());
    assert!(index.is_empty());
    assert_eq!(index.total_owned(), 0);
}
