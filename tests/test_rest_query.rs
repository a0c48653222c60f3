//! PostgREST query builder and response decoding tests.

mod common;

use hocg_inventory::rest::{decode_positions, RestClient};
use hocg_inventory::{InventoryError, RestQuery};
use std::time::Duration;

fn param<'a>(params: &'a [(String, String)], key: &str) -> Vec<&'a str> {
    params
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .collect()
}

#[test]
fn default_query_selects_everything() {
    let (view, params) = RestQuery::new("v_positions").build();
    assert_eq!(view, "v_positions");
    assert_eq!(params, vec![("select".to_string(), "*".to_string())]);
}

#[test]
fn positions_query_uses_configured_columns_and_order() {
    let (view, params) = RestQuery::positions("v_portfolio_positions_jpy_v2").build();
    assert_eq!(view, "v_portfolio_positions_jpy_v2");
    let select = param(&params, "select");
    assert!(select[0].starts_with("card_code,name_ja,rarity_code,qty"));
    assert_eq!(param(&params, "order"), vec!["card_code.asc,rarity_code.asc"]);
}

#[test]
fn filters_limit_and_offset() {
    let (_, params) = RestQuery::new("v")
        .select(&["card_code", "qty"])
        .where_gt("qty", "0")
        .where_eq("rarity_code", "SEC")
        .where_contains("name_ja", "そら*")
        .order_by(&["card_code.desc"])
        .limit(50)
        .offset(100)
        .build();

    assert_eq!(param(&params, "select"), vec!["card_code,qty"]);
    assert_eq!(param(&params, "qty"), vec!["gt.0"]);
    assert_eq!(param(&params, "rarity_code"), vec!["eq.SEC"]);
    assert_eq!(param(&params, "name_ja"), vec!["ilike.*そら*"]);
    assert_eq!(param(&params, "limit"), vec!["50"]);
    assert_eq!(param(&params, "offset"), vec!["100"]);
}

#[test]
fn view_url_joins_project_and_prefix() {
    let client = RestClient::new("https://example.supabase.co/", "key", Duration::from_secs(5));
    assert_eq!(
        client.view_url("v_portfolio_positions_jpy_v2"),
        "https://example.supabase.co/rest/v1/v_portfolio_positions_jpy_v2"
    );
}

#[test]
fn response_body_decodes_into_positions() {
    let body = common::sample_rows().to_string();
    let positions = decode_positions(&body).unwrap();
    assert_eq!(positions.len(), 6);
    assert_eq!(positions[1].owned(), 1);
    assert_eq!(positions[5].owned(), 0);
}

#[test]
fn non_array_body_is_a_json_error() {
    let err = decode_positions(r#"{"message":"permission denied"}"#).unwrap_err();
    assert!(matches!(err, InventoryError::Json(_)));
}
