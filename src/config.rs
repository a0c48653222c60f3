use std::path::PathBuf;
use std::time::Duration;

use rust_decimal::{Decimal, RoundingStrategy};

pub const REST_PREFIX: &str = "rest/v1";
pub const DEFAULT_VIEW: &str = "v_portfolio_positions_jpy_v2";
pub const SHOP_SEARCH_URL: &str = "https://yuyu-tei.jp/sell/hocg/s/search";
pub const SNAPSHOT_FILE: &str = "positions.json";

pub const ENV_PROJECT_URL: &str = "HOCG_PROJECT_URL";
pub const ENV_API_KEY: &str = "HOCG_API_KEY";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Columns requested from the positions view.
pub fn position_columns() -> Vec<&'static str> {
    vec![
        "card_code",
        "name_ja",
        "rarity_code",
        "qty",
        "sell_price_jpy",
        "buy_price_jpy",
        "market_value_jpy",
        "image_url",
        "yuyutei_url",
        "buy_url",
        "expansion",
    ]
}

/// Default ordering of the positions view.
pub fn position_order() -> Vec<&'static str> {
    vec!["card_code.asc", "rarity_code.asc"]
}

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("hocg-inventory")
    } else {
        PathBuf::from(".hocg-inventory-cache")
    }
}

// ---------------------------------------------------------------------------
// CurrencyConfig
// ---------------------------------------------------------------------------

/// Fixed-rate display conversion out of JPY.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyConfig {
    pub code: String,
    pub rate: Decimal,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            code: "TWD".to_string(),
            rate: Decimal::new(21, 2),
        }
    }
}

impl CurrencyConfig {
    pub fn new(code: impl Into<String>, rate: Decimal) -> Self {
        Self {
            code: code.into(),
            rate,
        }
    }

    /// Convert a JPY amount, rounded half-up to 2 decimal places.
    pub fn convert(&self, jpy: Decimal) -> Decimal {
        (jpy * self.rate).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}
