use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;
use crate::config;
use crate::normalize::{normalize, CardIdentity};

// ---------------------------------------------------------------------------
// InventoryPosition — One owned card/rarity row from the positions view
// ---------------------------------------------------------------------------

/// One owned-card record as served by the positions view.
///
/// Every field is optional upstream. Missing or malformed values degrade to
/// an empty string or `None` instead of failing the whole snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryPosition {
    #[serde(
        rename = "card_code",
        alias = "code",
        default,
        deserialize_with = "lenient::text"
    )]
    pub raw_code: String,
    #[serde(
        rename = "rarity_code",
        alias = "rarity",
        default,
        deserialize_with = "lenient::text"
    )]
    pub rarity: String,
    #[serde(
        rename = "name_ja",
        alias = "name",
        default,
        deserialize_with = "lenient::text"
    )]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub image_url: Option<String>,
    #[serde(
        rename = "qty",
        alias = "quantity",
        default,
        deserialize_with = "lenient::opt_quantity"
    )]
    pub quantity: Option<u32>,
    #[serde(
        rename = "sell_price_jpy",
        alias = "sell_price",
        default,
        deserialize_with = "lenient::opt_decimal"
    )]
    pub sell_price: Option<Decimal>,
    #[serde(
        rename = "buy_price_jpy",
        alias = "buy_price",
        default,
        deserialize_with = "lenient::opt_decimal"
    )]
    pub buy_price: Option<Decimal>,
    #[serde(
        rename = "market_value_jpy",
        alias = "market_value",
        default,
        deserialize_with = "lenient::opt_decimal"
    )]
    pub market_value: Option<Decimal>,
    #[serde(
        rename = "yuyutei_url",
        alias = "sell_url",
        default,
        deserialize_with = "lenient::opt_text"
    )]
    pub sell_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub buy_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub expansion: Option<String>,
}

impl InventoryPosition {
    pub fn new(raw_code: impl Into<String>, quantity: u32) -> Self {
        Self {
            raw_code: raw_code.into(),
            quantity: Some(quantity),
            ..Self::default()
        }
    }

    pub fn identity(&self) -> CardIdentity {
        normalize(&self.raw_code)
    }

    /// Owned copies; a missing quantity counts as zero.
    pub fn owned(&self) -> u32 {
        self.quantity.unwrap_or(0)
    }

    /// Unit price used to value copies that still have to be acquired.
    ///
    /// Prefers the explicit buy price and falls back to the shop sell price,
    /// which is what the collector would pay for another copy.
    pub fn unit_price(&self) -> Option<Decimal> {
        self.buy_price.or(self.sell_price)
    }

    /// Market value of the position: the upstream value when present,
    /// otherwise quantity times sell price, otherwise zero.
    pub fn market_value(&self) -> Decimal {
        self.market_value
            .or_else(|| {
                self.sell_price
                    .map(|price| price * Decimal::from(self.owned()))
            })
            .unwrap_or(Decimal::ZERO)
    }

    /// Shop page for this card: the stored link, or a search by raw code.
    pub fn shop_url(&self) -> Option<String> {
        if let Some(url) = &self.sell_url {
            return Some(url.clone());
        }
        let code = self.raw_code.trim();
        if code.is_empty() {
            return None;
        }
        // Spaces as %20, not form-style `+`; a literal `+` is already %2B.
        reqwest::Url::parse_with_params(config::SHOP_SEARCH_URL, &[("search_word", code)])
            .ok()
            .map(|url| String::from(url).replace('+', "%20"))
    }

    /// Case-insensitive substring match on raw code or name.
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.raw_code.to_lowercase().contains(needle_lower)
            || self.name.to_lowercase().contains(needle_lower)
    }
}
