use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// HoldingsSummary — Aggregated value of a position snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldingsSummary {
    pub positions: usize,
    pub distinct_cards: usize,
    pub total_quantity: u64,
    pub total_market_value: Decimal,
    pub currency: String,
    pub converted_market_value: Decimal,
}
