use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, Result};
use crate::normalize::CardIdentity;

// ---------------------------------------------------------------------------
// ReconciliationRow — Demand vs. supply for one card identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationRow {
    pub identity: CardIdentity,
    pub name: String,
    pub image: Option<String>,
    pub needed: u32,
    pub owned: u32,
    pub shortage: u32,
    pub surplus: u32,
    pub unit_price: Option<Decimal>,
    pub valuation_of_need: Decimal,
    pub valuation_of_shortage: Decimal,
}

impl ReconciliationRow {
    pub fn is_short(&self) -> bool {
        self.shortage > 0
    }

    /// Copies of the requirement already covered by inventory.
    pub fn covered(&self) -> u32 {
        self.needed.min(self.owned)
    }
}

// ---------------------------------------------------------------------------
// ReconciliationSummary — Totals over all rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    /// Distinct identities the deck asks for.
    pub identities_demanded: usize,
    /// Distinct identities with a shortage.
    pub identities_short: usize,
    pub copies_demanded: u64,
    pub copies_covered: u64,
    pub copies_short: u64,
    pub need_value: Decimal,
    pub shortage_value: Decimal,
}

impl ReconciliationSummary {
    pub fn is_complete(&self) -> bool {
        self.copies_short == 0
    }
}

// ---------------------------------------------------------------------------
// Reconciliation — Ordered rows plus summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub rows: Vec<ReconciliationRow>,
    pub summary: ReconciliationSummary,
}

impl Reconciliation {
    /// Rows that still need copies, in display order.
    pub fn shortages(&self) -> impl Iterator<Item = &ReconciliationRow> {
        self.rows.iter().filter(|r| r.is_short())
    }
}

// ---------------------------------------------------------------------------
// ComparisonState — What a presentation layer shows for the deck check
// ---------------------------------------------------------------------------

/// Distinguishes "never ran" from "failed" from "ran with zero shortages".
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ComparisonState {
    #[default]
    NotRun,
    Failed(String),
    Succeeded(Reconciliation),
}

impl ComparisonState {
    pub fn rows(&self) -> &[ReconciliationRow] {
        match self {
            ComparisonState::Succeeded(r) => &r.rows,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ComparisonState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

impl From<Result<Reconciliation>> for ComparisonState {
    fn from(result: Result<Reconciliation>) -> Self {
        match result {
            Ok(r) => ComparisonState::Succeeded(r),
            Err(e) => ComparisonState::Failed(e.to_string()),
        }
    }
}

impl From<InventoryError> for ComparisonState {
    fn from(e: InventoryError) -> Self {
        ComparisonState::Failed(e.to_string())
    }
}
