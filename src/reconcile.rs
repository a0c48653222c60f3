//! Demand-driven diff of a deck requirement against owned inventory.

use rust_decimal::Decimal;
use tracing::debug;

use crate::aggregate::OwnedQuantityIndex;
use crate::models::{DeckRequirement, Reconciliation, ReconciliationRow, ReconciliationSummary};

/// Compare a deck requirement against owned inventory.
///
/// Only identities the deck asks for produce rows. Rows are ordered by
/// shortage descending, then canonical code ascending. Unknown prices value
/// at zero.
pub fn reconcile(requirement: &DeckRequirement, inventory: &OwnedQuantityIndex) -> Reconciliation {
    let mut rows: Vec<ReconciliationRow> = requirement
        .iter()
        .map(|(identity, needed)| {
            let card = inventory.get(identity);
            let owned = card.map(|c| c.owned).unwrap_or(0);
            let unit_price = card.and_then(|c| c.unit_price());
            let price = unit_price.unwrap_or(Decimal::ZERO);
            let shortage = needed.saturating_sub(owned);

            ReconciliationRow {
                identity: identity.clone(),
                name: card.map(|c| c.name.clone()).unwrap_or_default(),
                image: card.and_then(|c| c.image_url.clone()),
                needed,
                owned,
                shortage,
                surplus: owned.saturating_sub(needed),
                unit_price,
                valuation_of_need: price * Decimal::from(needed),
                valuation_of_shortage: price * Decimal::from(shortage),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.shortage
            .cmp(&a.shortage)
            .then_with(|| a.identity.cmp(&b.identity))
    });

    let summary = summarize(&rows);
    debug!(
        rows = rows.len(),
        copies_short = summary.copies_short,
        "reconciled deck against inventory"
    );
    Reconciliation { rows, summary }
}

fn summarize(rows: &[ReconciliationRow]) -> ReconciliationSummary {
    rows.iter().fold(
        ReconciliationSummary {
            identities_demanded: rows.len(),
            ..ReconciliationSummary::default()
        },
        |mut acc, row| {
            if row.is_short() {
                acc.identities_short += 1;
            }
            acc.copies_demanded += u64::from(row.needed);
            acc.copies_covered += u64::from(row.covered());
            acc.copies_short += u64::from(row.shortage);
            acc.need_value += row.valuation_of_need;
            acc.shortage_value += row.valuation_of_shortage;
            acc
        },
    )
}
