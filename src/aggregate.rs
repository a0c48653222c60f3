//! Collapse a position snapshot into owned quantity per card identity.
//!
//! Several positions (different rarities or prints) can share one identity.
//! Quantities are summed; display metadata is taken from the first position
//! that supplies each field and never overwritten afterwards.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::InventoryPosition;
use crate::normalize::CardIdentity;

// ---------------------------------------------------------------------------
// CardSummary — Representative metadata for one identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardSummary {
    pub owned: u32,
    pub name: String,
    pub image_url: Option<String>,
    pub buy_price: Option<Decimal>,
    pub sell_price: Option<Decimal>,
    pub sell_url: Option<String>,
    pub buy_url: Option<String>,
    pub expansion: Option<String>,
    /// Number of positions folded into this identity.
    pub positions: usize,
}

impl CardSummary {
    /// Price used to value copies the collector still has to buy.
    pub fn unit_price(&self) -> Option<Decimal> {
        self.buy_price.or(self.sell_price)
    }

    fn absorb(&mut self, position: &InventoryPosition) {
        self.owned = self.owned.saturating_add(position.owned());
        self.positions += 1;

        if self.name.is_empty() && !position.name.is_empty() {
            self.name = position.name.clone();
        }
        fill(&mut self.image_url, &position.image_url);
        fill(&mut self.buy_price, &position.buy_price);
        fill(&mut self.sell_price, &position.sell_price);
        fill(&mut self.sell_url, &position.sell_url);
        fill(&mut self.buy_url, &position.buy_url);
        fill(&mut self.expansion, &position.expansion);
    }
}

fn fill<T: Clone>(slot: &mut Option<T>, candidate: &Option<T>) {
    if slot.is_none() {
        slot.clone_from(candidate);
    }
}

// ---------------------------------------------------------------------------
// OwnedQuantityIndex
// ---------------------------------------------------------------------------

/// Owned quantity and representative metadata per card identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OwnedQuantityIndex {
    cards: BTreeMap<CardIdentity, CardSummary>,
}

impl OwnedQuantityIndex {
    pub fn get(&self, identity: &CardIdentity) -> Option<&CardSummary> {
        self.cards.get(identity)
    }

    /// Owned copies of `identity`, zero when absent.
    pub fn owned(&self, identity: &CardIdentity) -> u32 {
        self.cards.get(identity).map(|c| c.owned).unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CardIdentity, &CardSummary)> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Sum of owned copies over every identity.
    pub fn total_owned(&self) -> u64 {
        self.cards.values().map(|c| u64::from(c.owned)).sum()
    }
}

/// Build the owned-quantity index from a position snapshot.
///
/// Positions with a zero or missing quantity contribute nothing, not even
/// metadata.
pub fn aggregate<'a, I>(positions: I) -> OwnedQuantityIndex
where
    I: IntoIterator<Item = &'a InventoryPosition>,
{
    let mut cards: BTreeMap<CardIdentity, CardSummary> = BTreeMap::new();
    let mut skipped = 0usize;

    for position in positions {
        if position.owned() == 0 {
            skipped += 1;
            continue;
        }
        cards
            .entry(position.identity())
            .or_default()
            .absorb(position);
    }

    debug!(
        identities = cards.len(),
        skipped, "aggregated inventory positions"
    );
    OwnedQuantityIndex { cards }
}
