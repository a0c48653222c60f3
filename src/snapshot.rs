//! An immutable position snapshot and the pure operations over it.

use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate, OwnedQuantityIndex};
use crate::config::CurrencyConfig;
use crate::deck_parser;
use crate::error::Result;
use crate::models::{InventoryPosition, Reconciliation};
use crate::queries::PositionQuery;
use crate::reconcile::reconcile;

/// Where a snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotSource {
    Remote,
    Cache,
    Memory,
}

/// Position rows as of one fetch. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct InventorySnapshot {
    positions: Vec<InventoryPosition>,
    source: SnapshotSource,
}

impl InventorySnapshot {
    pub fn new(positions: Vec<InventoryPosition>, source: SnapshotSource) -> Self {
        Self { positions, source }
    }

    /// Wrap positions that did not come through the SDK.
    pub fn from_positions(positions: Vec<InventoryPosition>) -> Self {
        Self::new(positions, SnapshotSource::Memory)
    }

    pub fn positions(&self) -> &[InventoryPosition] {
        &self.positions
    }

    pub fn source(&self) -> SnapshotSource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Owned quantity per card identity.
    pub fn index(&self) -> OwnedQuantityIndex {
        aggregate(&self.positions)
    }

    pub fn query<'a>(&'a self, currency: &'a CurrencyConfig) -> PositionQuery<'a> {
        PositionQuery::new(&self.positions, currency)
    }

    /// Parse pasted deck text and reconcile it against this snapshot.
    pub fn compare_deck(&self, raw_deck: &str) -> Result<Reconciliation> {
        let requirement = deck_parser::parse(raw_deck)?;
        Ok(reconcile(&requirement, &self.index()))
    }
}
