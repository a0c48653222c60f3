use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::normalize::CardIdentity;

// ---------------------------------------------------------------------------
// DeckZone — Named bucket within an exported deck
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckZone {
    /// Oshi / partner slot.
    Partner,
    Main,
    /// Cheer (sub) deck.
    Sub,
    /// Flat card list without zone information.
    List,
}

impl DeckZone {
    /// Accepted top-level keys per zone, checked case-insensitively.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            DeckZone::Partner => &["partner", "oshi", "oshi_card"],
            DeckZone::Main => &["main", "main_deck", "maindeck"],
            DeckZone::Sub => &["sub", "sub_deck", "cheer", "cheer_deck", "cheerdeck", "yell"],
            DeckZone::List => &["list", "cards"],
        }
    }

    pub fn all() -> [DeckZone; 4] {
        [DeckZone::Partner, DeckZone::Main, DeckZone::Sub, DeckZone::List]
    }

    pub fn from_key(key: &str) -> Option<DeckZone> {
        let key = key.trim().to_ascii_lowercase();
        Self::all()
            .into_iter()
            .find(|zone| zone.aliases().contains(&key.as_str()))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeckZone::Partner => "partner",
            DeckZone::Main => "main",
            DeckZone::Sub => "sub",
            DeckZone::List => "list",
        }
    }
}

impl fmt::Display for DeckZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DeckShape — Which export layout a payload used
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckShape {
    /// `{"main": {"hBP01-001": 2}}`
    Summary,
    /// `{"main": [{"card_number": "hBP01-001", "num": 2}]}`
    RawList,
}

// ---------------------------------------------------------------------------
// DeckRequirement — Copies needed per card identity
// ---------------------------------------------------------------------------

/// Required copy counts per card identity, summed across zones.
///
/// Every stored count is positive; [`add`](Self::add) ignores zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRequirement {
    pub shape: DeckShape,
    totals: BTreeMap<CardIdentity, u32>,
    zones: BTreeMap<CardIdentity, BTreeMap<DeckZone, u32>>,
}

impl DeckRequirement {
    pub fn new(shape: DeckShape) -> Self {
        Self {
            shape,
            totals: BTreeMap::new(),
            zones: BTreeMap::new(),
        }
    }

    /// Record `count` copies of `identity` in `zone`.
    pub fn add(&mut self, identity: CardIdentity, zone: DeckZone, count: u32) {
        if count == 0 {
            return;
        }
        let in_zone = self
            .zones
            .entry(identity.clone())
            .or_default()
            .entry(zone)
            .or_insert(0);
        *in_zone = in_zone.saturating_add(count);
        let total = self.totals.entry(identity).or_insert(0);
        *total = total.saturating_add(count);
    }

    /// Total copies required for `identity` across all zones.
    pub fn required(&self, identity: &CardIdentity) -> u32 {
        self.totals.get(identity).copied().unwrap_or(0)
    }

    /// Per-zone breakdown for `identity`.
    pub fn zones_of(&self, identity: &CardIdentity) -> Option<&BTreeMap<DeckZone, u32>> {
        self.zones.get(identity)
    }

    /// Identities and totals in canonical-code order.
    pub fn iter(&self) -> impl Iterator<Item = (&CardIdentity, u32)> {
        self.totals.iter().map(|(id, n)| (id, *n))
    }

    pub fn totals(&self) -> &BTreeMap<CardIdentity, u32> {
        &self.totals
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn total_copies(&self) -> u64 {
        self.totals.values().map(|n| u64::from(*n)).sum()
    }
}
