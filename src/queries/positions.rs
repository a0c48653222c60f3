//! Search, paging and valuation over a position snapshot.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::config::CurrencyConfig;
use crate::error::{InventoryError, Result};
use crate::models::{HoldingsSummary, InventoryPosition};
use crate::normalize::normalize;

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// One page of a (possibly filtered) position list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub items: Vec<&'a InventoryPosition>,
    /// 1-based page number, clamped to the last page.
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub page_count: usize,
}

// ---------------------------------------------------------------------------
// PositionQuery
// ---------------------------------------------------------------------------

/// Query interface over the loaded position snapshot.
pub struct PositionQuery<'a> {
    positions: &'a [InventoryPosition],
    currency: &'a CurrencyConfig,
}

impl<'a> PositionQuery<'a> {
    pub fn new(positions: &'a [InventoryPosition], currency: &'a CurrencyConfig) -> Self {
        Self {
            positions,
            currency,
        }
    }

    /// Every position in snapshot order.
    pub fn all(&self) -> Vec<&'a InventoryPosition> {
        self.positions.iter().collect()
    }

    /// Positions whose raw code or name contains `query`, case-insensitively.
    ///
    /// A blank query returns every position.
    pub fn search(&self, query: &str) -> Vec<&'a InventoryPosition> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.all();
        }
        self.positions
            .iter()
            .filter(|p| p.matches(&needle))
            .collect()
    }

    /// Search, then return the requested 1-based page.
    ///
    /// Pages past the end clamp to the last page; an empty result is a single
    /// empty page.
    pub fn page(&self, query: &str, page: usize, page_size: usize) -> Result<Page<'a>> {
        if page == 0 || page_size == 0 {
            return Err(InventoryError::InvalidArgument(format!(
                "page and page_size must be at least 1 (got page={}, page_size={})",
                page, page_size
            )));
        }

        let matches = self.search(query);
        let total = matches.len();
        let page_count = total.div_ceil(page_size).max(1);
        let page = page.min(page_count);
        let items = matches
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .collect();

        Ok(Page {
            items,
            page,
            page_size,
            total,
            page_count,
        })
    }

    /// All positions sharing the identity of `code`, whatever their spelling.
    pub fn by_identity(&self, code: &str) -> Vec<&'a InventoryPosition> {
        let identity = normalize(code);
        self.positions
            .iter()
            .filter(|p| p.identity() == identity)
            .collect()
    }

    /// Holdings totals over the whole snapshot.
    pub fn holdings(&self) -> HoldingsSummary {
        self.holdings_of(self.positions.iter())
    }

    /// Holdings totals over a subset, e.g. a search result.
    pub fn holdings_of<I>(&self, rows: I) -> HoldingsSummary
    where
        I: IntoIterator<Item = &'a InventoryPosition>,
    {
        let mut identities = HashSet::new();
        let mut summary = HoldingsSummary {
            currency: self.currency.code.clone(),
            ..HoldingsSummary::default()
        };

        for p in rows {
            summary.positions += 1;
            summary.total_quantity += u64::from(p.owned());
            summary.total_market_value += p.market_value();
            if p.owned() > 0 {
                identities.insert(p.identity());
            }
        }

        summary.distinct_cards = identities.len();
        summary.converted_market_value = self.currency.convert(summary.total_market_value);
        summary
    }

    /// Market value of one position in the display currency.
    pub fn converted_value(&self, position: &InventoryPosition) -> Decimal {
        self.currency.convert(position.market_value())
    }
}
