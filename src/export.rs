//! CSV export of reconciliation rows and position snapshots.

use std::io::Write;

use crate::error::{InventoryError, Result};
use crate::models::{InventoryPosition, ReconciliationRow};

fn opt<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

/// Write reconciliation rows as CSV, header first, in the given order.
pub fn write_reconciliation_csv<W: Write>(writer: W, rows: &[ReconciliationRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "card_code",
        "name",
        "needed",
        "owned",
        "shortage",
        "surplus",
        "unit_price",
        "need_value",
        "shortage_value",
    ])?;

    for row in rows {
        wtr.write_record([
            row.identity.to_string(),
            row.name.clone(),
            row.needed.to_string(),
            row.owned.to_string(),
            row.shortage.to_string(),
            row.surplus.to_string(),
            opt(&row.unit_price),
            row.valuation_of_need.to_string(),
            row.valuation_of_shortage.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write position rows as CSV.
pub fn write_positions_csv<'a, W, I>(writer: W, positions: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a InventoryPosition>,
{
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "card_code",
        "name",
        "rarity",
        "qty",
        "sell_price",
        "market_value",
        "shop_url",
    ])?;

    for p in positions {
        wtr.write_record([
            p.raw_code.clone(),
            p.name.clone(),
            p.rarity.clone(),
            p.owned().to_string(),
            opt(&p.sell_price),
            p.market_value().to_string(),
            p.shop_url().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Reconciliation rows as a CSV string.
pub fn to_csv_string(rows: &[ReconciliationRow]) -> Result<String> {
    let mut buf = Vec::new();
    write_reconciliation_csv(&mut buf, rows)?;
    String::from_utf8(buf)
        .map_err(|e| InventoryError::InvalidArgument(format!("CSV output is not UTF-8: {}", e)))
}
