//! Parse pasted deck-builder exports into a [`DeckRequirement`].
//!
//! The deck builder has exported two layouts over time and users paste
//! either one, sometimes mixed within one paste. The layout is detected per
//! zone:
//!
//! * **Summary**: the zone maps card code to count,
//!   `{"main": {"hBP01-004": 4}, "cheer": {"hY01-001": 20}}`.
//! * **Raw list**: the zone holds an array of entries,
//!   `{"list": [{"card_number": "hBP01-004", "num": 4}]}`, or a single entry
//!   object such as `{"oshi": {"card_number": "hSD01-001", "num": 1}}`.
//!
//! Zone keys are listed in [`DeckZone::aliases`]. A single `{"data": ...}` or
//! `{"deck": ...}` envelope is unwrapped first. Entry fields are looked up
//! through [`CODE_FIELDS`] and [`COUNT_FIELDS`], first alias wins.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{InventoryError, Result};
use crate::models::lenient;
use crate::models::{DeckRequirement, DeckShape, DeckZone};
use crate::normalize::normalize;

/// Card-code field names of raw-list entries, in priority order.
pub const CODE_FIELDS: &[&str] = &[
    "card_number",
    "cardno",
    "card_no",
    "card_code",
    "cardNumber",
    "code",
];

/// Count field names of raw-list entries, in priority order.
pub const COUNT_FIELDS: &[&str] = &["num", "count", "qty", "quantity", "copies"];

const ENVELOPE_KEYS: &[&str] = &["data", "deck"];

/// Parse pasted deck text.
///
/// # Errors
///
/// * [`InventoryError::DeckParse`] when the text is not valid JSON.
/// * [`InventoryError::DeckSchema`] when no zone key holds zone data.
pub fn parse(raw: &str) -> Result<DeckRequirement> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| InventoryError::DeckParse(e.to_string()))?;
    parse_value(&value)
}

/// Parse an already-decoded deck payload.
///
/// Each zone is read by its own layout, so a paste that mixes summary maps
/// and raw lists still sums every zone. The reported shape is
/// [`DeckShape::Summary`] when any zone held a code-to-count map.
pub fn parse_value(value: &Value) -> Result<DeckRequirement> {
    let root = unwrap_envelope(value).ok_or_else(schema_error)?;
    let zones: Vec<(DeckZone, ZoneLayout<'_>)> = root
        .iter()
        .filter_map(|(key, v)| Some((DeckZone::from_key(key)?, ZoneLayout::of(v)?)))
        .collect();

    if zones.is_empty() {
        return Err(schema_error());
    }

    let shape = if zones
        .iter()
        .any(|(_, layout)| matches!(layout, ZoneLayout::Counts(_)))
    {
        DeckShape::Summary
    } else {
        DeckShape::RawList
    };

    let mut requirement = DeckRequirement::new(shape);
    let mut dropped = 0usize;
    for (zone, layout) in &zones {
        dropped += match layout {
            ZoneLayout::Counts(counts) => add_counts(&mut requirement, *zone, counts),
            ZoneLayout::Entries(entries) => add_entries(&mut requirement, *zone, entries),
        };
    }

    debug!(
        ?shape,
        zones = zones.len(),
        identities = requirement.len(),
        dropped,
        "parsed deck export"
    );
    Ok(requirement)
}

/// How one zone value is laid out.
enum ZoneLayout<'a> {
    /// `{"hBP01-001": 2}`
    Counts(&'a Map<String, Value>),
    /// `[{"card_number": ..., "num": ...}]`, or a lone entry object.
    Entries(Vec<&'a Value>),
}

impl<'a> ZoneLayout<'a> {
    fn of(value: &'a Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(ZoneLayout::Entries(items.iter().collect())),
            Value::Object(obj) if CODE_FIELDS.iter().any(|f| obj.contains_key(*f)) => {
                Some(ZoneLayout::Entries(vec![value]))
            }
            Value::Object(obj) => Some(ZoneLayout::Counts(obj)),
            _ => None,
        }
    }
}

fn schema_error() -> InventoryError {
    let accepted: Vec<&str> = DeckZone::all()
        .into_iter()
        .flat_map(|zone| zone.aliases().iter().copied())
        .collect();
    InventoryError::DeckSchema(format!(
        "paste must contain zone data; expected an object with one of the keys [{}]",
        accepted.join(", ")
    ))
}

fn unwrap_envelope(value: &Value) -> Option<&Map<String, Value>> {
    let root = value.as_object()?;
    let has_zone = root.keys().any(|k| DeckZone::from_key(k).is_some());
    if !has_zone {
        for key in ENVELOPE_KEYS {
            if let Some(Value::Object(inner)) = root.get(*key) {
                return Some(inner);
            }
        }
    }
    Some(root)
}

fn add_counts(requirement: &mut DeckRequirement, zone: DeckZone, counts: &Map<String, Value>) -> usize {
    let mut dropped = 0;
    for (code, count) in counts {
        match copies(count) {
            Some(n) if !code.trim().is_empty() => requirement.add(normalize(code), zone, n),
            _ => dropped += 1,
        }
    }
    dropped
}

fn add_entries(requirement: &mut DeckRequirement, zone: DeckZone, entries: &[&Value]) -> usize {
    let mut dropped = 0;
    for entry in entries {
        let code = first_field(entry, CODE_FIELDS).and_then(lenient::as_text);
        let count = first_field(entry, COUNT_FIELDS).and_then(copies);
        match (code, count) {
            (Some(code), Some(n)) => requirement.add(normalize(&code), zone, n),
            _ => dropped += 1,
        }
    }
    dropped
}

fn first_field<'a>(entry: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    let obj = entry.as_object()?;
    aliases
        .iter()
        .find_map(|name| obj.get(*name).filter(|v| !v.is_null()))
}

/// Whole copies from a count value; non-finite, non-positive and
/// sub-one values mean "not required".
fn copies(value: &Value) -> Option<u32> {
    let n = lenient::as_f64(value)?;
    if n < 1.0 {
        return None;
    }
    Some(n.trunc().min(u32::MAX as f64) as u32)
}
