//! Catalog items and the lenient loader that turns raw JSON into them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use treadstock_core::{Entity, ItemId, Money};

/// One tire listing in the catalog.
///
/// The storefront treats loaded snapshots as immutable; admin flows edit a
/// working copy and save it back wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub size: String,
    pub brand: String,
    pub model: String,
    pub tread_32nds: u32,
    pub quantity: u32,
    pub price: Money,
    pub notes: String,
}

impl InventoryItem {
    /// Display title, `"Tire"` when brand and model are both blank.
    pub fn title(&self) -> String {
        let title = format!("{} {}", self.brand, self.model).trim().to_string();
        if title.is_empty() { "Tire".to_string() } else { title }
    }

    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.id
    }
}

/// Builds typed items from raw JSON records, applying every default in one
/// place.
///
/// Coercion is lenient: numbers pass through, numeric strings parse, junk
/// falls back to the field default. An id that is missing, non-numeric, or
/// not a positive integer is replaced with the record's 1-based position.
/// A wholly absent `quantity` reads as out of stock.
///
/// Normalizing an already-normalized list yields an equal list.
pub fn normalize(raw: &[Value]) -> Vec<InventoryItem> {
    normalize_with(raw, 0)
}

/// Admin variant of [`normalize`]: a wholly absent `quantity` defaults to 1
/// so freshly sketched rows start sellable.
pub fn normalize_for_edit(raw: &[Value]) -> Vec<InventoryItem> {
    normalize_with(raw, 1)
}

fn normalize_with(raw: &[Value], missing_quantity: u32) -> Vec<InventoryItem> {
    raw.iter()
        .enumerate()
        .map(|(position, record)| {
            let quantity = match record.get("quantity") {
                None | Some(Value::Null) => missing_quantity,
                Some(value) => coerce_count(value),
            };
            InventoryItem {
                id: coerce_id(record.get("id"), position),
                size: coerce_text(record.get("size")).trim().to_string(),
                brand: coerce_text(record.get("brand")),
                model: coerce_text(record.get("model")),
                tread_32nds: record.get("tread_32nds").map_or(0, coerce_count),
                quantity,
                price: record.get("price").map_or(Money::ZERO, coerce_price),
                notes: coerce_text(record.get("notes")),
            }
        })
        .collect()
}

fn coerce_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Loose numeric reading: numbers pass through, trimmed numeric strings
/// parse, empty strings and nulls read as zero. Everything else is `None`.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        _ => None,
    }
}

fn coerce_count(value: &Value) -> u32 {
    match coerce_number(value) {
        Some(n) if n.is_finite() => n.max(0.0).floor() as u32,
        _ => 0,
    }
}

fn coerce_price(value: &Value) -> Money {
    Money::from_dollars(coerce_number(value).unwrap_or(0.0))
}

fn coerce_id(value: Option<&Value>, position: usize) -> ItemId {
    let fallback = ItemId::new(position as u32 + 1);
    match value.and_then(coerce_number) {
        Some(n) if n.is_finite() && n > 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) => {
            ItemId::new(n as u32)
        }
        _ => fallback,
    }
}
