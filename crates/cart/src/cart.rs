//! The persisted cart mapping and its single mutation authority.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use treadstock_catalog::InventoryItem;
use treadstock_core::ItemId;

/// Sparse mapping from item id to requested quantity.
///
/// Raw storage may hold zero, negative, or stale values; reads are lenient
/// about them, and every quantity write goes through [`Cart::clamp_edit`],
/// which keeps the invariant that no entry is ever non-positive or above
/// the item's stock at edit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    entries: BTreeMap<ItemId, i64>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage/test constructor; values are taken verbatim, clamping happens
    /// on read and on the next edit.
    pub fn from_entries(entries: impl IntoIterator<Item = (ItemId, i64)>) -> Self {
        Cart {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Raw requested quantity, unclamped.
    pub fn get(&self, id: ItemId) -> Option<i64> {
        self.entries.get(&id).copied()
    }

    /// Entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, i64)> + '_ {
        self.entries.iter().map(|(id, qty)| (*id, *qty))
    }

    /// Drops an entry outright. Works for stale ids the catalog no longer
    /// knows, which [`Cart::clamp_edit`] cannot touch.
    pub fn remove(&mut self, id: ItemId) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// Single authority for writing a quantity.
    ///
    /// Looks up `id` in the catalog; an unknown id is a no-op. Otherwise the
    /// request is floored and clamped to `[0, stock]`; a positive result is
    /// stored and zero removes the key, so no zero-valued entry persists.
    /// Non-finite requests read as zero.
    pub fn clamp_edit(&mut self, catalog: &[InventoryItem], id: ItemId, requested: f64) {
        let Some(item) = catalog.iter().find(|item| item.id == id) else {
            return;
        };
        let requested = if requested.is_finite() {
            requested.floor()
        } else {
            0.0
        };
        let clamped = requested.clamp(0.0, f64::from(item.quantity)) as i64;
        if clamped > 0 {
            self.entries.insert(id, clamped);
        } else {
            self.entries.remove(&id);
        }
    }

    /// Stepper entry point: nudges the currently clamped quantity by
    /// `delta` and funnels the result through [`Cart::clamp_edit`].
    pub fn step(&mut self, catalog: &[InventoryItem], id: ItemId, delta: i64) {
        let Some(item) = catalog.iter().find(|item| item.id == id) else {
            return;
        };
        let current = self
            .entries
            .get(&id)
            .copied()
            .unwrap_or(0)
            .clamp(0, i64::from(item.quantity));
        self.clamp_edit(catalog, id, (current + delta) as f64);
    }
}

impl Serialize for Cart {
    /// Serializes as a JSON object with string keys, the exact shape the
    /// storefront has always persisted.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, qty) in &self.entries {
            map.serialize_entry(&id.to_string(), qty)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Cart {
    /// Lenient entry-wise read: keys must be positive integral numbers and
    /// values numeric (numbers or numeric strings, floored). Entries that
    /// do not qualify are dropped; only a non-object payload is an error.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: BTreeMap<String, Value> = BTreeMap::deserialize(deserializer)?;
        let mut entries = BTreeMap::new();
        for (key, value) in raw {
            let Some(id) = parse_id(&key) else { continue };
            let Some(qty) = parse_qty(&value) else { continue };
            entries.insert(id, qty);
        }
        Ok(Cart { entries })
    }
}

fn parse_id(key: &str) -> Option<ItemId> {
    let n: f64 = key.trim().parse().ok()?;
    if n.is_finite() && n > 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) {
        Some(ItemId::new(n as u32))
    } else {
        None
    }
}

fn parse_qty(value: &Value) -> Option<i64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if n.is_finite() { Some(n.floor() as i64) } else { None }
}
