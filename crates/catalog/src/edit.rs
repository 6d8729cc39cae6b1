//! Admin editing of the working catalog list, plus file import/export.
//!
//! The admin flow loads the catalog into a plain `Vec`, edits it in place,
//! and saves it back wholesale. Failed imports leave the previous working
//! set untouched.

use serde_json::Value;

use treadstock_core::{DomainError, DomainResult, ItemId, Money};
use treadstock_csv::{CATALOG_HEADER, CsvRecord, Field, parse, serialize};

use crate::item::{InventoryItem, normalize_for_edit};

/// Next free id: one past the highest id in the working set.
pub fn next_id(items: &[InventoryItem]) -> ItemId {
    let max = items.iter().map(|item| item.id.get()).max().unwrap_or(0);
    ItemId::new(max.saturating_add(1))
}

/// Fields of the admin "add item" form. Everything except size may be blank.
#[derive(Debug, Clone, Default)]
pub struct NewItem {
    pub size: String,
    pub brand: String,
    pub model: String,
    pub tread_32nds: u32,
    /// `None` means the quantity field was left empty; it defaults to 1.
    pub quantity: Option<u32>,
    pub price: Money,
    pub notes: String,
}

/// Appends a new listing under the next free id. A blank size is rejected.
pub fn add_item(items: &mut Vec<InventoryItem>, draft: NewItem) -> DomainResult<ItemId> {
    let size = draft.size.trim().to_string();
    if size.is_empty() {
        return Err(DomainError::validation("size is required (e.g. 205/55R16)"));
    }
    let id = next_id(items);
    items.push(InventoryItem {
        id,
        size,
        brand: draft.brand.trim().to_string(),
        model: draft.model.trim().to_string(),
        tread_32nds: draft.tread_32nds,
        quantity: draft.quantity.unwrap_or(1),
        price: draft.price,
        notes: draft.notes.trim().to_string(),
    });
    Ok(id)
}

/// Copies the first listing with `id` to the end of the list under a fresh
/// id, and returns that fresh id.
pub fn duplicate_item(items: &mut Vec<InventoryItem>, id: ItemId) -> DomainResult<ItemId> {
    let original = items
        .iter()
        .find(|item| item.id == id)
        .cloned()
        .ok_or(DomainError::NotFound)?;
    let copy_id = next_id(items);
    items.push(InventoryItem {
        id: copy_id,
        ..original
    });
    Ok(copy_id)
}

/// Removes every listing with `id` (duplicated ids all go at once) and
/// returns how many went.
pub fn remove_item(items: &mut Vec<InventoryItem>, id: ItemId) -> DomainResult<usize> {
    let before = items.len();
    items.retain(|item| item.id != id);
    let removed = before - items.len();
    if removed == 0 {
        return Err(DomainError::NotFound);
    }
    Ok(removed)
}

/// Partial edit of one listing, mirroring in-table row editing.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    /// Replacement id; ignored unless positive.
    pub id: Option<u32>,
    pub size: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub tread_32nds: Option<u32>,
    pub quantity: Option<u32>,
    pub price: Option<Money>,
    pub notes: Option<String>,
}

/// Applies a patch to the first listing with `id` and returns its final id.
/// A patch may not blank out the size.
pub fn update_item(
    items: &mut [InventoryItem],
    id: ItemId,
    patch: ItemPatch,
) -> DomainResult<ItemId> {
    if let Some(size) = &patch.size {
        if size.trim().is_empty() {
            return Err(DomainError::validation("size is required (e.g. 205/55R16)"));
        }
    }
    let item = items
        .iter_mut()
        .find(|item| item.id == id)
        .ok_or(DomainError::NotFound)?;
    if let Some(new_id) = patch.id {
        if new_id > 0 {
            item.id = ItemId::new(new_id);
        }
    }
    if let Some(size) = patch.size {
        item.size = size.trim().to_string();
    }
    if let Some(brand) = patch.brand {
        item.brand = brand.trim().to_string();
    }
    if let Some(model) = patch.model {
        item.model = model.trim().to_string();
    }
    if let Some(tread) = patch.tread_32nds {
        item.tread_32nds = tread;
    }
    if let Some(quantity) = patch.quantity {
        item.quantity = quantity;
    }
    if let Some(price) = patch.price {
        item.price = price;
    }
    if let Some(notes) = patch.notes {
        item.notes = notes.trim().to_string();
    }
    Ok(item.id)
}

/// Builds a replacement working set from a JSON export.
///
/// Anything that is not a JSON array rejects the whole import.
pub fn import_json(text: &str) -> DomainResult<Vec<InventoryItem>> {
    let values: Vec<Value> = serde_json::from_str(text)
        .map_err(|e| DomainError::validation(format!("invalid JSON file: {e}")))?;
    Ok(normalize_for_edit(&values))
}

/// Builds a replacement working set from a CSV file.
///
/// Rejects the import when not a single usable row parses.
pub fn import_csv(text: &str) -> DomainResult<Vec<InventoryItem>> {
    let records = parse(text);
    if records.is_empty() {
        return Err(DomainError::validation("no rows found in CSV"));
    }
    let values: Vec<Value> = records.iter().map(record_to_value).collect();
    Ok(normalize_for_edit(&values))
}

fn record_to_value(record: &CsvRecord) -> Value {
    let mut map = serde_json::Map::new();
    for (field, value) in record.iter() {
        map.insert(field.as_str().to_string(), Value::String(value.to_string()));
    }
    Value::Object(map)
}

/// Renders the working set as catalog CSV, prices in fixed two-decimal form.
pub fn export_csv(items: &[InventoryItem]) -> String {
    let records: Vec<CsvRecord> = items.iter().map(item_to_record).collect();
    serialize(&records, &CATALOG_HEADER)
}

fn item_to_record(item: &InventoryItem) -> CsvRecord {
    CsvRecord::new()
        .with(Field::Id, item.id.to_string())
        .with(Field::Size, item.size.as_str())
        .with(Field::Brand, item.brand.as_str())
        .with(Field::Model, item.model.as_str())
        .with(Field::Tread32nds, item.tread_32nds.to_string())
        .with(Field::Quantity, item.quantity.to_string())
        .with(Field::Price, item.price.to_string())
        .with(Field::Notes, item.notes.as_str())
}

/// Renders the working set as pretty JSON, the same shape [`import_json`]
/// accepts.
pub fn export_json(items: &[InventoryItem]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(items)
}
