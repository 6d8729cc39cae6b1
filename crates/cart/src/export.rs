//! Cart file exports.

use treadstock_catalog::InventoryItem;
use treadstock_csv::{CART_HEADER, CsvRecord, Field, serialize};

use crate::selection::SelectedItem;

/// Selected lines as plain items whose `quantity` is the selected amount.
/// This is the shape the admin JSON import accepts back.
pub fn export_items(selected: &[SelectedItem]) -> Vec<InventoryItem> {
    selected
        .iter()
        .map(|line| InventoryItem {
            quantity: line.selected_qty,
            ..line.item.clone()
        })
        .collect()
}

/// Pretty JSON form of [`export_items`].
pub fn export_json(selected: &[SelectedItem]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&export_items(selected))
}

/// Cart CSV with per-line totals, currency fixed to two decimals.
pub fn export_csv(selected: &[SelectedItem]) -> String {
    let records: Vec<CsvRecord> = selected.iter().map(line_to_record).collect();
    serialize(&records, &CART_HEADER)
}

fn line_to_record(line: &SelectedItem) -> CsvRecord {
    let item = &line.item;
    CsvRecord::new()
        .with(Field::Id, item.id.to_string())
        .with(Field::Size, item.size.as_str())
        .with(Field::Brand, item.brand.as_str())
        .with(Field::Model, item.model.as_str())
        .with(Field::Quantity, line.selected_qty.to_string())
        .with(Field::Price, item.price.to_string())
        .with(Field::LineTotal, line.line_total().to_string())
        .with(Field::Notes, item.notes.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use treadstock_catalog::normalize;
    use treadstock_core::ItemId;

    use crate::cart::Cart;
    use crate::selection::selected_items;

    fn selected() -> Vec<SelectedItem> {
        let catalog = normalize(&[
            json!({"id": 1, "size": "205/55R16", "brand": "Michelin", "model": "Defender", "quantity": 4, "price": 45, "notes": "Even wear"}),
            json!({"id": 2, "size": "195/65R15", "brand": "Goodyear", "model": "Assurance", "quantity": 6, "price": 35.5, "notes": "Set of 4, one patched"}),
        ]);
        let cart = Cart::from_entries([(ItemId::new(1), 2), (ItemId::new(2), 3)]);
        selected_items(&catalog, &cart)
    }

    #[test]
    fn csv_export_includes_line_totals() {
        let text = export_csv(&selected());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id,size,brand,model,quantity,price,line_total,notes");
        assert_eq!(
            lines[1],
            "1,205/55R16,Michelin,Defender,2,45.00,90.00,Even wear"
        );
        assert_eq!(
            lines[2],
            "2,195/65R15,Goodyear,Assurance,3,35.50,106.50,\"Set of 4, one patched\""
        );
    }

    #[test]
    fn json_export_replaces_quantity_with_the_selected_amount() {
        let items = export_items(&selected());
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[1].quantity, 3);

        let text = export_json(&selected()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["quantity"], json!(2));
        assert!(value[0].get("selected_qty").is_none());
    }

    #[test]
    fn empty_selection_exports_a_bare_header() {
        assert_eq!(
            export_csv(&[]),
            "id,size,brand,model,quantity,price,line_total,notes"
        );
        assert_eq!(export_json(&[]).unwrap(), "[]");
    }
}
