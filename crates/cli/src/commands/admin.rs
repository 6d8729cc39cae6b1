//! `treadstock admin`: the inventory back office.
//!
//! Mirrors the admin page: edits load the working set, change it, and save
//! the whole list back. The save acknowledgement quotes how many items went
//! to disk.

use std::fs;
use std::path::Path;

use anyhow::Context;

use treadstock_catalog::{
    CatalogFilter, InventoryItem, ItemPatch, NewItem, SortKey, add_item, duplicate_item,
    export_csv, export_json, filter_items, import_csv, import_json, remove_item, sum_quantities,
    update_item,
};
use treadstock_core::Money;
use treadstock_csv::TEMPLATE;
use treadstock_store::{CatalogStore, StoreError};

use crate::cli::{AdminAction, ExportFormat};

pub fn run(catalog: &impl CatalogStore, action: AdminAction) -> anyhow::Result<String> {
    match action {
        AdminAction::List => {
            let items = catalog
                .load_for_edit()
                .context("could not load the catalog")?;
            Ok(render_table(&items))
        }
        AdminAction::Add {
            size,
            brand,
            model,
            tread,
            quantity,
            price,
            notes,
        } => {
            let mut items = load_or_fresh(catalog)?;
            let id = add_item(
                &mut items,
                NewItem {
                    size,
                    brand,
                    model,
                    tread_32nds: tread,
                    quantity,
                    price: Money::from_dollars(price),
                    notes,
                },
            )?;
            let saved = catalog.save(&items)?;
            Ok(format!("Added item #{id}\nSaved {saved} items"))
        }
        AdminAction::Update {
            id,
            new_id,
            size,
            brand,
            model,
            tread,
            quantity,
            price,
            notes,
        } => {
            let mut items = catalog
                .load_for_edit()
                .context("could not load the catalog")?;
            let final_id = update_item(
                &mut items,
                id,
                ItemPatch {
                    id: new_id,
                    size,
                    brand,
                    model,
                    tread_32nds: tread,
                    quantity,
                    price: price.map(Money::from_dollars),
                    notes,
                },
            )?;
            let saved = catalog.save(&items)?;
            Ok(format!("Updated item #{final_id}\nSaved {saved} items"))
        }
        AdminAction::Duplicate { id } => {
            let mut items = catalog
                .load_for_edit()
                .context("could not load the catalog")?;
            let copy = duplicate_item(&mut items, id)?;
            let saved = catalog.save(&items)?;
            Ok(format!("Duplicated item #{id} as #{copy}\nSaved {saved} items"))
        }
        AdminAction::Delete { id } => {
            let mut items = catalog
                .load_for_edit()
                .context("could not load the catalog")?;
            let removed = remove_item(&mut items, id)?;
            let saved = catalog.save(&items)?;
            Ok(format!("Deleted {removed} listing(s)\nSaved {saved} items"))
        }
        AdminAction::Clear => {
            let saved = catalog.save(&[])?;
            Ok(format!("Saved {saved} items"))
        }
        AdminAction::Import { file } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("could not read {}", file.display()))?;
            let items = parse_import(&file, &text)?;
            let saved = catalog.save(&items)?;
            Ok(format!("Imported {} item(s)\nSaved {saved} items", items.len()))
        }
        AdminAction::Export { format, out } => {
            let items = catalog
                .load_for_edit()
                .context("could not load the catalog")?;
            let text = match format {
                ExportFormat::Json => export_json(&items)?,
                ExportFormat::Csv => export_csv(&items),
            };
            match out {
                Some(path) => {
                    fs::write(&path, &text)
                        .with_context(|| format!("could not write {}", path.display()))?;
                    Ok(format!("Wrote {} item(s) to {}", items.len(), path.display()))
                }
                None => Ok(text),
            }
        }
        AdminAction::Template => Ok(TEMPLATE.to_string()),
    }
}

/// `add` may run before any inventory file exists; everything else insists
/// on one.
fn load_or_fresh(catalog: &impl CatalogStore) -> anyhow::Result<Vec<InventoryItem>> {
    match catalog.load_for_edit() {
        Ok(items) => Ok(items),
        Err(StoreError::CatalogUnavailable(reason)) => {
            tracing::warn!(%reason, "no existing inventory, starting fresh");
            Ok(Vec::new())
        }
        Err(err) => Err(err.into()),
    }
}

fn parse_import(path: &Path, text: &str) -> anyhow::Result<Vec<InventoryItem>> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => {
            import_json(text).context("Invalid JSON file.")
        }
        Some(ext) if ext.eq_ignore_ascii_case("csv") => {
            import_csv(text).context("No rows found in CSV.")
        }
        _ => anyhow::bail!(
            "unsupported import file type: {} (expected .json or .csv)",
            path.display()
        ),
    }
}

fn render_table(items: &[InventoryItem]) -> String {
    if items.is_empty() {
        return "0 item(s)".to_string();
    }
    let ordered = filter_items(items, &CatalogFilter::default(), SortKey::Size);
    let mut out = format!(
        "{:>4}  {:<12} {:<16} {:<20} {:>5} {:>4} {:>9}  {}",
        "Id", "Size", "Brand", "Model", "Tread", "Qty", "Price", "Notes"
    );
    for item in &ordered {
        out.push('\n');
        out.push_str(
            format!(
                "{:>4}  {:<12} {:<16} {:<20} {:>5} {:>4} {:>9}  {}",
                item.id,
                item.size,
                item.brand,
                item.model,
                item.tread_32nds,
                item.quantity,
                format!("${}", item.price),
                item.notes
            )
            .trim_end(),
        );
    }
    out.push_str(&format!(
        "\n\n{} item(s), {} tire(s)",
        ordered.len(),
        sum_quantities(&ordered)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use treadstock_core::{DomainError, ItemId};
    use treadstock_store::{CatalogSource, FileCatalogStore, MemoryCatalogStore};

    fn seeded_catalog() -> MemoryCatalogStore {
        MemoryCatalogStore::with_values(vec![
            json!({"id": 1, "size": "205/55R16", "brand": "Michelin", "model": "Defender",
                   "tread_32nds": 8, "quantity": 4, "price": 45}),
            json!({"id": 2, "size": "195/65R15", "brand": "Goodyear", "model": "Assurance",
                   "tread_32nds": 6, "quantity": 2, "price": 35.5}),
        ])
    }

    #[test]
    fn add_reports_the_new_id_and_save_count() {
        let catalog = seeded_catalog();
        let output = run(
            &catalog,
            AdminAction::Add {
                size: "225/45R17".to_string(),
                brand: "Pirelli".to_string(),
                model: String::new(),
                tread: 9,
                quantity: None,
                price: 80.0,
                notes: String::new(),
            },
        )
        .unwrap();
        assert_eq!(output, "Added item #3\nSaved 3 items");
        let items = catalog.load_for_edit().unwrap();
        assert_eq!(items.last().unwrap().quantity, 1);
    }

    #[test]
    fn add_starts_fresh_when_no_inventory_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = FileCatalogStore::new(dir.path().join("inventory.json"));
        let output = run(
            &catalog,
            AdminAction::Add {
                size: "205/55R16".to_string(),
                brand: String::new(),
                model: String::new(),
                tread: 0,
                quantity: Some(4),
                price: 45.0,
                notes: String::new(),
            },
        )
        .unwrap();
        assert_eq!(output, "Added item #1\nSaved 1 items");
        assert_eq!(catalog.load_for_edit().unwrap().len(), 1);
    }

    #[test]
    fn update_patches_and_persists() {
        let catalog = seeded_catalog();
        let output = run(
            &catalog,
            AdminAction::Update {
                id: ItemId::new(2),
                new_id: None,
                size: None,
                brand: None,
                model: None,
                tread: None,
                quantity: Some(9),
                price: None,
                notes: None,
            },
        )
        .unwrap();
        assert_eq!(output, "Updated item #2\nSaved 2 items");
        let items = catalog.load_for_edit().unwrap();
        let item = items.iter().find(|item| item.id == ItemId::new(2)).unwrap();
        assert_eq!(item.quantity, 9);
    }

    #[test]
    fn delete_of_a_missing_id_is_not_found() {
        let catalog = seeded_catalog();
        let err = run(&catalog, AdminAction::Delete { id: ItemId::new(9) }).unwrap_err();
        match err.downcast_ref::<DomainError>() {
            Some(DomainError::NotFound) => {}
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn clear_saves_an_empty_catalog() {
        let catalog = seeded_catalog();
        assert_eq!(run(&catalog, AdminAction::Clear).unwrap(), "Saved 0 items");
        assert!(catalog.load_for_edit().unwrap().is_empty());
    }

    #[test]
    fn import_picks_the_format_from_the_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock.csv");
        std::fs::write(&path, "Size,Qty,Cost\n205/55R16,4,45.5\n").unwrap();
        let catalog = seeded_catalog();
        let output = run(&catalog, AdminAction::Import { file: path }).unwrap();
        assert_eq!(output, "Imported 1 item(s)\nSaved 1 items");
        let items = catalog.load_for_edit().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].price, Money::from_cents(4550));
    }

    #[test]
    fn import_of_an_empty_csv_reports_the_admin_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "id,size,brand\n").unwrap();
        let catalog = seeded_catalog();
        let err = run(&catalog, AdminAction::Import { file: path }).unwrap_err();
        assert_eq!(err.to_string(), "No rows found in CSV.");
        // The working set is untouched.
        assert_eq!(catalog.load_for_edit().unwrap().len(), 2);
    }

    #[test]
    fn import_of_malformed_json_reports_the_admin_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"not\": \"an array\"}").unwrap();
        let catalog = seeded_catalog();
        let err = run(&catalog, AdminAction::Import { file: path }).unwrap_err();
        assert_eq!(err.to_string(), "Invalid JSON file.");
    }

    #[test]
    fn template_prints_the_starter_csv() {
        let catalog = seeded_catalog();
        let output = run(&catalog, AdminAction::Template).unwrap();
        assert!(output.starts_with("id,size,brand,model,tread_32nds,quantity,price,notes\n"));
    }

    #[test]
    fn list_renders_counts_under_the_table() {
        let catalog = seeded_catalog();
        let output = run(&catalog, AdminAction::List).unwrap();
        assert!(output.contains("Michelin"));
        assert!(output.ends_with("2 item(s), 6 tire(s)"));
    }
}
