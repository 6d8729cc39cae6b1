//! `treadstock cart`: the saved cart reconciled against the live catalog.

use std::fs;

use anyhow::Context;

use treadstock_cart::{SelectedItem, export_csv, export_json, selected_items, totals};
use treadstock_store::{CartStore, CatalogSource};

use crate::cli::{CartAction, ExportFormat};

pub fn run(
    catalog: &impl CatalogSource,
    carts: &impl CartStore,
    action: CartAction,
) -> anyhow::Result<String> {
    match action {
        CartAction::Show => {
            let items = catalog.load().context("could not load the catalog")?;
            let cart = carts.load()?;
            Ok(render(&selected_items(&items, &cart)))
        }
        CartAction::Add { id, count } => {
            let items = catalog.load().context("could not load the catalog")?;
            let mut cart = carts.load()?;
            cart.step(&items, id, count);
            carts.save(&cart)?;
            Ok(render(&selected_items(&items, &cart)))
        }
        CartAction::Set { id, quantity } => {
            let items = catalog.load().context("could not load the catalog")?;
            let mut cart = carts.load()?;
            cart.clamp_edit(&items, id, quantity);
            carts.save(&cart)?;
            Ok(render(&selected_items(&items, &cart)))
        }
        CartAction::Remove { id } => {
            let items = catalog.load().context("could not load the catalog")?;
            let mut cart = carts.load()?;
            cart.remove(id);
            carts.save(&cart)?;
            Ok(render(&selected_items(&items, &cart)))
        }
        CartAction::Clear => {
            carts.clear()?;
            Ok("Cart cleared.".to_string())
        }
        CartAction::Export { format, out } => {
            let items = catalog.load().context("could not load the catalog")?;
            let cart = carts.load()?;
            let selected = selected_items(&items, &cart);
            let text = match format {
                ExportFormat::Json => export_json(&selected)?,
                ExportFormat::Csv => export_csv(&selected),
            };
            match out {
                Some(path) => {
                    fs::write(&path, &text)
                        .with_context(|| format!("could not write {}", path.display()))?;
                    Ok(format!("Wrote {} line(s) to {}", selected.len(), path.display()))
                }
                None => Ok(text),
            }
        }
    }
}

fn render(selected: &[SelectedItem]) -> String {
    if selected.is_empty() {
        return "No items selected".to_string();
    }
    let mut out = format!(
        "{:>4}  {:<12} {:<28} {:>9} {:>10}",
        "Qty", "Size", "Item", "Price", "Total"
    );
    for line in selected {
        let name = format!("{} {}", line.item.brand, line.item.model)
            .trim()
            .to_string();
        out.push('\n');
        out.push_str(
            format!(
                "{:>4}  {:<12} {:<28} {:>9} {:>10}",
                line.selected_qty,
                line.item.size,
                name,
                format!("${}", line.item.price),
                format!("${}", line.line_total())
            )
            .trim_end(),
        );
    }
    let summary = totals(selected);
    out.push_str(&format!(
        "\n\n{} tire(s), ${}",
        summary.tire_count, summary.total_cost
    ));
    out
}
