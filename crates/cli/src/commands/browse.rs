//! `treadstock browse`: the storefront listing view.

use anyhow::Context;

use treadstock_cart::{Totals, selected_items, totals};
use treadstock_catalog::{
    CatalogFilter, InventoryItem, SizeIndex, SortKey, filter_items, sum_quantities,
};
use treadstock_store::{CartStore, CatalogSource};

use crate::cli::BrowseArgs;

const NO_RESULTS: &str = "No results. Try a different size, search, or filters.";

pub fn run(
    catalog: &impl CatalogSource,
    carts: &impl CartStore,
    args: &BrowseArgs,
) -> anyhow::Result<String> {
    let items = catalog.load().context("could not load the catalog")?;
    if args.sizes {
        return Ok(render_sizes(&items));
    }
    let filter = CatalogFilter {
        size: args.size.clone(),
        min_tread: args.min_tread,
        search: args.query.clone().unwrap_or_default(),
    };
    let listings = filter_items(&items, &filter, SortKey::parse(&args.sort));
    // The selection summary counts the whole cart, not just what the current
    // filter shows.
    let cart = carts.load()?;
    let selection = totals(&selected_items(&items, &cart));
    Ok(render_listings(&listings, args.size.as_deref(), &selection))
}

fn render_listings(listings: &[InventoryItem], size: Option<&str>, selection: &Totals) -> String {
    if listings.is_empty() {
        return NO_RESULTS.to_string();
    }
    let mut meta = format!(
        "{} listing(s), {} tire(s)",
        listings.len(),
        sum_quantities(listings)
    );
    if let Some(size) = size {
        if !size.is_empty() {
            meta.push_str(&format!(" in {size}"));
        }
    }
    if selection.tire_count > 0 {
        meta.push_str(&format!(
            ". Selected: {} tire(s), ${}",
            selection.tire_count, selection.total_cost
        ));
    }

    let mut out = meta;
    out.push('\n');
    out.push('\n');
    out.push_str(&format!(
        "{:>4}  {:<12} {:<28} {:>6} {:>4} {:>9}  {}",
        "Id", "Size", "Item", "Tread", "Qty", "Price", "Notes"
    ));
    for item in listings {
        out.push('\n');
        out.push_str(
            format!(
                "{:>4}  {:<12} {:<28} {:>6} {:>4} {:>9}  {}",
                item.id,
                item.size,
                item.title(),
                format!("{}/32", item.tread_32nds),
                item.quantity,
                format!("${}", item.price),
                item.notes
            )
            .trim_end(),
        );
    }
    out
}

fn render_sizes(items: &[InventoryItem]) -> String {
    let index = SizeIndex::build(items);
    if index.is_empty() {
        return NO_RESULTS.to_string();
    }
    let mut out = format!("All sizes  {}", sum_quantities(items));
    for (size, count) in index.counts() {
        out.push_str(&format!("\n{size}  {count}"));
    }
    out
}
