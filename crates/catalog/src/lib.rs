//! `treadstock-catalog` — tire listings, storefront browsing, and admin
//! editing of the inventory list.
//!
//! Purely deterministic domain logic (no IO, no HTTP, no storage). Loading
//! and saving catalog files belongs to `treadstock-store`.

pub mod browse;
pub mod edit;
pub mod item;

pub use browse::{CatalogFilter, SizeIndex, SortKey, filter_items, natural_cmp, sum_quantities};
pub use edit::{
    ItemPatch, NewItem, add_item, duplicate_item, export_csv, export_json, import_csv,
    import_json, next_id, remove_item, update_item,
};
pub use item::{InventoryItem, normalize, normalize_for_edit};
