//! `treadstock-cart` — the shopper's cart and its reconciliation against a
//! catalog snapshot.
//!
//! The cart is a sparse id → requested-quantity mapping. Everything derived
//! from it (selected lines, totals) is recomputed from the current catalog
//! on every use, so stale entries cost nothing and surface nowhere.

pub mod cart;
pub mod export;
pub mod selection;

pub use cart::Cart;
pub use export::{export_csv, export_items, export_json};
pub use selection::{SelectedItem, Totals, selected_items, totals};
