//! Stock adjustments driven by order submission and cancellation.

use treadstock_catalog::InventoryItem;

use crate::order::Order;

/// Removes a submitted order's quantities from the catalog. Lines whose item
/// no longer exists are skipped; counts saturate at zero when the order was
/// built against a staler snapshot than this one.
pub fn deduct_stock(catalog: &mut [InventoryItem], order: &Order) {
    for line in &order.items {
        if let Some(item) = catalog.iter_mut().find(|item| item.id == line.item.id) {
            item.quantity = item.quantity.saturating_sub(line.selected_qty);
        }
    }
}

/// Puts a cancelled order's quantities back on the shelf. Missing items are
/// skipped, same as [`deduct_stock`].
pub fn restore_stock(catalog: &mut [InventoryItem], order: &Order) {
    for line in &order.items {
        if let Some(item) = catalog.iter_mut().find(|item| item.id == line.item.id) {
            item.quantity = item.quantity.saturating_add(line.selected_qty);
        }
    }
}
