//! Reconciliation: which cart entries are actually sellable right now.

use serde::{Deserialize, Serialize};

use treadstock_catalog::InventoryItem;
use treadstock_core::{Money, ValueObject};

use crate::cart::Cart;

/// A sellable cart line: the catalog item plus how many units survive
/// clamping against current stock.
///
/// Never persisted on its own; always derived fresh from catalog + cart.
/// On the wire it flattens into the item's fields plus `selected_qty`, the
/// shape order payloads carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedItem {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub selected_qty: u32,
}

impl SelectedItem {
    pub fn line_total(&self) -> Money {
        self.item.price.times(self.selected_qty)
    }
}

/// Resolves the cart against a catalog snapshot.
///
/// Entries match catalog items by id, first match winning when ids repeat.
/// Entries pointing at items no longer in the catalog are skipped without
/// comment; they are stale cache, not errors. Requested quantities clamp to
/// `[0, stock]` and lines that clamp to zero are dropped. Output follows
/// cart iteration order (ascending id).
pub fn selected_items(catalog: &[InventoryItem], cart: &Cart) -> Vec<SelectedItem> {
    let mut out = Vec::new();
    for (id, requested) in cart.iter() {
        let Some(item) = catalog.iter().find(|item| item.id == id) else {
            continue;
        };
        let clamped = requested.clamp(0, i64::from(item.quantity)) as u32;
        if clamped == 0 {
            continue;
        }
        out.push(SelectedItem {
            item: item.clone(),
            selected_qty: clamped,
        });
    }
    out
}

/// Cart totals: selected unit count and their cost.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Totals {
    pub tire_count: u32,
    pub total_cost: Money,
}

impl ValueObject for Totals {}

/// Sums units and cost over selected lines. Addition in whole cents, so the
/// result is independent of line order.
pub fn totals(selected: &[SelectedItem]) -> Totals {
    selected.iter().fold(Totals::default(), |acc, line| Totals {
        tire_count: acc.tire_count.saturating_add(line.selected_qty),
        total_cost: acc.total_cost + line.line_total(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use treadstock_catalog::normalize;
    use treadstock_core::ItemId;

    fn catalog() -> Vec<InventoryItem> {
        normalize(&[
            json!({"id": 1, "size": "205/55R16", "brand": "Michelin", "quantity": 4, "price": 45}),
            json!({"id": 2, "size": "195/65R15", "brand": "Goodyear", "quantity": 2, "price": 35.5}),
            json!({"id": 3, "size": "225/45R17", "brand": "Pirelli", "quantity": 0, "price": 120}),
        ])
    }

    #[test]
    fn clamps_requests_to_available_stock() {
        let cart = Cart::from_entries([(ItemId::new(1), 10)]);
        let selected = selected_items(&catalog(), &cart);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].selected_qty, 4);

        let sums = totals(&selected);
        assert_eq!(sums.tire_count, 4);
        assert_eq!(sums.total_cost, Money::from_cents(18_000));
    }

    #[test]
    fn stale_entries_are_silently_skipped() {
        let cart = Cart::from_entries([(ItemId::new(1), 2), (ItemId::new(99), 5)]);
        let selected = selected_items(&catalog(), &cart);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].item.id, ItemId::new(1));
    }

    #[test]
    fn non_positive_and_out_of_stock_requests_drop_out() {
        let cart = Cart::from_entries([
            (ItemId::new(1), 0),
            (ItemId::new(2), -3),
            (ItemId::new(3), 2),
        ]);
        assert!(selected_items(&catalog(), &cart).is_empty());
    }

    #[test]
    fn first_catalog_match_wins_for_duplicate_ids() {
        let mut items = catalog();
        let mut shadow = items[0].clone();
        shadow.quantity = 50;
        items.push(shadow);
        let cart = Cart::from_entries([(ItemId::new(1), 10)]);
        let selected = selected_items(&items, &cart);
        assert_eq!(selected[0].selected_qty, 4);
    }

    #[test]
    fn output_follows_ascending_id_order() {
        let cart = Cart::from_entries([(ItemId::new(2), 1), (ItemId::new(1), 1)]);
        let ids: Vec<u32> = selected_items(&catalog(), &cart)
            .iter()
            .map(|line| line.item.id.get())
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn line_totals_use_exact_cents() {
        let cart = Cart::from_entries([(ItemId::new(2), 2)]);
        let selected = selected_items(&catalog(), &cart);
        assert_eq!(selected[0].line_total(), Money::from_cents(7100));
        assert_eq!(totals(&selected).total_cost, Money::from_cents(7100));
    }

    #[test]
    fn selected_item_wire_shape_is_flat() {
        let cart = Cart::from_entries([(ItemId::new(1), 2)]);
        let selected = selected_items(&catalog(), &cart);
        let value = serde_json::to_value(&selected[0]).unwrap();
        assert_eq!(value["id"], json!(1));
        assert_eq!(value["selected_qty"], json!(2));
        assert_eq!(value["price"], json!(45));
        assert!(value.get("item").is_none());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_catalog() -> impl Strategy<Value = Vec<InventoryItem>> {
            prop::collection::vec((1u32..20, 0u32..10, 0.0f64..200.0), 0..12).prop_map(|rows| {
                let raw: Vec<serde_json::Value> = rows
                    .into_iter()
                    .map(|(id, quantity, price)| {
                        json!({"id": id, "size": "205/55R16", "quantity": quantity, "price": price})
                    })
                    .collect();
                normalize(&raw)
            })
        }

        fn arb_cart() -> impl Strategy<Value = Cart> {
            prop::collection::btree_map(1u32..25, -5i64..15, 0..12)
                .prop_map(|m| Cart::from_entries(m.into_iter().map(|(id, q)| (ItemId::new(id), q))))
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: every selected line satisfies
            /// `0 < selected_qty <= stock` of its first catalog match.
            #[test]
            fn selected_lines_stay_within_stock(
                catalog in arb_catalog(),
                cart in arb_cart()
            ) {
                for line in selected_items(&catalog, &cart) {
                    let stock = catalog
                        .iter()
                        .find(|item| item.id == line.item.id)
                        .map(|item| item.quantity)
                        .unwrap_or(0);
                    prop_assert!(line.selected_qty > 0);
                    prop_assert!(line.selected_qty <= stock);
                }
            }

            /// Property: totals do not depend on line order.
            #[test]
            fn totals_are_order_independent(
                catalog in arb_catalog(),
                cart in arb_cart()
            ) {
                let selected = selected_items(&catalog, &cart);
                let mut reversed = selected.clone();
                reversed.reverse();
                let mut by_price = selected.clone();
                by_price.sort_by(|a, b| a.item.price.cmp(&b.item.price));

                let base = totals(&selected);
                prop_assert_eq!(totals(&reversed), base);
                prop_assert_eq!(totals(&by_price), base);
            }
        }
    }
}
