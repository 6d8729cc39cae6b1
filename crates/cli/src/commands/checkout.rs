//! `treadstock checkout`: place an order from the saved cart.

use anyhow::Context;
use chrono::Utc;

use treadstock_orders::{Customer, DeliveryAddress, OrderDraft, OrderType, place_order};
use treadstock_store::{CartStore, CatalogSource, OrderApi};

use crate::cli::CheckoutArgs;

pub fn run(
    catalog: &impl CatalogSource,
    carts: &impl CartStore,
    api: &impl OrderApi,
    args: &CheckoutArgs,
) -> anyhow::Result<String> {
    let cart = carts.load()?;
    if cart.is_empty() {
        return Ok("Your cart is empty!".to_string());
    }
    let items = catalog.load().context("could not load the catalog")?;
    let draft = OrderDraft {
        customer: Customer {
            first_name: args.first_name.clone(),
            last_name: args.last_name.clone(),
            email: args.email.clone(),
            phone: args.phone.clone(),
        },
        order_type: args.order_type,
        address: delivery_address(args),
        notes: args.notes.clone(),
    };
    let order = place_order(draft, &items, &cart, Utc::now())?;

    let id = match api.submit(&order) {
        Ok(id) => id,
        Err(err) => {
            tracing::warn!(error = %err, "order submission failed");
            anyhow::bail!("Failed to submit order. Please try again or contact us directly.");
        }
    };
    // The cart only clears once the order is in; a failed submit keeps it.
    carts.clear()?;
    Ok(format!(
        "Order #{id} placed successfully!\n\nTotal: ${}\n\nWe'll contact you shortly at {}",
        order.total, order.customer.email
    ))
}

fn delivery_address(args: &CheckoutArgs) -> Option<DeliveryAddress> {
    if args.order_type != OrderType::Delivery {
        return None;
    }
    Some(DeliveryAddress {
        street: args.street.clone().unwrap_or_default(),
        city: args.city.clone().unwrap_or_default(),
        state: args.state.clone().unwrap_or_default(),
        zip_code: args.zip.clone().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use treadstock_cart::Cart;
    use treadstock_core::ItemId;
    use treadstock_store::{MemoryCartStore, MemoryCatalogStore, MemoryOrderApi};

    fn seeded_catalog() -> MemoryCatalogStore {
        MemoryCatalogStore::with_values(vec![
            json!({"id": 1, "size": "205/55R16", "brand": "Michelin", "model": "Defender",
                   "quantity": 4, "price": 45}),
            json!({"id": 2, "size": "195/65R15", "brand": "Goodyear", "model": "Assurance",
                   "quantity": 2, "price": 35.5}),
        ])
    }

    fn form() -> CheckoutArgs {
        CheckoutArgs {
            first_name: "Dana".to_string(),
            last_name: "Reyes".to_string(),
            email: "dana@example.com".to_string(),
            phone: "555-0100".to_string(),
            ..CheckoutArgs::default()
        }
    }

    #[test]
    fn success_confirms_and_clears_the_cart() {
        let catalog = seeded_catalog();
        let carts = MemoryCartStore::new();
        carts
            .save(&Cart::from_entries([(ItemId::new(1), 2)]))
            .unwrap();
        let api = MemoryOrderApi::new();

        let output = run(&catalog, &carts, &api, &form()).unwrap();
        assert!(output.contains("placed successfully!"));
        assert!(output.contains("Total: $90.00"));
        assert!(output.ends_with("We'll contact you shortly at dana@example.com"));
        assert!(carts.load().unwrap().is_empty());
        assert_eq!(api.orders().unwrap().len(), 1);
    }

    #[test]
    fn rejected_submission_keeps_the_cart() {
        let catalog = seeded_catalog();
        let carts = MemoryCartStore::new();
        carts
            .save(&Cart::from_entries([(ItemId::new(1), 1)]))
            .unwrap();
        let api = MemoryOrderApi::rejecting("inventory offline");

        let err = run(&catalog, &carts, &api, &form()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to submit order. Please try again or contact us directly."
        );
        assert!(!carts.load().unwrap().is_empty());
    }

    #[test]
    fn an_empty_cart_never_reaches_the_api() {
        let catalog = seeded_catalog();
        let api = MemoryOrderApi::new();
        let output = run(&catalog, &MemoryCartStore::new(), &api, &form()).unwrap();
        assert_eq!(output, "Your cart is empty!");
        assert!(api.orders().unwrap().is_empty());
    }

    #[test]
    fn delivery_requires_a_complete_address() {
        let catalog = seeded_catalog();
        let carts = MemoryCartStore::new();
        carts
            .save(&Cart::from_entries([(ItemId::new(1), 1)]))
            .unwrap();
        let api = MemoryOrderApi::new();

        let args = CheckoutArgs {
            order_type: OrderType::Delivery,
            street: Some("12 Main St".to_string()),
            ..form()
        };
        let err = run(&catalog, &carts, &api, &args).unwrap_err();
        assert!(err.to_string().contains("city is required"));

        let args = CheckoutArgs {
            order_type: OrderType::Delivery,
            street: Some("12 Main St".to_string()),
            city: Some("Springfield".to_string()),
            state: Some("IL".to_string()),
            zip: Some("62704".to_string()),
            ..form()
        };
        let output = run(&catalog, &carts, &api, &args).unwrap();
        assert!(output.contains("placed successfully!"));
    }
}
