//! Turns the checkout form plus the live cart into a submittable order.

use chrono::{DateTime, Utc};

use treadstock_cart::{Cart, selected_items, totals};
use treadstock_catalog::InventoryItem;
use treadstock_core::{DomainError, DomainResult, OrderId};

use crate::order::{Customer, DeliveryAddress, Order, OrderType};
use crate::status::OrderStatus;

/// Raw checkout form contents, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    pub customer: Customer,
    pub order_type: OrderType,
    pub address: Option<DeliveryAddress>,
    pub notes: String,
}

/// Validates the draft against the current catalog and cart and produces a
/// pending order stamped at `now`. The order id is the epoch-millisecond
/// timestamp, the same ids the storefront has always issued.
///
/// Pickup orders drop any address the form carried; delivery orders require
/// a complete one. The total is recomputed from the clamped selection, never
/// taken from the caller.
pub fn place_order(
    draft: OrderDraft,
    catalog: &[InventoryItem],
    cart: &Cart,
    now: DateTime<Utc>,
) -> DomainResult<Order> {
    let items = selected_items(catalog, cart);
    if items.is_empty() {
        return Err(DomainError::validation("cart is empty"));
    }

    let customer = validated_customer(draft.customer)?;
    let address = match draft.order_type {
        OrderType::Pickup => None,
        OrderType::Delivery => Some(validated_address(draft.address)?),
    };
    let total = totals(&items).total_cost;

    Ok(Order {
        id: OrderId::new(now.timestamp_millis()),
        timestamp: now,
        customer,
        order_type: draft.order_type,
        address,
        items,
        total,
        notes: draft.notes.trim().to_string(),
        status: OrderStatus::Pending,
    })
}

fn validated_customer(customer: Customer) -> DomainResult<Customer> {
    require(&customer.first_name, "first name")?;
    require(&customer.last_name, "last name")?;
    require(&customer.email, "email")?;
    require(&customer.phone, "phone")?;
    Ok(Customer {
        first_name: customer.first_name.trim().to_string(),
        last_name: customer.last_name.trim().to_string(),
        email: customer.email.trim().to_string(),
        phone: customer.phone.trim().to_string(),
    })
}

fn validated_address(address: Option<DeliveryAddress>) -> DomainResult<DeliveryAddress> {
    let Some(address) = address else {
        return Err(DomainError::validation("delivery orders require an address"));
    };
    require(&address.street, "street")?;
    require(&address.city, "city")?;
    require(&address.state, "state")?;
    require(&address.zip_code, "zip code")?;
    Ok(DeliveryAddress {
        street: address.street.trim().to_string(),
        city: address.city.trim().to_string(),
        state: address.state.trim().to_string(),
        zip_code: address.zip_code.trim().to_string(),
    })
}

fn require(value: &str, field: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(())
}
