//! The placed order and its fulfilment transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use treadstock_cart::SelectedItem;
use treadstock_core::{DomainError, DomainResult, Entity, Money, OrderId, ValueObject};

use crate::status::OrderStatus;

/// Who placed the order. Wire casing matches the checkout form payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl ValueObject for Customer {}

/// How the customer receives the tires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    #[default]
    Pickup,
    Delivery,
}

impl OrderType {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderType::Pickup => "pickup",
            OrderType::Delivery => "delivery",
        }
    }
}

impl core::fmt::Display for OrderType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for OrderType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pickup" => Ok(OrderType::Pickup),
            "delivery" => Ok(OrderType::Delivery),
            other => Err(DomainError::validation(format!(
                "unknown order type '{other}' (expected pickup or delivery)"
            ))),
        }
    }
}

/// Destination for delivery orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl ValueObject for DeliveryAddress {}

/// A placed order, shaped like the storefront checkout payload: camelCase
/// field names, ISO-8601 timestamp, `address` present only for deliveries,
/// items carrying the selected quantity alongside the catalog snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub timestamp: DateTime<Utc>,
    pub customer: Customer,
    pub order_type: OrderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<DeliveryAddress>,
    pub items: Vec<SelectedItem>,
    pub total: Money,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: OrderStatus,
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> OrderId {
        self.id
    }
}

impl Order {
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Pending → Confirmed.
    pub fn confirm(&mut self) -> DomainResult<()> {
        if self.status != OrderStatus::Pending {
            return Err(DomainError::invariant(
                "only pending orders can be confirmed",
            ));
        }
        self.status = OrderStatus::Confirmed;
        Ok(())
    }

    /// Confirmed → Ready.
    pub fn mark_ready(&mut self) -> DomainResult<()> {
        if self.status != OrderStatus::Confirmed {
            return Err(DomainError::invariant(
                "only confirmed orders can be marked ready",
            ));
        }
        self.status = OrderStatus::Ready;
        Ok(())
    }

    /// Ready → Completed.
    pub fn complete(&mut self) -> DomainResult<()> {
        if self.status != OrderStatus::Ready {
            return Err(DomainError::invariant(
                "only ready orders can be completed",
            ));
        }
        self.status = OrderStatus::Completed;
        Ok(())
    }

    /// Back to Pending from any non-terminal state.
    pub fn reset_to_pending(&mut self) -> DomainResult<()> {
        if self.status.is_terminal() {
            return Err(DomainError::invariant(
                "completed or cancelled orders cannot be reset",
            ));
        }
        self.status = OrderStatus::Pending;
        Ok(())
    }

    /// Cancels from any non-terminal state. Restoring the reserved stock is
    /// the caller's move, via [`crate::stock::restore_stock`].
    pub fn cancel(&mut self) -> DomainResult<()> {
        if self.status.is_terminal() {
            return Err(DomainError::invariant(
                "completed or cancelled orders cannot be cancelled",
            ));
        }
        self.status = OrderStatus::Cancelled;
        Ok(())
    }

    /// Applies whichever transition lands on `next`, enforcing the lifecycle.
    pub fn set_status(&mut self, next: OrderStatus) -> DomainResult<()> {
        match next {
            OrderStatus::Pending => self.reset_to_pending(),
            OrderStatus::Confirmed => self.confirm(),
            OrderStatus::Ready => self.mark_ready(),
            OrderStatus::Completed => self.complete(),
            OrderStatus::Cancelled => self.cancel(),
        }
    }
}
