//! Back-office orders list with refresh bookkeeping.

use core::str::FromStr;

use treadstock_core::{DomainError, OrderId};

use crate::order::Order;
use crate::status::OrderStatus;

/// Narrows the orders list to one status, or shows everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn matches(self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => status == wanted,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        Ok(StatusFilter::Only(raw.parse()?))
    }
}

/// Orders as the review screen sees them. Each refresh replaces the list
/// wholesale (last fetch wins) and tracks the pending count so a growing
/// backlog can be announced.
#[derive(Debug, Clone, Default)]
pub struct OrdersFeed {
    orders: Vec<Order>,
    last_pending_count: usize,
}

impl OrdersFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a fresh fetch, newest first. Returns how many orders turned
    /// pending since the previous refresh, when there was a previous count to
    /// compare against; the first refresh never announces.
    pub fn refresh(&mut self, mut orders: Vec<Order>) -> Option<usize> {
        orders.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        self.orders = orders;

        let pending = self.pending_count();
        let announce = if pending > self.last_pending_count && self.last_pending_count > 0 {
            Some(pending - self.last_pending_count)
        } else {
            None
        };
        self.last_pending_count = pending;
        announce
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.orders
            .iter()
            .filter(|order| order.status == OrderStatus::Pending)
            .count()
    }

    /// The current list narrowed by `filter`, preserving feed order.
    pub fn filtered(&self, filter: StatusFilter) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|order| filter.matches(order.status))
            .collect()
    }

    pub fn find(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }
}
