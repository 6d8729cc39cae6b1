//! `treadstock-orders` — checkout, the order lifecycle, and the back-office
//! orders feed.
//!
//! Purely deterministic domain logic (no IO, no HTTP, no storage): building a
//! validated order from form input plus the live cart, walking its fulfilment
//! states, adjusting catalog stock for submissions and cancellations, and the
//! replace-wholesale feed the review screen refreshes against. Persistence
//! and transport live behind the `treadstock-store` ports.

pub mod checkout;
pub mod feed;
pub mod order;
pub mod status;
pub mod stock;

pub use checkout::{OrderDraft, place_order};
pub use feed::{OrdersFeed, StatusFilter};
pub use order::{Customer, DeliveryAddress, Order, OrderType};
pub use status::OrderStatus;
pub use stock::{deduct_stock, restore_stock};
