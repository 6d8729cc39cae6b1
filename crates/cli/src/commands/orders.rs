//! `treadstock orders`: the back-office order review screen.

use std::thread;
use std::time::Duration;

use anyhow::Context;

use treadstock_core::OrderId;
use treadstock_orders::{Order, OrderStatus, OrdersFeed, StatusFilter};
use treadstock_store::OrderApi;

use crate::cli::OrdersAction;

pub fn run(api: &impl OrderApi, action: OrdersAction) -> anyhow::Result<String> {
    match action {
        OrdersAction::List {
            status,
            watch,
            interval,
        } => {
            if watch {
                watch_loop(api, status, interval)
            } else {
                let mut feed = OrdersFeed::new();
                feed.refresh(api.orders().context("could not load orders")?);
                Ok(render_feed(&feed, status))
            }
        }
        OrdersAction::Confirm { id } => transition(api, id, OrderStatus::Confirmed),
        OrdersAction::Ready { id } => transition(api, id, OrderStatus::Ready),
        OrdersAction::Complete { id } => transition(api, id, OrderStatus::Completed),
        OrdersAction::Reset { id } => transition(api, id, OrderStatus::Pending),
        OrdersAction::Cancel { id } => {
            let order = api.cancel(id).context("could not cancel the order")?;
            Ok(format!(
                "Order #{} cancelled successfully. Inventory has been restored.",
                order.id
            ))
        }
    }
}

fn transition(api: &impl OrderApi, id: OrderId, status: OrderStatus) -> anyhow::Result<String> {
    let order = api
        .update_status(id, status)
        .context("could not update the order")?;
    Ok(format!("Order #{} marked as {}", order.id, order.status))
}

/// Polls the order list like the review screen does, calling out growth in
/// the pending backlog between refreshes.
fn watch_loop(api: &impl OrderApi, status: StatusFilter, interval: u64) -> anyhow::Result<String> {
    let mut feed = OrdersFeed::new();
    println!("Watching orders every {interval}s (Ctrl-C to stop)");
    loop {
        match api.orders() {
            Ok(orders) => {
                if let Some(new_count) = feed.refresh(orders) {
                    println!("You have {new_count} new order(s)");
                }
                println!("{}", render_feed(&feed, status));
            }
            Err(err) => {
                // Keep polling; the next refresh may succeed.
                tracing::warn!(error = %err, "orders refresh failed");
            }
        }
        thread::sleep(Duration::from_secs(interval));
    }
}

fn render_feed(feed: &OrdersFeed, status: StatusFilter) -> String {
    let filtered = feed.filtered(status);
    if filtered.is_empty() {
        return "No orders found.".to_string();
    }
    let mut out = format!("{} order(s)", filtered.len());
    let pending = feed.pending_count();
    if pending > 0 {
        out.push_str(&format!(", {pending} pending"));
    }
    for order in filtered {
        out.push('\n');
        out.push('\n');
        out.push_str(&render_order(order));
    }
    out
}

fn render_order(order: &Order) -> String {
    let mut out = format!(
        "Order #{} [{}] {}",
        order.id,
        order.status,
        order.timestamp.format("%b %-d, %Y %-I:%M %p")
    );
    out.push_str(&format!(
        "\n  {} <{}> {}",
        order.customer.full_name(),
        order.customer.email,
        order.customer.phone
    ));
    out.push_str(&format!("\n  {}", order.order_type));
    if let Some(address) = &order.address {
        out.push_str(&format!(
            " to {}, {}, {} {}",
            address.street, address.city, address.state, address.zip_code
        ));
    }
    for line in &order.items {
        let name = format!("{} {}", line.item.brand, line.item.model)
            .trim()
            .to_string();
        out.push_str(&format!(
            "\n  {} x {} ({}) ${}",
            line.selected_qty,
            name,
            line.item.size,
            line.line_total()
        ));
    }
    if !order.notes.is_empty() {
        out.push_str(&format!("\n  Note: {}", order.notes));
    }
    out.push_str(&format!("\n  Total: ${}", order.total));
    out
}
