//! Order collaborator port.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use treadstock_core::{DomainError, OrderId};
use treadstock_orders::{Order, OrderStatus, deduct_stock, restore_stock};

use crate::catalog::{CatalogSource, CatalogStore, FileCatalogStore};
use crate::error::{StoreError, StoreResult};

/// The order collaborator: accepts submissions, lists what it holds, and
/// applies lifecycle changes. Only the observed request/response shapes are
/// promised; there is no retry and no offline queue, callers resubmit.
pub trait OrderApi: Send + Sync {
    /// Submits a placed order, reserving its stock. Returns the id the order
    /// was accepted under.
    fn submit(&self, order: &Order) -> StoreResult<OrderId>;

    /// Every known order, in storage order.
    fn orders(&self) -> StoreResult<Vec<Order>>;

    /// Applies one lifecycle transition and returns the updated order.
    fn update_status(&self, id: OrderId, status: OrderStatus) -> StoreResult<Order>;

    /// Cancels one order, restoring its reserved stock where the backing
    /// store holds the catalog too.
    fn cancel(&self, id: OrderId) -> StoreResult<Order>;
}

impl<S> OrderApi for Arc<S>
where
    S: OrderApi + ?Sized,
{
    fn submit(&self, order: &Order) -> StoreResult<OrderId> {
        (**self).submit(order)
    }

    fn orders(&self) -> StoreResult<Vec<Order>> {
        (**self).orders()
    }

    fn update_status(&self, id: OrderId, status: OrderStatus) -> StoreResult<Order> {
        (**self).update_status(id, status)
    }

    fn cancel(&self, id: OrderId) -> StoreResult<Order> {
        (**self).cancel(id)
    }
}

/// Orders kept in a JSON file next to the inventory they draw stock from.
#[derive(Debug, Clone)]
pub struct FileOrderApi {
    orders_path: PathBuf,
    catalog: FileCatalogStore,
}

impl FileOrderApi {
    pub fn new(orders_path: impl Into<PathBuf>, catalog: FileCatalogStore) -> Self {
        Self {
            orders_path: orders_path.into(),
            catalog,
        }
    }

    /// `{data_dir}/orders.json` drawing stock from `{data_dir}/inventory.json`.
    pub fn in_data_dir(data_dir: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            data_dir.as_ref().join("orders.json"),
            FileCatalogStore::in_data_dir(data_dir),
        )
    }

    fn read_orders(&self) -> StoreResult<Vec<Order>> {
        match std::fs::read_to_string(&self.orders_path) {
            Ok(text) => serde_json::from_str(&text).map_err(|source| {
                StoreError::json(format!("parsing {}", self.orders_path.display()), source)
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(source) => Err(StoreError::io(
                format!("reading {}", self.orders_path.display()),
                source,
            )),
        }
    }

    fn write_orders(&self, orders: &[Order]) -> StoreResult<()> {
        if let Some(parent) = self.orders_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| {
                    StoreError::io(format!("creating {}", parent.display()), source)
                })?;
            }
        }
        let json = serde_json::to_string_pretty(orders)
            .map_err(|source| StoreError::json("serializing orders", source))?;
        std::fs::write(&self.orders_path, json).map_err(|source| {
            StoreError::io(format!("writing {}", self.orders_path.display()), source)
        })
    }
}

impl OrderApi for FileOrderApi {
    fn submit(&self, order: &Order) -> StoreResult<OrderId> {
        // Load both sides before touching the disk.
        let mut orders = self.read_orders()?;
        let mut catalog = self.catalog.load()?;

        orders.push(order.clone());
        self.write_orders(&orders)?;

        deduct_stock(&mut catalog, order);
        self.catalog.save(&catalog)?;

        tracing::debug!(id = %order.id, total = %order.total, "order accepted");
        Ok(order.id)
    }

    fn orders(&self) -> StoreResult<Vec<Order>> {
        self.read_orders()
    }

    fn update_status(&self, id: OrderId, status: OrderStatus) -> StoreResult<Order> {
        let mut orders = self.read_orders()?;
        let order = orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or(StoreError::Domain(DomainError::NotFound))?;
        order.set_status(status)?;
        let updated = order.clone();
        self.write_orders(&orders)?;
        Ok(updated)
    }

    fn cancel(&self, id: OrderId) -> StoreResult<Order> {
        let mut orders = self.read_orders()?;
        let order = orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or(StoreError::Domain(DomainError::NotFound))?;
        order.cancel()?;
        let updated = order.clone();
        self.write_orders(&orders)?;

        // The record is cancelled from here on; a failure below leaves stock
        // to be fixed by an admin save.
        let mut catalog = self.catalog.load()?;
        restore_stock(&mut catalog, &updated);
        self.catalog.save(&catalog)?;

        tracing::debug!(id = %updated.id, "order cancelled, stock restored");
        Ok(updated)
    }
}

/// In-memory order collaborator for tests and dev runs. Holds orders only;
/// stock stays with whatever catalog store the test pairs it with.
#[derive(Debug, Default)]
pub struct MemoryOrderApi {
    orders: RwLock<Vec<Order>>,
    reject: Option<String>,
}

impl MemoryOrderApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// A collaborator that refuses every submission with `message`.
    pub fn rejecting(message: impl Into<String>) -> Self {
        Self {
            orders: RwLock::new(Vec::new()),
            reject: Some(message.into()),
        }
    }
}

impl OrderApi for MemoryOrderApi {
    fn submit(&self, order: &Order) -> StoreResult<OrderId> {
        if let Some(message) = &self.reject {
            return Err(StoreError::Rejected(message.clone()));
        }
        self.orders
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .push(order.clone());
        Ok(order.id)
    }

    fn orders(&self) -> StoreResult<Vec<Order>> {
        Ok(self
            .orders
            .read()
            .map_err(|_| StoreError::LockPoisoned)?
            .clone())
    }

    fn update_status(&self, id: OrderId, status: OrderStatus) -> StoreResult<Order> {
        let mut orders = self.orders.write().map_err(|_| StoreError::LockPoisoned)?;
        let order = orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or(StoreError::Domain(DomainError::NotFound))?;
        order.set_status(status)?;
        Ok(order.clone())
    }

    fn cancel(&self, id: OrderId) -> StoreResult<Order> {
        self.update_status(id, OrderStatus::Cancelled)
    }
}
