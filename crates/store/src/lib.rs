//! `treadstock-store` — the ports between the pure domain crates and the
//! outside world: catalog files, the saved cart, and the order collaborator.
//!
//! Every port is a small `Send + Sync` trait with a file-backed
//! implementation for real runs and an in-memory one for tests and dev. No
//! storage engine is assumed beyond JSON files; malformed cart blobs degrade
//! to empty rather than failing, while a missing catalog is a hard
//! "catalog unavailable".

pub mod cart;
pub mod catalog;
pub mod error;
pub mod orders;

pub use cart::{CartStore, FileCartStore, MemoryCartStore};
pub use catalog::{CatalogSource, CatalogStore, FileCatalogStore, MemoryCatalogStore};
pub use error::{StoreError, StoreResult};
pub use orders::{FileOrderApi, MemoryOrderApi, OrderApi};
