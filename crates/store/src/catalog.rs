//! Catalog ports: where item data comes from and goes back to.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use treadstock_catalog::{InventoryItem, normalize, normalize_for_edit};

use crate::error::{StoreError, StoreResult};

/// Where the storefront gets its catalog. Implementations hand back the raw
/// JSON values exactly as stored; callers receive them normalized.
pub trait CatalogSource: Send + Sync {
    /// The raw item objects, unnormalized.
    fn load_raw(&self) -> StoreResult<Vec<serde_json::Value>>;

    /// Browse-facing load: items with no quantity read as out of stock.
    fn load(&self) -> StoreResult<Vec<InventoryItem>> {
        Ok(normalize(&self.load_raw()?))
    }

    /// Admin-facing load: items with no quantity at all read as single units.
    fn load_for_edit(&self) -> StoreResult<Vec<InventoryItem>> {
        Ok(normalize_for_edit(&self.load_raw()?))
    }
}

/// A catalog location that can also be written back.
pub trait CatalogStore: CatalogSource {
    /// Persists the full item list, returning how many items were written.
    fn save(&self, items: &[InventoryItem]) -> StoreResult<usize>;
}

impl<S> CatalogSource for Arc<S>
where
    S: CatalogSource + ?Sized,
{
    fn load_raw(&self) -> StoreResult<Vec<serde_json::Value>> {
        (**self).load_raw()
    }
}

impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    fn save(&self, items: &[InventoryItem]) -> StoreResult<usize> {
        (**self).save(items)
    }
}

/// Catalog kept in a JSON file, the storefront's `inventory.json`.
///
/// The inventory file historically lived in a couple of spots relative to the
/// working directory, and existing checkouts still have it in any of them, so
/// loading walks a candidate list and takes the first one that parses. Writes
/// always go to the primary path.
#[derive(Debug, Clone)]
pub struct FileCatalogStore {
    primary: PathBuf,
    fallbacks: Vec<PathBuf>,
}

impl FileCatalogStore {
    /// Store over a single known file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            primary: path.into(),
            fallbacks: Vec::new(),
        }
    }

    /// Store rooted at `data_dir`, with the historical relative locations as
    /// read fallbacks.
    pub fn in_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let primary = data_dir.as_ref().join("inventory.json");
        let fallbacks = [
            PathBuf::from("data/inventory.json"),
            PathBuf::from("../data/inventory.json"),
        ]
        .into_iter()
        .filter(|path| *path != primary)
        .collect();
        Self { primary, fallbacks }
    }

    fn candidates(&self) -> impl Iterator<Item = &PathBuf> {
        std::iter::once(&self.primary).chain(self.fallbacks.iter())
    }
}

impl CatalogSource for FileCatalogStore {
    fn load_raw(&self) -> StoreResult<Vec<serde_json::Value>> {
        for path in self.candidates() {
            let text = match std::fs::read_to_string(path) {
                Ok(text) => text,
                Err(err) => {
                    tracing::debug!(path = %path.display(), error = %err, "catalog candidate unreadable");
                    continue;
                }
            };
            match serde_json::from_str(&text) {
                Ok(values) => {
                    tracing::debug!(path = %path.display(), "catalog loaded");
                    return Ok(values);
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "catalog candidate malformed, trying next");
                }
            }
        }

        let tried: Vec<String> = self
            .candidates()
            .map(|path| path.display().to_string())
            .collect();
        Err(StoreError::CatalogUnavailable(format!(
            "no readable inventory file (tried {})",
            tried.join(", ")
        )))
    }
}

impl CatalogStore for FileCatalogStore {
    fn save(&self, items: &[InventoryItem]) -> StoreResult<usize> {
        if let Some(parent) = self.primary.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| {
                    StoreError::io(format!("creating {}", parent.display()), source)
                })?;
            }
        }

        let json = serde_json::to_string_pretty(items)
            .map_err(|source| StoreError::json("serializing inventory items", source))?;
        std::fs::write(&self.primary, json)
            .map_err(|source| StoreError::io(format!("writing {}", self.primary.display()), source))?;

        tracing::debug!(path = %self.primary.display(), count = items.len(), "inventory saved");
        Ok(items.len())
    }
}

/// In-memory catalog for tests and dev runs.
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    values: RwLock<Vec<serde_json::Value>>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: Vec<serde_json::Value>) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }
}

impl CatalogSource for MemoryCatalogStore {
    fn load_raw(&self) -> StoreResult<Vec<serde_json::Value>> {
        Ok(self
            .values
            .read()
            .map_err(|_| StoreError::LockPoisoned)?
            .clone())
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn save(&self, items: &[InventoryItem]) -> StoreResult<usize> {
        let values = items
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| StoreError::json("serializing inventory items", source))?;
        *self.values.write().map_err(|_| StoreError::LockPoisoned)? = values;
        Ok(items.len())
    }
}
