//! Cart persistence port.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use treadstock_cart::Cart;

use crate::error::{StoreError, StoreResult};

/// Where the shopper's cart lives between runs. One blob under one fixed
/// location; last writer wins.
pub trait CartStore: Send + Sync {
    /// The saved cart. Missing or malformed content reads as empty, never as
    /// an error.
    fn load(&self) -> StoreResult<Cart>;

    fn save(&self, cart: &Cart) -> StoreResult<()>;

    /// Forgets the saved cart entirely.
    fn clear(&self) -> StoreResult<()>;
}

impl<S> CartStore for Arc<S>
where
    S: CartStore + ?Sized,
{
    fn load(&self) -> StoreResult<Cart> {
        (**self).load()
    }

    fn save(&self, cart: &Cart) -> StoreResult<()> {
        (**self).save(cart)
    }

    fn clear(&self) -> StoreResult<()> {
        (**self).clear()
    }
}

/// Cart kept as one JSON file in the user's data directory.
#[derive(Debug, Clone)]
pub struct FileCartStore {
    path: PathBuf,
}

impl FileCartStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Per-user cart location: `{os_data_dir}/treadstock/cart.json`, falling
    /// back to `{fallback_dir}/cart.json` when no OS data directory resolves.
    pub fn default_user_path(fallback_dir: &Path) -> PathBuf {
        let base = dirs::data_dir().or_else(|| {
            dirs::home_dir().map(|mut home| {
                home.push(".local");
                home.push("share");
                home
            })
        });
        match base {
            Some(mut dir) => {
                dir.push("treadstock");
                dir.push("cart.json");
                dir
            }
            None => {
                tracing::warn!("no OS data directory resolved, keeping the cart beside the inventory");
                fallback_dir.join("cart.json")
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStore for FileCartStore {
    fn load(&self) -> StoreResult<Cart> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Cart::new()),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "cart file unreadable, starting empty");
                return Ok(Cart::new());
            }
        };
        match serde_json::from_str(&text) {
            Ok(cart) => Ok(cart),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "cart file malformed, starting empty");
                Ok(Cart::new())
            }
        }
    }

    fn save(&self, cart: &Cart) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| {
                    StoreError::io(format!("creating {}", parent.display()), source)
                })?;
            }
        }
        let json = serde_json::to_string_pretty(cart)
            .map_err(|source| StoreError::json("serializing cart", source))?;
        std::fs::write(&self.path, json)
            .map_err(|source| StoreError::io(format!("writing {}", self.path.display()), source))
    }

    fn clear(&self) -> StoreResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::io(
                format!("removing {}", self.path.display()),
                source,
            )),
        }
    }
}

/// In-memory cart for tests and dev runs.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    cart: RwLock<Cart>,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for MemoryCartStore {
    fn load(&self) -> StoreResult<Cart> {
        Ok(self.cart.read().map_err(|_| StoreError::LockPoisoned)?.clone())
    }

    fn save(&self, cart: &Cart) -> StoreResult<()> {
        *self.cart.write().map_err(|_| StoreError::LockPoisoned)? = cart.clone();
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        self.save(&Cart::new())
    }
}
