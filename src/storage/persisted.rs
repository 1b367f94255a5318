use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::{KeyValueStore, StorageError};
use crate::domain::{Cart, Product};

pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct StoredCartRef<'a> {
    version: u32,
    items: &'a Cart,
}

#[derive(Deserialize)]
struct VersionedCart {
    version: u32,
    items: Vec<Product>,
}

/// Accepted stored shapes. The bare array is what older storefront builds wrote.
enum StoredCart {
    Versioned(VersionedCart),
    Legacy(Vec<Product>),
}

impl StoredCart {
    /// Arrays are always the legacy shape and objects always the versioned one.
    /// Derived struct visitors would also take a `[version, items]` array.
    fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        if value.is_array() {
            Ok(StoredCart::Legacy(serde_json::from_value(value)?))
        } else if value.is_object() {
            Ok(StoredCart::Versioned(serde_json::from_value(value)?))
        } else {
            Err(serde::de::Error::custom("stored cart is neither an object nor an array"))
        }
    }
}

/// Reads and writes the cart under a single key of a [`KeyValueStore`].
#[derive(Clone)]
pub struct CartRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl CartRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the stored cart, falling back to an empty cart when the entry is
    /// missing, unreadable, or invalid.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn load(&self) -> Cart {
        let raw = match self.store.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored cart, starting empty");
                return Cart::new();
            }
            Err(e) => {
                warn!(error = %e, "Stored cart unreadable, starting empty");
                return Cart::new();
            }
        };

        let items = match StoredCart::parse(&raw) {
            Ok(StoredCart::Versioned(VersionedCart { version: SCHEMA_VERSION, items })) => items,
            Ok(StoredCart::Versioned(VersionedCart { version, .. })) => {
                warn!(version, "Unsupported stored cart version, starting empty");
                return Cart::new();
            }
            Ok(StoredCart::Legacy(items)) => {
                debug!("Read legacy cart format");
                items
            }
            Err(e) => {
                warn!(error = %e, "Stored cart is corrupt, starting empty");
                return Cart::new();
            }
        };

        match Cart::from_items(items) {
            Ok(cart) => {
                debug!(lines = cart.len(), "Loaded stored cart");
                cart
            }
            Err(reason) => {
                warn!(%reason, "Stored cart violates invariants, starting empty");
                Cart::new()
            }
        }
    }

    /// Overwrites the stored cart.
    pub fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let value = serde_json::to_string(&StoredCartRef { version: SCHEMA_VERSION, items: cart })?;
        self.store.set_item(&self.key, &value)
    }
}
