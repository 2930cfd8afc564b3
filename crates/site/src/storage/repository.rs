//! Cart persistence on top of a key-value store.

use thiserror::Error;

use super::{KeyValueStore, StoreError};
use crate::cart::CartState;

/// Key the cart has always been stored under.
pub const DEFAULT_CART_KEY: &str = "mdi_cart";

/// Errors that can occur when loading a persisted cart.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The store itself could not be read.
    #[error("failed to read cart from storage: {0}")]
    Store(#[from] StoreError),

    /// The stored value is not a list of line items.
    #[error("stored cart is not valid: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Loads and saves [`CartState`] under a fixed key.
#[derive(Debug, Clone)]
pub struct CartRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> CartRepository<S> {
    /// Repository using [`DEFAULT_CART_KEY`].
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_CART_KEY)
    }

    /// Repository using a custom key.
    #[must_use]
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The key the cart is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consume the repository and return the underlying store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Load the stored cart. An absent key is an empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Store`] if the store cannot be read and
    /// [`LoadError::Parse`] if the stored value is not a line-item list.
    pub fn load(&self) -> Result<CartState, LoadError> {
        match self.store.get(&self.key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(CartState::default()),
        }
    }

    /// Write the full cart under the key.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if encoding or writing fails.
    pub fn save(&mut self, state: &CartState) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(state).map_err(StoreError::Encode)?;
        self.store.set(&self.key, &encoded)
    }
}
