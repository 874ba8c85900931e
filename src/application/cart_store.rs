use std::sync::Arc;

use crate::domain::cart::Cart;
use crate::domain::ports::KeyValueStore;
use crate::errors::ClientError;

pub const CART_KEY: &str = "cart";

/// Loads and saves the cart under the `cart` storage key.
pub struct CartStore<S> {
    store: Arc<S>,
}

impl<S: KeyValueStore> CartStore<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// A missing or unreadable cart comes back empty.
    pub fn load(&self) -> Result<Cart, ClientError> {
        let Some(raw) = self.store.get(CART_KEY)? else {
            return Ok(Cart::default());
        };
        match serde_json::from_str(&raw) {
            Ok(cart) => Ok(cart),
            Err(e) => {
                log::warn!("discarding unreadable saved cart: {}", e);
                Ok(Cart::default())
            }
        }
    }

    pub fn save(&self, cart: &Cart) -> Result<(), ClientError> {
        self.store.set(CART_KEY, &serde_json::to_string(cart)?)?;
        Ok(())
    }
}
