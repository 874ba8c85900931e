use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::errors::DomainError;
use super::order::OrderLineInput;
use super::product::Product;

/// A cart line. `stock` is the last stock count seen in the catalog and only
/// bounds the quantity client-side; the order service re-validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub quantity: i32,
}

impl CartItem {
    pub fn line_total(&self) -> BigDecimal {
        decimal_price(self.price) * BigDecimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Adds one unit of `product`. A product already in the cart gets its
    /// quantity bumped (up to the known stock) instead of a second line.
    pub fn add(&mut self, product: &Product) -> Result<&CartItem, DomainError> {
        if product.is_out_of_stock() {
            return Err(DomainError::OutOfStock);
        }

        match self.items.iter().position(|item| item.id == product.id) {
            Some(idx) => {
                let item = &mut self.items[idx];
                item.stock = product.stock;
                item.quantity = (item.quantity + 1).min(item.stock);
                Ok(&self.items[idx])
            }
            None => {
                self.items.push(CartItem {
                    id: product.id.clone(),
                    name: product.name.clone(),
                    price: product.price,
                    stock: product.stock,
                    quantity: 1,
                });
                Ok(&self.items[self.items.len() - 1])
            }
        }
    }

    /// Returns `false` when the item is missing or already at stock.
    pub fn increase(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) if item.quantity < item.stock => {
                item.quantity += 1;
                true
            }
            _ => false,
        }
    }

    /// Drops the quantity by one, removing the line when it reaches zero.
    pub fn decrease(&mut self, id: &str) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        item.quantity -= 1;
        if item.quantity <= 0 {
            self.remove(id);
        }
        true
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of quantities, shown as the cart badge.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|item| i64::from(item.quantity)).sum()
    }

    pub fn total(&self) -> BigDecimal {
        self.items
            .iter()
            .fold(BigDecimal::from(0), |acc, item| acc + item.line_total())
    }

    pub fn formatted_total(&self) -> String {
        format_amount(&self.total())
    }

    pub fn order_lines(&self) -> Vec<OrderLineInput> {
        self.items
            .iter()
            .map(|item| OrderLineInput {
                product_id: item.id.clone(),
                quantity: item.quantity,
            })
            .collect()
    }
}

/// Converts a wire price through its shortest decimal representation so that
/// `9.99` stays `9.99` rather than its binary expansion.
fn decimal_price(price: f64) -> BigDecimal {
    BigDecimal::from_str(&price.to_string()).unwrap_or_else(|_| BigDecimal::from(0))
}

/// Two-decimal rendering used for every money amount.
pub fn format_amount(amount: &BigDecimal) -> String {
    amount.round(2).with_scale(2).to_string()
}
