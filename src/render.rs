//! Plain-text views of the page state.

use std::fmt::Write;

use chrono::{DateTime, Local, Utc};

use crate::application::admin_page::AdminState;
use crate::application::shop_page::ShopState;
use crate::application::Profile;
use crate::domain::cart::Cart;
use crate::domain::order::Order;
use crate::domain::product::Pagination;

pub const CURRENCY: &str = "₸";

pub fn format_price(price: f64) -> String {
    format!("{:.2} {}", price, CURRENCY)
}

pub fn format_date(created_at: Option<DateTime<Utc>>) -> String {
    match created_at {
        Some(at) => at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "Date unavailable".to_string(),
    }
}

pub fn products(state: &ShopState) -> String {
    if let Some(error) = &state.products_error {
        return format!("{}\n", error);
    }
    if state.products.is_empty() {
        return "Products not found\n".to_string();
    }

    let mut out = String::new();
    for product in &state.products {
        let action = if state.cart.contains(&product.id) {
            "In cart"
        } else if product.is_out_of_stock() {
            "Out of stock"
        } else {
            "Add to cart"
        };
        let _ = writeln!(
            out,
            "{}  {}  {}  Stock: {}  [{}]",
            product.id,
            product.name,
            format_price(product.price),
            product.stock,
            action
        );
    }
    out
}

pub fn pagination(pagination: Option<Pagination>) -> String {
    let Some(p) = pagination else {
        return String::new();
    };

    let mut parts = Vec::new();
    if p.has_prev() {
        parts.push("prev".to_string());
    }
    for page in 1..=p.total_pages {
        if page == p.current {
            parts.push(format!("[{}]", page));
        } else {
            parts.push(page.to_string());
        }
    }
    if p.has_next() {
        parts.push("next".to_string());
    }
    format!("{}\n", parts.join(" "))
}

pub fn cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Cart is empty\nTotal: 0.00 ₸\n".to_string();
    }

    let mut out = String::new();
    for item in cart.items() {
        let _ = writeln!(
            out,
            "{}  {}  {} x {}",
            item.id,
            item.name,
            format_price(item.price),
            item.quantity
        );
    }
    let _ = writeln!(out, "Items: {}", cart.item_count());
    let _ = writeln!(out, "Total: {} {}", cart.formatted_total(), CURRENCY);
    out
}

pub fn order(order: &Order) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}  ID: {}  {}",
        format_date(order.created_at),
        order.id,
        order.status.label()
    );

    if order.items.is_empty() {
        let _ = writeln!(out, "  No items in this order");
    }
    for item in &order.items {
        let name = item
            .product_name
            .as_deref()
            .unwrap_or("Product details unavailable");
        let _ = writeln!(
            out,
            "  {}  Quantity: {}  {}",
            name,
            item.quantity,
            format_price(item.price)
        );
    }
    let _ = writeln!(out, "  Total: {}", format_price(order.total_price));

    let actions: Vec<&str> = order.status.transitions().iter().map(|s| s.as_str()).collect();
    if !actions.is_empty() {
        let _ = writeln!(out, "  Actions: {}", actions.join(", "));
    }
    out
}

pub fn orders(orders: &[Order], notice: Option<&str>) -> String {
    if let Some(notice) = notice {
        return format!("{}\n", notice);
    }
    if orders.is_empty() {
        return "No orders found\n".to_string();
    }
    orders.iter().map(order).collect::<Vec<_>>().join("\n")
}

pub fn profile(profile: &Profile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Username: {}", profile.username);
    let _ = writeln!(out, "User ID: {}", profile.user_id);
    if let Some(role) = &profile.role {
        let _ = writeln!(out, "Role: {}", role);
    }
    if let Some(error) = &profile.error {
        let _ = writeln!(out, "{}", error);
    }
    out
}

pub fn admin_products(state: &AdminState) -> String {
    if let Some(error) = &state.error {
        return format!("{}\n", error);
    }
    if state.products.is_empty() {
        return "No products\n".to_string();
    }

    let mut out = String::new();
    for product in &state.products {
        let _ = writeln!(
            out,
            "{}  {}  {}  Stock: {}",
            product.id,
            product.name,
            format_price(product.price),
            product.stock
        );
    }
    out
}
