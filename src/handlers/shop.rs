use std::sync::Arc;

use crate::application::{Checkout, Outcome, ShopPage};
use crate::domain::order::OrderStatus;
use crate::domain::ports::KeyValueStore;
use crate::errors::ClientError;
use crate::{render, Backends};

use super::cli::{CartAction, ListArgs};
use super::{failure, Response};

fn page<S: KeyValueStore>(backends: &Backends, store: Arc<S>) -> ShopPage<S> {
    ShopPage::new(backends.catalog.clone(), backends.orders.clone(), store)
}

pub async fn list_products<S: KeyValueStore>(
    backends: &Backends,
    store: Arc<S>,
    args: &ListArgs,
) -> Result<Response, ClientError> {
    let mut shop = page(backends, store);
    shop.restore()?;
    shop.state.filters = args.filters();
    shop.go_to_page(args.page).await;

    let text = format!(
        "{}{}",
        render::products(&shop.state),
        render::pagination(shop.pagination())
    );
    if shop.state.products_error.is_some() {
        return Ok(Response::failed(text));
    }
    Ok(Response::ok(text))
}

pub async fn show_product(backends: &Backends, id: &str) -> Result<Response, ClientError> {
    let product = backends.catalog.get_product(id).await?;
    Ok(Response::ok(format!(
        "{}  {}  {}  Stock: {}\n",
        product.id,
        product.name,
        render::format_price(product.price),
        product.stock
    )))
}

pub async fn cart<S: KeyValueStore>(
    backends: &Backends,
    store: Arc<S>,
    action: CartAction,
) -> Result<Response, ClientError> {
    let mut shop = page(backends, store);
    shop.restore()?;

    match action {
        CartAction::Show => {}
        CartAction::Add { id } => {
            shop.add_product(&id).await?;
        }
        CartAction::Inc { id } => {
            if !shop.increase_quantity(&id)? {
                log::info!("{} is not in the cart or already at stock", id);
            }
        }
        CartAction::Dec { id } => {
            shop.decrease_quantity(&id)?;
        }
        CartAction::Remove { id } => {
            shop.remove_from_cart(&id)?;
        }
        CartAction::Clear => shop.clear_cart()?,
    }
    Ok(Response::ok(render::cart(&shop.state.cart)))
}

pub async fn checkout<S: KeyValueStore>(
    backends: &Backends,
    store: Arc<S>,
    user_id: Option<&str>,
) -> Result<Response, ClientError> {
    let mut shop = page(backends, store);
    shop.restore()?;
    if let Some(user_id) = user_id {
        shop.set_user_id(user_id)?;
    }

    let outcome = shop
        .place_order()
        .await
        .map_err(failure("Failed to create order"))?;
    Ok(Response::from_outcome(outcome, |checkout| match checkout {
        Checkout::Skipped => Response::failed("Checkout needs a user ID and a non-empty cart\n"),
        Checkout::Placed(placed) => Response::ok(format!(
            "Order created successfully! Order ID: {}\n",
            placed.order_id
        )),
    }))
}

pub async fn list_orders<S: KeyValueStore>(
    backends: &Backends,
    store: Arc<S>,
    user_id: Option<&str>,
) -> Result<Response, ClientError> {
    let mut shop = page(backends, store);
    shop.restore()?;
    if let Some(user_id) = user_id {
        shop.set_user_id(user_id)?;
    }

    let outcome = shop.fetch_orders().await?;
    let state = &shop.state;
    Ok(Response::from_outcome(outcome, |()| {
        let text = render::orders(&state.orders, state.orders_notice.as_deref());
        if state.orders_notice.is_some() {
            Response::failed(text)
        } else {
            Response::ok(text)
        }
    }))
}

pub async fn show_order<S: KeyValueStore>(
    backends: &Backends,
    store: Arc<S>,
    id: &str,
) -> Result<Response, ClientError> {
    let shop = page(backends, store);
    let outcome = shop.get_order(id).await?;
    Ok(Response::from_outcome(outcome, |order| {
        Response::ok(render::order(&order))
    }))
}

pub async fn update_order_status<S: KeyValueStore>(
    backends: &Backends,
    store: Arc<S>,
    id: &str,
    status: OrderStatus,
) -> Result<Response, ClientError> {
    let mut shop = page(backends, store);
    shop.restore()?;

    let outcome = shop
        .update_order_status(id, status)
        .await
        .map_err(failure("Failed to update order"))?;
    if let Outcome::Done(status) = &outcome {
        log::debug!("order {} is now {}", id, status.as_str());
    }
    Ok(Response::from_outcome(outcome, |status| {
        Response::ok(format!("Order status updated to {}\n", status.label()))
    }))
}
