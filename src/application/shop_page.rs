use std::sync::Arc;

use crate::domain::cart::Cart;
use crate::domain::order::{Order, OrderStatus, PlacedOrder};
use crate::domain::ports::KeyValueStore;
use crate::domain::product::{Pagination, Product, ProductFilters, ProductQuery};
use crate::errors::ClientError;
use crate::infrastructure::{CatalogClient, OrderClient};

use super::cart_store::CartStore;
use super::navigation::{Outcome, Route};
use super::session_store::{SessionStore, USER_ID_KEY};

pub const SHOP_PER_PAGE: i64 = 6;

#[derive(Debug, Clone)]
pub struct ShopState {
    pub products: Vec<Product>,
    pub products_error: Option<String>,
    pub cart: Cart,
    pub current_page: i64,
    pub per_page: i64,
    pub total: i64,
    pub filters: ProductFilters,
    pub user_id: String,
    pub orders: Vec<Order>,
    /// Shown in place of the order list (prompt or fetch error).
    pub orders_notice: Option<String>,
}

impl Default for ShopState {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            products_error: None,
            cart: Cart::default(),
            current_page: 1,
            per_page: SHOP_PER_PAGE,
            total: 0,
            filters: ProductFilters::default(),
            user_id: String::new(),
            orders: Vec::new(),
            orders_notice: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Checkout {
    /// Nothing was sent: the cart is empty or no user id is set.
    Skipped,
    Placed(PlacedOrder),
}

/// Catalog, cart and order history in one page.
pub struct ShopPage<S> {
    catalog: CatalogClient,
    orders: OrderClient,
    session: SessionStore<S>,
    carts: CartStore<S>,
    store: Arc<S>,
    pub state: ShopState,
}

impl<S: KeyValueStore> ShopPage<S> {
    pub fn new(catalog: CatalogClient, orders: OrderClient, store: Arc<S>) -> Self {
        Self {
            catalog,
            orders,
            session: SessionStore::new(Arc::clone(&store)),
            carts: CartStore::new(Arc::clone(&store)),
            store,
            state: ShopState::default(),
        }
    }

    /// Page start-up: products, the saved cart, then the saved user's orders.
    pub async fn load(&mut self) -> Result<Outcome<()>, ClientError> {
        self.fetch_products().await;
        self.state.cart = self.carts.load()?;

        if let Some(user_id) = self.store.get(USER_ID_KEY)?.filter(|id| !id.is_empty()) {
            self.state.user_id = user_id;
            return self.fetch_orders().await;
        }
        Ok(Outcome::Done(()))
    }

    /// Loads the cart alone, for actions that do not need the catalog.
    pub fn restore(&mut self) -> Result<(), ClientError> {
        self.state.cart = self.carts.load()?;
        if let Some(user_id) = self.store.get(USER_ID_KEY)? {
            self.state.user_id = user_id;
        }
        Ok(())
    }

    pub async fn fetch_products(&mut self) {
        let query = ProductQuery {
            page: self.state.current_page,
            per_page: self.state.per_page,
            filters: self.state.filters.clone(),
        };
        match self.catalog.list_products(&query).await {
            Ok(page) => {
                self.state.products = page.products;
                self.state.total = page.total;
                self.state.products_error = None;
            }
            Err(e) => {
                log::error!("Error fetching products: {}", e);
                self.state.products.clear();
                self.state.products_error = Some(format!("Error loading products: {}", e));
            }
        }
    }

    pub fn pagination(&self) -> Option<Pagination> {
        Pagination::new(self.state.total, self.state.per_page, self.state.current_page)
    }

    pub async fn go_to_page(&mut self, page: i64) {
        self.state.current_page = page.max(1);
        self.fetch_products().await;
    }

    pub async fn next_page(&mut self) {
        if self.pagination().is_some_and(|p| p.has_next()) {
            self.go_to_page(self.state.current_page + 1).await;
        }
    }

    pub async fn prev_page(&mut self) {
        if self.state.current_page > 1 {
            self.go_to_page(self.state.current_page - 1).await;
        }
    }

    pub async fn apply_filters(&mut self, filters: ProductFilters) {
        self.state.filters = filters;
        self.state.current_page = 1;
        self.fetch_products().await;
    }

    pub async fn reset_filters(&mut self) {
        self.apply_filters(ProductFilters::default()).await;
    }

    pub fn add_to_cart(&mut self, product: &Product) -> Result<(), ClientError> {
        self.state.cart.add(product)?;
        self.carts.save(&self.state.cart)
    }

    /// Adds a product by id, using the listed product when it is on screen and
    /// the catalog otherwise.
    pub async fn add_product(&mut self, id: &str) -> Result<Product, ClientError> {
        let product = match self.state.products.iter().find(|p| p.id == id) {
            Some(product) => product.clone(),
            None => self.catalog.get_product(id).await?,
        };
        self.add_to_cart(&product)?;
        Ok(product)
    }

    pub fn increase_quantity(&mut self, id: &str) -> Result<bool, ClientError> {
        let changed = self.state.cart.increase(id);
        if changed {
            self.carts.save(&self.state.cart)?;
        }
        Ok(changed)
    }

    pub fn decrease_quantity(&mut self, id: &str) -> Result<bool, ClientError> {
        let changed = self.state.cart.decrease(id);
        if changed {
            self.carts.save(&self.state.cart)?;
        }
        Ok(changed)
    }

    pub fn remove_from_cart(&mut self, id: &str) -> Result<bool, ClientError> {
        let changed = self.state.cart.remove(id);
        self.carts.save(&self.state.cart)?;
        Ok(changed)
    }

    pub fn clear_cart(&mut self) -> Result<(), ClientError> {
        self.state.cart.clear();
        self.carts.save(&self.state.cart)
    }

    pub fn set_user_id(&mut self, user_id: &str) -> Result<(), ClientError> {
        let user_id = user_id.trim();
        self.state.user_id = user_id.to_string();
        if !user_id.is_empty() {
            self.session.set_user_id(user_id)?;
        }
        Ok(())
    }

    pub fn checkout_enabled(&self) -> bool {
        !self.state.user_id.trim().is_empty() && !self.state.cart.is_empty()
    }

    pub async fn place_order(&mut self) -> Result<Outcome<Checkout>, ClientError> {
        if !self.checkout_enabled() {
            return Ok(Outcome::Done(Checkout::Skipped));
        }

        let token = self.session.token()?;
        let lines = self.state.cart.order_lines();
        let result = self
            .orders
            .create_order(self.state.user_id.trim(), &lines, token.as_deref())
            .await;

        let placed = match self.session.guard(result)? {
            Outcome::Done(placed) => placed,
            Outcome::Redirect(route) => return Ok(Outcome::Redirect(route)),
        };
        log::info!("order {} created", placed.order_id);

        self.clear_cart()?;
        self.fetch_products().await;
        // The order exists now; a failed or redirected refresh must not hide it.
        match self.fetch_orders().await {
            Ok(Outcome::Done(())) => {}
            Ok(Outcome::Redirect(route)) => {
                log::info!("orders not refreshed, {} required", route.path());
            }
            Err(e) => log::warn!("orders not refreshed: {}", e),
        }
        Ok(Outcome::Done(Checkout::Placed(placed)))
    }

    pub async fn fetch_orders(&mut self) -> Result<Outcome<()>, ClientError> {
        let user_id = self.state.user_id.trim().to_string();
        if user_id.is_empty() {
            self.state.orders.clear();
            self.state.orders_notice = Some("Please enter user ID".to_string());
            return Ok(Outcome::Done(()));
        }

        let Some(token) = self.session.token()? else {
            return Ok(Outcome::Redirect(Route::Login));
        };

        let result = self.orders.list_orders(&user_id, Some(&token)).await;
        match self.session.guard(result) {
            Ok(Outcome::Done(orders)) => {
                self.state.orders = orders;
                self.state.orders_notice = None;
                Ok(Outcome::Done(()))
            }
            Ok(Outcome::Redirect(route)) => Ok(Outcome::Redirect(route)),
            Err(e) => {
                log::error!("Error fetching orders: {}", e);
                self.state.orders.clear();
                self.state.orders_notice = Some(format!("Error fetching orders: {}", e));
                Ok(Outcome::Done(()))
            }
        }
    }

    pub async fn get_order(&self, id: &str) -> Result<Outcome<Order>, ClientError> {
        let token = self.session.token()?;
        let result = self.orders.get_order(id, token.as_deref()).await;
        self.session.guard(result)
    }

    /// Moves an order to `completed` or `cancelled`, then refreshes the order
    /// list (and the catalog, since cancelling returns stock).
    pub async fn update_order_status(
        &mut self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Outcome<OrderStatus>, ClientError> {
        if !matches!(status, OrderStatus::Completed | OrderStatus::Cancelled) {
            return Err(ClientError::Validation(format!(
                "cannot move an order to {}",
                status.label()
            )));
        }
        let current = match self.state.orders.iter().find(|o| o.id == order_id) {
            Some(order) => order.status.clone(),
            None => match self.get_order(order_id).await? {
                Outcome::Done(order) => order.status,
                Outcome::Redirect(route) => return Ok(Outcome::Redirect(route)),
            },
        };
        if !current.transitions().contains(&status) {
            return Err(ClientError::Validation(format!(
                "order {} is {} and cannot be changed",
                order_id,
                current.label()
            )));
        }

        let token = self.session.token()?;
        let result = self
            .orders
            .update_status(order_id, &status, token.as_deref())
            .await;
        if let Outcome::Redirect(route) = self.session.guard(result)? {
            return Ok(Outcome::Redirect(route));
        }
        log::info!("order {} moved to {}", order_id, status.as_str());

        if let Outcome::Redirect(route) = self.fetch_orders().await? {
            return Ok(Outcome::Redirect(route));
        }
        if status == OrderStatus::Cancelled {
            self.fetch_products().await;
        }
        Ok(Outcome::Done(status))
    }
}
