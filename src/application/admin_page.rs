use std::sync::Arc;

use crate::domain::ports::KeyValueStore;
use crate::domain::product::{Pagination, Product, ProductDraft, ProductFilters, ProductQuery};
use crate::errors::ClientError;
use crate::infrastructure::{AdminClient, CatalogClient};

use super::navigation::Outcome;
use super::session_store::SessionStore;

pub const ADMIN_PER_PAGE: i64 = 5;

#[derive(Debug, Clone)]
pub struct AdminState {
    pub products: Vec<Product>,
    pub error: Option<String>,
    pub current_page: i64,
    pub per_page: i64,
    pub total: i64,
    pub filters: ProductFilters,
}

impl Default for AdminState {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            error: None,
            current_page: 1,
            per_page: ADMIN_PER_PAGE,
            total: 0,
            filters: ProductFilters::default(),
        }
    }
}

/// Product management: listing through the catalog, mutations through the
/// admin API.
pub struct AdminPage<S> {
    catalog: CatalogClient,
    admin: AdminClient,
    session: SessionStore<S>,
    pub state: AdminState,
}

impl<S: KeyValueStore> AdminPage<S> {
    pub fn new(catalog: CatalogClient, admin: AdminClient, store: Arc<S>) -> Self {
        Self {
            catalog,
            admin,
            session: SessionStore::new(store),
            state: AdminState::default(),
        }
    }

    pub async fn fetch_products(&mut self, page: i64, filters: ProductFilters) {
        let query = ProductQuery {
            page: page.max(1),
            per_page: self.state.per_page,
            filters: filters.clone(),
        };
        self.state.filters = filters;

        match self.catalog.list_products(&query).await {
            Ok(listing) => {
                self.state.products = listing.products;
                self.state.total = listing.total;
                self.state.current_page = if listing.page > 0 { listing.page } else { query.page };
                if listing.per_page > 0 {
                    self.state.per_page = listing.per_page;
                }
                self.state.error = None;
            }
            Err(e) => {
                log::error!("Error fetching products: {}", e);
                self.state.products.clear();
                self.state.error = Some(format!("Error: {}", e));
            }
        }
    }

    pub fn pagination(&self) -> Option<Pagination> {
        Pagination::new(self.state.total, self.state.per_page, self.state.current_page)
    }

    pub async fn create_product(
        &mut self,
        draft: &ProductDraft,
    ) -> Result<Outcome<Product>, ClientError> {
        draft.validate()?;
        let token = self.session.token()?;
        let result = self.admin.create_product(draft, token.as_deref()).await;
        let outcome = self.session.guard(result)?;

        if let Outcome::Done(product) = &outcome {
            log::info!("Product {} created via admin API", product.id);
            self.fetch_products(1, ProductFilters::default()).await;
        }
        Ok(outcome)
    }

    pub async fn update_product(
        &mut self,
        id: &str,
        draft: &ProductDraft,
    ) -> Result<Outcome<Product>, ClientError> {
        draft.validate()?;
        let token = self.session.token()?;
        let result = self.admin.update_product(id, draft, token.as_deref()).await;
        let outcome = self.session.guard(result)?;

        if outcome.redirect().is_none() {
            log::info!("Product {} updated via admin API", id);
            self.refresh().await;
        }
        Ok(outcome)
    }

    pub async fn delete_product(&mut self, id: &str) -> Result<Outcome<()>, ClientError> {
        let token = self.session.token()?;
        let result = self.admin.delete_product(id, token.as_deref()).await;
        let outcome = self.session.guard(result)?;

        if outcome.redirect().is_none() {
            log::info!("Product {} deleted via admin API", id);
            self.refresh().await;
        }
        Ok(outcome)
    }

    async fn refresh(&mut self) {
        let filters = self.state.filters.clone();
        self.fetch_products(self.state.current_page, filters).await;
    }
}
