use reqwest::{Client, Url};

use crate::domain::product::{Product, ProductPage, ProductQuery};
use crate::errors::ClientError;

use super::http::{endpoint, send_json, with_bearer};
use super::models::{ProductDto, ProductPageDto};

/// Read side of the catalog service.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
}

impl CatalogClient {
    pub fn new(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub async fn list_products(&self, query: &ProductQuery) -> Result<ProductPage, ClientError> {
        let mut url = endpoint(&self.base_url, "/api/products")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &query.page.to_string());
            pairs.append_pair("per_page", &query.per_page.to_string());
            if let Some(name) = query.filters.name.as_deref().filter(|n| !n.is_empty()) {
                pairs.append_pair("name", name);
            }
            if let Some(min) = query.filters.min_price {
                pairs.append_pair("min_price", &min.to_string());
            }
            if let Some(max) = query.filters.max_price {
                pairs.append_pair("max_price", &max.to_string());
            }
        }
        log::debug!("fetching products from {}", url);

        let page: ProductPageDto = send_json(with_bearer(self.http.get(url), None), false).await?;
        Ok(page.into())
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, ClientError> {
        let url = endpoint(&self.base_url, &format!("/api/products/{}", id))?;
        let product: ProductDto = send_json(with_bearer(self.http.get(url), None), false).await?;
        Ok(product.into())
    }
}
