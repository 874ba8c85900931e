use reqwest::{Client, Url};

use crate::domain::product::{Product, ProductDraft};
use crate::errors::ClientError;

use super::http::{endpoint, send, send_json, with_bearer};
use super::models::{ProductBody, ProductDto};

pub const ROLE_HEADER: &str = "X-User-Role";
const ADMIN_ROLE: &str = "admin";

/// Product mutations, served by the admin API of the user service.
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: Client,
    base_url: Url,
}

impl AdminClient {
    pub fn new(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub async fn create_product(
        &self,
        draft: &ProductDraft,
        token: Option<&str>,
    ) -> Result<Product, ClientError> {
        let url = endpoint(&self.base_url, "/api/admin/products")?;
        let req = with_bearer(self.http.post(url), token)
            .header(ROLE_HEADER, ADMIN_ROLE)
            .json(&ProductBody::from(draft));
        let product: ProductDto = send_json(req, token.is_some()).await?;
        Ok(product.into())
    }

    pub async fn update_product(
        &self,
        id: &str,
        draft: &ProductDraft,
        token: Option<&str>,
    ) -> Result<Product, ClientError> {
        let url = endpoint(&self.base_url, &format!("/api/admin/products/{}", id))?;
        let req = with_bearer(self.http.put(url), token)
            .header(ROLE_HEADER, ADMIN_ROLE)
            .json(&ProductBody::from(draft));
        let product: ProductDto = send_json(req, token.is_some()).await?;
        Ok(product.into())
    }

    pub async fn delete_product(&self, id: &str, token: Option<&str>) -> Result<(), ClientError> {
        let url = endpoint(&self.base_url, &format!("/api/admin/products/{}", id))?;
        let req = with_bearer(self.http.delete(url), token).header(ROLE_HEADER, ADMIN_ROLE);
        send(req, token.is_some()).await?;
        Ok(())
    }
}
