use reqwest::{Client, Url};

use crate::domain::order::{Order, OrderLineInput, OrderStatus, PlacedOrder};
use crate::errors::ClientError;

use super::http::{endpoint, send_json, with_bearer};
use super::models::{
    CreateOrderBody, CreateOrderResponseDto, OrderDto, OrderListDto, UpdateStatusBody,
};

#[derive(Debug, Clone)]
pub struct OrderClient {
    http: Client,
    base_url: Url,
}

impl OrderClient {
    pub fn new(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub async fn create_order(
        &self,
        user_id: &str,
        lines: &[OrderLineInput],
        token: Option<&str>,
    ) -> Result<PlacedOrder, ClientError> {
        let url = endpoint(&self.base_url, "/api/orders")?;
        let body = CreateOrderBody::new(user_id, lines);
        log::debug!("sending order for user {} with {} line(s)", user_id, lines.len());

        let req = with_bearer(self.http.post(url), token).json(&body);
        let created: CreateOrderResponseDto = send_json(req, token.is_some()).await?;
        Ok(created.into())
    }

    pub async fn list_orders(
        &self,
        user_id: &str,
        token: Option<&str>,
    ) -> Result<Vec<Order>, ClientError> {
        let mut url = endpoint(&self.base_url, "/api/orders")?;
        url.query_pairs_mut().append_pair("user_id", user_id);
        log::debug!("fetching orders from {}", url);

        let req = with_bearer(self.http.get(url), token);
        let list: OrderListDto = send_json(req, token.is_some()).await?;
        Ok(list.orders.into_iter().map(Order::from).collect())
    }

    pub async fn get_order(&self, id: &str, token: Option<&str>) -> Result<Order, ClientError> {
        let url = endpoint(&self.base_url, &format!("/api/orders/{}", id))?;
        let req = with_bearer(self.http.get(url), token);
        let order: OrderDto = send_json(req, token.is_some()).await?;
        Ok(order.into())
    }

    pub async fn update_status(
        &self,
        id: &str,
        status: &OrderStatus,
        token: Option<&str>,
    ) -> Result<Order, ClientError> {
        let url = endpoint(&self.base_url, &format!("/api/orders/{}", id))?;
        let req = with_bearer(self.http.patch(url), token).json(&UpdateStatusBody {
            status: status.as_str(),
        });
        let order: OrderDto = send_json(req, token.is_some()).await?;
        Ok(order.into())
    }
}
