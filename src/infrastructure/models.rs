use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::order::{Order, OrderItem, OrderLineInput, OrderStatus, PlacedOrder};
use crate::domain::product::{Product, ProductDraft, ProductPage};
use crate::domain::session::{AuthResponse, User};

/// Go encodes nil slices as `null`; treat that like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn unnamed() -> String {
    "Unnamed".to_string()
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ProductDto {
    #[serde(default, alias = "ID")]
    pub id: String,
    #[serde(default = "unnamed", alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Price")]
    pub price: f64,
    #[serde(default, alias = "Stock")]
    pub stock: i32,
}

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        Product {
            id: dto.id,
            name: dto.name,
            price: dto.price,
            stock: dto.stock,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProductPageDto {
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<ProductDto>,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub per_page: i64,
}

impl From<ProductPageDto> for ProductPage {
    fn from(dto: ProductPageDto) -> Self {
        ProductPage {
            products: dto.products.into_iter().map(Product::from).collect(),
            total: dto.total,
            page: dto.page,
            per_page: dto.per_page,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductBody<'a> {
    pub name: &'a str,
    pub price: f64,
    pub stock: i32,
}

impl<'a> From<&'a ProductDraft> for ProductBody<'a> {
    fn from(draft: &'a ProductDraft) -> Self {
        ProductBody {
            name: &draft.name,
            price: draft.price,
            stock: draft.stock,
        }
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CredentialsBody<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct UserDto {
    #[serde(alias = "ID")]
    pub id: String,
    #[serde(alias = "Username")]
    pub username: String,
    #[serde(default, alias = "Role")]
    pub role: Option<String>,
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        User {
            id: dto.id,
            username: dto.username,
            role: dto.role.filter(|r| !r.is_empty()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthResponseDto {
    #[serde(default)]
    pub token: Option<String>,
    pub user: UserDto,
}

impl AuthResponseDto {
    /// A response without a usable token is not a successful sign-in.
    pub fn into_domain(self) -> Option<AuthResponse> {
        let token = self.token?.trim().to_string();
        if token.is_empty() {
            return None;
        }
        Some(AuthResponse {
            token,
            user: self.user.into(),
        })
    }
}

// ── Orders ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct OrderItemBody<'a> {
    pub product_id: &'a str,
    pub quantity: i32,
}

#[derive(Debug, Serialize)]
pub struct CreateOrderBody<'a> {
    pub user_id: &'a str,
    pub items: Vec<OrderItemBody<'a>>,
}

impl<'a> CreateOrderBody<'a> {
    pub fn new(user_id: &'a str, lines: &'a [OrderLineInput]) -> Self {
        CreateOrderBody {
            user_id,
            items: lines
                .iter()
                .map(|l| OrderItemBody {
                    product_id: &l.product_id,
                    quantity: l.quantity,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderResponseDto {
    pub order_id: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<CreateOrderResponseDto> for PlacedOrder {
    fn from(dto: CreateOrderResponseDto) -> Self {
        PlacedOrder {
            order_id: dto.order_id,
            status: OrderStatus::parse(dto.status.as_deref().unwrap_or("pending")),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateStatusBody<'a> {
    pub status: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct OrderItemDto {
    #[serde(default, alias = "ID")]
    pub id: String,
    #[serde(default, alias = "ProductID")]
    pub product_id: String,
    #[serde(default, alias = "Quantity")]
    pub quantity: i32,
    #[serde(default, alias = "Price")]
    pub price: f64,
    #[serde(default, alias = "Product")]
    pub product: Option<ProductDto>,
}

impl From<OrderItemDto> for OrderItem {
    fn from(dto: OrderItemDto) -> Self {
        OrderItem {
            id: dto.id,
            product_id: dto.product_id,
            product_name: dto.product.map(|p| p.name),
            quantity: dto.quantity,
            price: dto.price,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OrderDto {
    #[serde(default, alias = "ID")]
    pub id: String,
    #[serde(default, alias = "UserID")]
    pub user_id: String,
    #[serde(default, alias = "Status")]
    pub status: Option<String>,
    #[serde(default, alias = "TotalPrice")]
    pub total_price: f64,
    #[serde(default, alias = "CreatedAt")]
    pub created_at: Option<String>,
    #[serde(default, alias = "Items", deserialize_with = "null_as_default")]
    pub items: Vec<OrderItemDto>,
}

impl From<OrderDto> for Order {
    fn from(dto: OrderDto) -> Self {
        let created_at = dto
            .created_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc));
        Order {
            id: dto.id,
            user_id: dto.user_id,
            status: OrderStatus::parse(dto.status.as_deref().unwrap_or("unknown")),
            total_price: dto.total_price,
            created_at,
            items: dto.items.into_iter().map(OrderItem::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OrderListDto {
    #[serde(default, deserialize_with = "null_as_default")]
    pub orders: Vec<OrderDto>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}
