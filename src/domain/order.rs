use chrono::{DateTime, Utc};

const PENDING_TRANSITIONS: &[OrderStatus] = &[OrderStatus::Completed, OrderStatus::Cancelled];
const NO_TRANSITIONS: &[OrderStatus] = &[];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
    /// A status this client does not know about, kept verbatim.
    Other(String),
}

impl OrderStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "pending" => OrderStatus::Pending,
            "completed" => OrderStatus::Completed,
            "cancelled" => OrderStatus::Cancelled,
            other => OrderStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Other(s) => s,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Other(s) => s,
        }
    }

    /// Statuses a user may move an order to from this one.
    pub fn transitions(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => PENDING_TRANSITIONS,
            _ => NO_TRANSITIONS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub id: String,
    pub product_id: String,
    pub product_name: Option<String>,
    pub quantity: i32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub status: OrderStatus,
    pub total_price: f64,
    pub created_at: Option<DateTime<Utc>>,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineInput {
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub order_id: String,
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_is_kept_verbatim() {
        let status = OrderStatus::parse("shipped");
        assert_eq!(status, OrderStatus::Other("shipped".to_string()));
        assert_eq!(status.label(), "shipped");
        assert_eq!(status.as_str(), "shipped");
    }

    #[test]
    fn only_pending_orders_can_transition() {
        assert_eq!(OrderStatus::Pending.transitions().len(), 2);
        assert!(OrderStatus::Completed.transitions().is_empty());
        assert!(OrderStatus::Cancelled.transitions().is_empty());
    }

    #[test]
    fn labels_are_capitalised() {
        assert_eq!(OrderStatus::parse("cancelled").label(), "Cancelled");
        assert_eq!(OrderStatus::Pending.label(), "Pending");
    }
}
