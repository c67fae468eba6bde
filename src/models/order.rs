use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::database::schema::types::OrderStatus;

pub type OrderId = i64;

/// A stored order.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Order {
    pub order_id: OrderId,
    pub user_id: i64,
    pub vendor_id: i64,
    pub service_id: i64,
    pub order_details: Option<String>,
    #[schema(value_type = f64)]
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for a new order. There is deliberately no status field:
/// every order starts out `pending`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: i64,
    pub vendor_id: i64,
    pub service_id: i64,
    pub order_details: Option<String>,
    pub total_amount: Decimal,
}

/// Ownership and status of an order, as read before a transition.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct OrderOwnership {
    pub vendor_id: i64,
    pub status: OrderStatus,
}

/// Result of a status update that passed all checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusUpdate {
    Updated,
    /// The order already had the requested status.
    Unchanged,
}

impl StatusUpdate {
    pub fn message(&self) -> &'static str {
        match self {
            StatusUpdate::Updated => "Order status updated successfully.",
            StatusUpdate::Unchanged => {
                "Order status was already set to the requested value. No change made."
            }
        }
    }
}
