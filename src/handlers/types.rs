//! Request and response bodies for the JSON API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::extractors::Numeric;
use crate::database::schema::types::{OrderStatus, UserRole};
use crate::error::{ApiError, Result};
use crate::models::{NewOrder, Order, OrderId, UserId, VendorId, VendorSummary};
use crate::services::Registration;

// ============================================================================
// Account Types
// ============================================================================

/// Registration Request. Field rules are checked on the trimmed values by
/// the identity service.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
    /// `user` or `vendor`
    #[serde(default)]
    pub role: String,
    pub company_name: Option<String>,
    pub description: Option<String>,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Registration {
            username: request.username,
            password: request.password,
            email: request.email,
            role: request.role,
            company_name: request.company_name,
            description: request.description,
        }
    }
}

/// Login Request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    pub password: Option<String>,
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user_id: UserId,
    pub role: UserRole,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// `{success, message}` body used by account and admin endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

// ============================================================================
// Order Types
// ============================================================================

/// Create Order Request. Numeric fields accept numbers or numeric strings.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[schema(value_type = i64)]
    pub user_id: Option<Numeric>,
    #[schema(value_type = i64)]
    pub vendor_id: Option<Numeric>,
    #[schema(value_type = i64)]
    pub service_id: Option<Numeric>,
    #[validate(length(max = 5000, message = "Order details must be at most 5000 characters."))]
    pub order_details: Option<String>,
    #[schema(value_type = f64)]
    pub total_amount: Option<Numeric>,
}

impl CreateOrderRequest {
    /// Check that every required field is present and numeric.
    pub fn into_new_order(self) -> Result<NewOrder> {
        let invalid = || {
            ApiError::Validation(
                "Invalid input. Please provide user_id, vendor_id, service_id, and total_amount."
                    .to_string(),
            )
        };
        let id = |value: &Option<Numeric>| value.as_ref().and_then(Numeric::as_id);

        Ok(NewOrder {
            user_id: id(&self.user_id).ok_or_else(invalid)?,
            vendor_id: id(&self.vendor_id).ok_or_else(invalid)?,
            service_id: id(&self.service_id).ok_or_else(invalid)?,
            total_amount: self
                .total_amount
                .as_ref()
                .and_then(Numeric::as_decimal)
                .ok_or_else(invalid)?,
            order_details: self.order_details,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderResponse {
    pub status: String,
    pub message: String,
    pub order_id: OrderId,
}

/// Update Order Status Request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusRequest {
    #[schema(value_type = i64)]
    pub vendor_id: Option<Numeric>,
    #[schema(value_type = i64)]
    pub order_id: Option<Numeric>,
    /// One of `confirmed`, `in_progress`, `completed`, `cancelled`
    pub new_status: Option<String>,
}

impl UpdateStatusRequest {
    pub fn into_parts(self) -> Result<(VendorId, OrderId, OrderStatus)> {
        let invalid = || {
            ApiError::Validation(
                "Invalid input. Please provide a valid vendor_id, order_id, and new_status \
                 (confirmed, in_progress, completed, cancelled)."
                    .to_string(),
            )
        };

        let vendor_id = self
            .vendor_id
            .as_ref()
            .and_then(Numeric::as_id)
            .ok_or_else(invalid)?;
        let order_id = self
            .order_id
            .as_ref()
            .and_then(Numeric::as_id)
            .ok_or_else(invalid)?;
        let new_status = self
            .new_status
            .as_deref()
            .and_then(|s| s.parse::<OrderStatus>().ok())
            .filter(OrderStatus::is_update_target)
            .ok_or_else(invalid)?;

        Ok((vendor_id, order_id, new_status))
    }
}

/// `{status, message}` body used by order endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub status: String,
    pub order: Order,
}

// ============================================================================
// Admin Types
// ============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct PendingVendorsResponse {
    pub success: bool,
    pub count: usize,
    pub vendors: Vec<VendorSummary>,
}

/// Form posted by the admin page.
#[derive(Debug, Deserialize)]
pub struct ApprovalForm {
    #[serde(default)]
    pub vendor_id: String,
    pub approve_vendor: Option<String>,
}

/// Query of the admin page after a redirect.
#[derive(Debug, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}
