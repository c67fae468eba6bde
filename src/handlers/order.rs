//! Order creation, status update and lookup handlers.

use axum::{
    extract::{Path, State},
    Json,
};

use super::extractors::ValidatedJson;
use super::response::Created;
use super::types::{
    CreateOrderRequest, CreateOrderResponse, OrderResponse, StatusResponse, UpdateStatusRequest,
};
use crate::error::{ApiError, ErrorResponse, Result};
use crate::models::OrderId;
use crate::AppState;

/// Place a new order. It always starts out `pending`.
#[utoipa::path(
    post,
    path = "/api/order/create",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = CreateOrderResponse),
        (status = 400, description = "Missing or non-numeric fields", body = ErrorResponse),
        (status = 500, description = "Failed to create order", body = ErrorResponse)
    ),
    tag = "order"
)]
pub async fn create_order(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateOrderRequest>,
) -> Result<Created<CreateOrderResponse>> {
    let new_order = request.into_new_order()?;
    let order_id = state.orders.create(new_order).await?;

    Ok(Created(CreateOrderResponse {
        status: "success".to_string(),
        message: "Order created successfully.".to_string(),
        order_id,
    }))
}

/// Change the status of an order owned by the requesting vendor
#[utoipa::path(
    post,
    path = "/api/order/update_status",
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated or already set", body = StatusResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 403, description = "Vendor does not own the order", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 409, description = "Transition not allowed", body = ErrorResponse)
    ),
    tag = "order"
)]
pub async fn update_status(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> Result<Json<StatusResponse>> {
    let (vendor_id, order_id, new_status) = request.into_parts()?;
    let outcome = state
        .orders
        .update_status(vendor_id, order_id, new_status)
        .await?;

    Ok(Json(StatusResponse {
        status: "success".to_string(),
        message: outcome.message().to_string(),
    }))
}

/// Fetch a single order
#[utoipa::path(
    get,
    path = "/api/order/{order_id}",
    params(("order_id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "The order", body = OrderResponse),
        (status = 400, description = "Malformed order id", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    ),
    tag = "order"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<OrderResponse>> {
    let order_id: OrderId = order_id
        .parse()
        .map_err(|_| ApiError::validation_field("order_id", "Invalid order id."))?;
    let order = state.orders.get(order_id).await?;
    Ok(Json(OrderResponse {
        status: "success".to_string(),
        order,
    }))
}
