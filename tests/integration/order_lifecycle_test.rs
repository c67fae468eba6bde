//! Order lifecycle against a real PostgreSQL database.
//!
//! Run with `TEST_DATABASE_URL=postgres://... cargo test -- --ignored`.

use anyhow::Result;
use marketplace_api::config::TransitionPolicy;
use marketplace_api::database::schema::types::OrderStatus;
use marketplace_api::database::{run_migrations, setup_database, PgStore};
use marketplace_api::error::ApiError;
use marketplace_api::models::{NewOrder, StatusUpdate};
use marketplace_api::services::OrderService;
use rust_decimal::Decimal;
use std::sync::Arc;

async fn order_service(policy: TransitionPolicy) -> Result<OrderService> {
    let url = std::env::var("TEST_DATABASE_URL")?;
    let pool = setup_database(&url, 2).await?;
    run_migrations(&pool).await?;
    Ok(OrderService::new(Arc::new(PgStore::new(pool)), policy))
}

fn new_order(vendor_id: i64) -> NewOrder {
    NewOrder {
        user_id: 1,
        vendor_id,
        service_id: 3,
        order_details: Some("<b>Deep clean</b> & windows".to_string()),
        total_amount: Decimal::new(9950, 2),
    }
}

// Vendor ids unlikely to collide with rows from earlier runs
fn unique_vendor_id() -> i64 {
    (uuid::Uuid::new_v4().as_u128() % 1_000_000_000) as i64 + 1_000_000
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_order_starts_pending_and_follows_lifecycle() -> Result<()> {
    let orders = order_service(TransitionPolicy::Strict).await?;
    let vendor_id = unique_vendor_id();

    let order_id = orders.create(new_order(vendor_id)).await?;
    let order = orders.get(order_id).await?;
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_amount, Decimal::new(9950, 2));
    assert_eq!(
        order.order_details.as_deref(),
        Some("Deep clean &amp; windows")
    );

    for status in [
        OrderStatus::Confirmed,
        OrderStatus::InProgress,
        OrderStatus::Completed,
    ] {
        let update = orders.update_status(vendor_id, order_id, status).await?;
        assert_eq!(update, StatusUpdate::Updated);
        assert_eq!(orders.get(order_id).await?.status, status);
    }

    let again = orders
        .update_status(vendor_id, order_id, OrderStatus::Completed)
        .await?;
    assert_eq!(again, StatusUpdate::Unchanged);

    let result = orders
        .update_status(vendor_id, order_id, OrderStatus::Cancelled)
        .await;
    assert!(matches!(result, Err(ApiError::InvalidTransition { .. })));

    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_other_vendor_cannot_touch_order() -> Result<()> {
    let orders = order_service(TransitionPolicy::Strict).await?;
    let vendor_id = unique_vendor_id();
    let order_id = orders.create(new_order(vendor_id)).await?;

    let result = orders
        .update_status(vendor_id + 1, order_id, OrderStatus::Confirmed)
        .await;
    assert!(matches!(result, Err(ApiError::Forbidden(_))));
    assert_eq!(orders.get(order_id).await?.status, OrderStatus::Pending);

    let missing = orders
        .update_status(vendor_id, i64::MAX, OrderStatus::Confirmed)
        .await;
    assert!(matches!(missing, Err(ApiError::NotFound(_))));

    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_permissive_policy_allows_any_target() -> Result<()> {
    let orders = order_service(TransitionPolicy::Permissive).await?;
    let vendor_id = unique_vendor_id();
    let order_id = orders.create(new_order(vendor_id)).await?;

    let update = orders
        .update_status(vendor_id, order_id, OrderStatus::Completed)
        .await?;
    assert_eq!(update, StatusUpdate::Updated);

    let update = orders
        .update_status(vendor_id, order_id, OrderStatus::Confirmed)
        .await?;
    assert_eq!(update, StatusUpdate::Updated);

    Ok(())
}
