//! Order creation and vendor-driven status transitions.

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::TransitionPolicy;
use crate::database::schema::types::OrderStatus;
use crate::database::OrderRepository;
use crate::error::{ApiError, Result};
use crate::middleware::metrics::{track_order_created, track_status_update};
use crate::models::{NewOrder, Order, OrderId, StatusUpdate, VendorId};
use crate::utils::sanitize_text;

/// Largest amount a NUMERIC(12,2) column holds.
fn max_total_amount() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

#[derive(Clone)]
pub struct OrderService {
    repository: Arc<dyn OrderRepository>,
    policy: TransitionPolicy,
}

impl OrderService {
    pub fn new(repository: Arc<dyn OrderRepository>, policy: TransitionPolicy) -> Self {
        Self { repository, policy }
    }

    /// Create an order in `pending` status and return its id.
    pub async fn create(&self, mut order: NewOrder) -> Result<OrderId> {
        order.total_amount = order.total_amount.round_dp(2);
        if order.total_amount.abs() > max_total_amount() {
            return Err(ApiError::validation_field(
                "total_amount",
                "total_amount is out of range.",
            ));
        }
        order.order_details = order.order_details.as_deref().map(sanitize_text);

        let order_id = self.repository.insert(order.clone()).await?;

        track_order_created();
        info!(
            order_id,
            user_id = order.user_id,
            vendor_id = order.vendor_id,
            service_id = order.service_id,
            total_amount = %order.total_amount,
            "📦 Order created"
        );
        Ok(order_id)
    }

    pub async fn get(&self, order_id: OrderId) -> Result<Order> {
        self.repository
            .find(order_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Order not found.".to_string()))
    }

    /// Move an order owned by `vendor_id` to `new_status`.
    pub async fn update_status(
        &self,
        vendor_id: VendorId,
        order_id: OrderId,
        new_status: OrderStatus,
    ) -> Result<StatusUpdate> {
        if !new_status.is_update_target() {
            return Err(ApiError::validation_field(
                "new_status",
                format!("'{}' is not a valid target status.", new_status),
            ));
        }

        let ownership = match self.repository.find_ownership(order_id).await? {
            Some(ownership) => ownership,
            None => {
                track_status_update("not_found");
                return Err(ApiError::NotFound("Order not found.".to_string()));
            }
        };

        if ownership.vendor_id != vendor_id {
            warn!(
                order_id,
                vendor_id,
                owner = ownership.vendor_id,
                "Vendor attempted to update an order it does not own"
            );
            track_status_update("forbidden");
            return Err(ApiError::Forbidden(
                "Unauthorized. You do not have permission to update this order.".to_string(),
            ));
        }

        if !self.policy.permits(ownership.status, new_status) {
            track_status_update("invalid_transition");
            return Err(ApiError::InvalidTransition {
                from: ownership.status,
                to: new_status,
            });
        }

        let rows = self
            .repository
            .update_status(order_id, vendor_id, new_status)
            .await?;

        let outcome = if rows == 0 {
            track_status_update("unchanged");
            StatusUpdate::Unchanged
        } else {
            track_status_update("updated");
            info!(
                order_id,
                vendor_id,
                from = %ownership.status,
                to = %new_status,
                "Order status updated"
            );
            StatusUpdate::Updated
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use OrderStatus::*;

    fn new_order(vendor_id: VendorId) -> NewOrder {
        NewOrder {
            user_id: 1,
            vendor_id,
            service_id: 3,
            order_details: None,
            total_amount: Decimal::new(995, 1),
        }
    }

    fn service(policy: TransitionPolicy) -> (OrderService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (OrderService::new(store.clone(), policy), store)
    }

    #[tokio::test]
    async fn test_created_order_is_pending() {
        let (service, _) = service(TransitionPolicy::Strict);
        let id = service.create(new_order(2)).await.unwrap();
        let order = service.get(id).await.unwrap();
        assert_eq!(order.status, Pending);
        assert_eq!(order.total_amount, Decimal::new(9950, 2));
    }

    #[tokio::test]
    async fn test_details_are_sanitized() {
        let (service, _) = service(TransitionPolicy::Strict);
        let mut order = new_order(2);
        order.order_details = Some("<b>Back door</b> & \"gate\"".to_string());
        let id = service.create(order).await.unwrap();

        let stored = service.get(id).await.unwrap();
        assert_eq!(
            stored.order_details.as_deref(),
            Some("Back door &amp; &quot;gate&quot;")
        );
    }

    #[tokio::test]
    async fn test_amount_out_of_range() {
        let (service, store) = service(TransitionPolicy::Strict);
        let mut order = new_order(2);
        order.total_amount = Decimal::new(10_000_000_000, 0);
        assert!(service.create(order).await.is_err());
        assert_eq!(store.order_count(), 0);
    }

    #[tokio::test]
    async fn test_non_owner_is_forbidden_for_every_target() {
        let (service, store) = service(TransitionPolicy::Permissive);
        let id = service.create(new_order(2)).await.unwrap();

        for target in OrderStatus::UPDATE_TARGETS {
            let err = service.update_status(5, id, target).await.unwrap_err();
            assert!(matches!(err, ApiError::Forbidden(_)));
        }
        assert_eq!(store.find(id).await.unwrap().unwrap().status, Pending);
    }

    #[tokio::test]
    async fn test_missing_order_is_not_found() {
        let (service, _) = service(TransitionPolicy::Strict);
        assert!(matches!(
            service.update_status(2, 404, Confirmed).await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_same_status_is_unchanged() {
        let (service, store) = service(TransitionPolicy::Strict);
        let id = service.create(new_order(2)).await.unwrap();

        assert_eq!(
            service.update_status(2, id, Confirmed).await.unwrap(),
            StatusUpdate::Updated
        );
        let before = store.find(id).await.unwrap().unwrap().updated_at;

        assert_eq!(
            service.update_status(2, id, Confirmed).await.unwrap(),
            StatusUpdate::Unchanged
        );
        assert_eq!(store.find(id).await.unwrap().unwrap().updated_at, before);
    }

    #[tokio::test]
    async fn test_strict_policy_rejects_skipping_states() {
        let (service, _) = service(TransitionPolicy::Strict);
        let id = service.create(new_order(2)).await.unwrap();

        let err = service.update_status(2, id, Completed).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::InvalidTransition {
                from: Pending,
                to: Completed
            }
        ));

        service.update_status(2, id, Confirmed).await.unwrap();
        service.update_status(2, id, InProgress).await.unwrap();
        service.update_status(2, id, Completed).await.unwrap();
        assert!(service.update_status(2, id, Cancelled).await.is_err());
    }

    #[tokio::test]
    async fn test_permissive_policy_accepts_any_target() {
        let (service, store) = service(TransitionPolicy::Permissive);
        let id = service.create(new_order(2)).await.unwrap();

        assert_eq!(
            service.update_status(2, id, Completed).await.unwrap(),
            StatusUpdate::Updated
        );
        store.set_order_status(id, Cancelled);
        assert_eq!(
            service.update_status(2, id, Confirmed).await.unwrap(),
            StatusUpdate::Updated
        );
    }

    #[tokio::test]
    async fn test_pending_is_never_a_target() {
        let (service, _) = service(TransitionPolicy::Permissive);
        let id = service.create(new_order(2)).await.unwrap();
        service.update_status(2, id, Confirmed).await.unwrap();
        assert!(matches!(
            service.update_status(2, id, Pending).await,
            Err(ApiError::ValidationWithField { .. })
        ));
    }
}
