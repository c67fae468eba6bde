//! Repository traits for data access.
//!
//! Services depend on these traits rather than on a concrete pool so the
//! business rules can be exercised without a running database. The
//! PostgreSQL implementation lives in [`super::postgres`].

use async_trait::async_trait;

use crate::database::schema::types::OrderStatus;
use crate::error::ApiError;
use crate::models::{
    CredentialRecord, NewAccount, NewOrder, Order, OrderId, OrderOwnership, UserId, VendorId,
    VendorSummary,
};

/// Account storage used by the identity service.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Whether any account already uses this username or this email.
    async fn account_exists(&self, username: &str, email: &str) -> Result<bool, ApiError>;

    /// Insert the user row and, for vendors, the vendor row, atomically.
    ///
    /// A uniqueness violation surfaces as [`ApiError::Conflict`].
    async fn create_account(&self, account: NewAccount) -> Result<UserId, ApiError>;

    /// Look up the credentials for an exact username.
    async fn find_credentials(&self, username: &str) -> Result<Option<CredentialRecord>, ApiError>;

    /// Approval flag of the vendor owned by `user_id`, or `None` when the
    /// vendor row is missing.
    async fn vendor_approval(&self, user_id: UserId) -> Result<Option<bool>, ApiError>;
}

/// Vendor storage used by the approval workflow.
#[async_trait]
pub trait VendorRepository: Send + Sync {
    /// Unapproved vendors, oldest registration first.
    async fn list_pending(&self) -> Result<Vec<VendorSummary>, ApiError>;

    /// Mark the vendor approved. Returns the number of matching rows.
    async fn approve(&self, vendor_id: VendorId) -> Result<u64, ApiError>;
}

/// Order storage used by the order lifecycle service.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert an order in `pending` status and return its id.
    async fn insert(&self, order: NewOrder) -> Result<OrderId, ApiError>;

    async fn find(&self, order_id: OrderId) -> Result<Option<Order>, ApiError>;

    async fn find_ownership(&self, order_id: OrderId) -> Result<Option<OrderOwnership>, ApiError>;

    /// Set the status when the order matches both ids and does not already
    /// have `status`. Returns the number of rows changed.
    async fn update_status(
        &self,
        order_id: OrderId,
        vendor_id: VendorId,
        status: OrderStatus,
    ) -> Result<u64, ApiError>;
}
