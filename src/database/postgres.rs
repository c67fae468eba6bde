//! PostgreSQL-backed repositories.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::repository::{IdentityRepository, OrderRepository, VendorRepository};
use crate::database::schema::types::OrderStatus;
use crate::error::ApiError;
use crate::models::{
    CredentialRecord, NewAccount, NewOrder, Order, OrderId, OrderOwnership, UserId, VendorId,
    VendorSummary,
};

/// Repository implementation over a shared connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a unique-constraint violation to a conflict, anything else to a
/// persistence failure with the given client message.
fn map_insert_error(message: &'static str) -> impl FnOnce(sqlx::Error) -> ApiError {
    move |e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            ApiError::Conflict("A user with this username or email already exists.".to_string())
        }
        _ => ApiError::Persistence {
            message: message.to_string(),
            source: e,
        },
    }
}

#[async_trait]
impl IdentityRepository for PgStore {
    async fn account_exists(&self, username: &str, email: &str) -> Result<bool, ApiError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE username = $1 OR email = $2)",
        )
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create_account(&self, account: NewAccount) -> Result<UserId, ApiError> {
        const FAILED: &str = "An unexpected error occurred during registration.";

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(ApiError::persistence(FAILED))?;

        let user_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (username, password_hash, email, role)
             VALUES ($1, $2, $3, $4)
             RETURNING user_id",
        )
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(&account.email)
        .bind(account.role)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_insert_error(FAILED))?;

        if let Some(profile) = &account.vendor_profile {
            sqlx::query(
                "INSERT INTO vendors (user_id, company_name, description) VALUES ($1, $2, $3)",
            )
            .bind(user_id)
            .bind(&profile.company_name)
            .bind(&profile.description)
            .execute(&mut *tx)
            .await
            .map_err(map_insert_error(FAILED))?;
        }

        // Dropping `tx` on any early return above rolls both inserts back.
        tx.commit().await.map_err(ApiError::persistence(FAILED))?;

        debug!(user_id, role = %account.role, "Account rows committed");
        Ok(user_id)
    }

    async fn find_credentials(&self, username: &str) -> Result<Option<CredentialRecord>, ApiError> {
        let record = sqlx::query_as::<_, CredentialRecord>(
            "SELECT user_id, username, password_hash, role FROM users WHERE username = $1 LIMIT 1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn vendor_approval(&self, user_id: UserId) -> Result<Option<bool>, ApiError> {
        let approved =
            sqlx::query_scalar::<_, bool>("SELECT is_approved FROM vendors WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(approved)
    }
}

#[async_trait]
impl VendorRepository for PgStore {
    async fn list_pending(&self) -> Result<Vec<VendorSummary>, ApiError> {
        let vendors = sqlx::query_as::<_, VendorSummary>(
            "SELECT v.vendor_id, v.company_name, v.description, u.username, u.email, v.created_at
             FROM vendors v
             JOIN users u ON v.user_id = u.user_id
             WHERE v.is_approved = FALSE
             ORDER BY v.created_at ASC, v.vendor_id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vendors)
    }

    async fn approve(&self, vendor_id: VendorId) -> Result<u64, ApiError> {
        let result = sqlx::query("UPDATE vendors SET is_approved = TRUE WHERE vendor_id = $1")
            .bind(vendor_id)
            .execute(&self.pool)
            .await
            .map_err(ApiError::persistence("Error approving vendor."))?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl OrderRepository for PgStore {
    async fn insert(&self, order: NewOrder) -> Result<OrderId, ApiError> {
        let order_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO orders (user_id, vendor_id, service_id, order_details, total_amount, status)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING order_id",
        )
        .bind(order.user_id)
        .bind(order.vendor_id)
        .bind(order.service_id)
        .bind(&order.order_details)
        .bind(order.total_amount)
        .bind(OrderStatus::Pending)
        .fetch_one(&self.pool)
        .await
        .map_err(ApiError::persistence("Failed to create order."))?;

        Ok(order_id)
    }

    async fn find(&self, order_id: OrderId) -> Result<Option<Order>, ApiError> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT order_id, user_id, vendor_id, service_id, order_details, total_amount,
                    status, created_at, updated_at
             FROM orders WHERE order_id = $1",
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    async fn find_ownership(&self, order_id: OrderId) -> Result<Option<OrderOwnership>, ApiError> {
        let ownership = sqlx::query_as::<_, OrderOwnership>(
            "SELECT vendor_id, status FROM orders WHERE order_id = $1",
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ownership)
    }

    async fn update_status(
        &self,
        order_id: OrderId,
        vendor_id: VendorId,
        status: OrderStatus,
    ) -> Result<u64, ApiError> {
        // The vendor_id predicate re-checks ownership at write time.
        let result = sqlx::query(
            "UPDATE orders SET status = $1, updated_at = NOW()
             WHERE order_id = $2 AND vendor_id = $3 AND status <> $1",
        )
        .bind(status)
        .bind(order_id)
        .bind(vendor_id)
        .execute(&self.pool)
        .await
        .map_err(ApiError::persistence("Failed to update order status."))?;

        Ok(result.rows_affected())
    }
}
