//! In-memory repositories for router and service tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Mutex;

use super::repository::{IdentityRepository, OrderRepository, VendorRepository};
use crate::database::schema::types::OrderStatus;
use crate::error::ApiError;
use crate::models::{
    CredentialRecord, NewAccount, NewOrder, Order, OrderId, OrderOwnership, UserId, VendorId,
    VendorSummary,
};

#[derive(Debug, Clone)]
struct UserRow {
    record: CredentialRecord,
    email: String,
}

#[derive(Debug, Clone)]
struct VendorRow {
    vendor_id: VendorId,
    user_id: UserId,
    company_name: String,
    description: Option<String>,
    is_approved: bool,
    created_at: chrono::DateTime<Utc>,
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<UserId, UserRow>,
    vendors: BTreeMap<VendorId, VendorRow>,
    orders: BTreeMap<OrderId, Order>,
    next_user_id: i64,
    next_vendor_id: i64,
    next_order_id: i64,
}

/// Mirrors the constraints of the SQL schema that the services rely on.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store poisoned")
    }

    /// Vendor id owned by `user_id`, if any.
    pub fn vendor_id_for_user(&self, user_id: UserId) -> Option<VendorId> {
        self.lock()
            .vendors
            .values()
            .find(|v| v.user_id == user_id)
            .map(|v| v.vendor_id)
    }

    pub fn is_vendor_approved(&self, vendor_id: VendorId) -> Option<bool> {
        self.lock().vendors.get(&vendor_id).map(|v| v.is_approved)
    }

    /// Remove the vendor row of a user, leaving the user row behind.
    pub fn drop_vendor_row(&self, user_id: UserId) {
        self.lock().vendors.retain(|_, v| v.user_id != user_id);
    }

    /// Force an order into a status, bypassing the lifecycle.
    pub fn set_order_status(&self, order_id: OrderId, status: OrderStatus) {
        if let Some(order) = self.lock().orders.get_mut(&order_id) {
            order.status = status;
        }
    }

    pub fn order_count(&self) -> usize {
        self.lock().orders.len()
    }
}

#[async_trait]
impl IdentityRepository for MemoryStore {
    async fn account_exists(&self, username: &str, email: &str) -> Result<bool, ApiError> {
        Ok(self
            .lock()
            .users
            .values()
            .any(|u| u.record.username == username || u.email == email))
    }

    async fn create_account(&self, account: NewAccount) -> Result<UserId, ApiError> {
        let mut tables = self.lock();
        if tables
            .users
            .values()
            .any(|u| u.record.username == account.username || u.email == account.email)
        {
            return Err(ApiError::Conflict(
                "A user with this username or email already exists.".to_string(),
            ));
        }

        tables.next_user_id += 1;
        let user_id = tables.next_user_id;
        tables.users.insert(
            user_id,
            UserRow {
                record: CredentialRecord {
                    user_id,
                    username: account.username,
                    password_hash: account.password_hash,
                    role: account.role,
                },
                email: account.email,
            },
        );

        if let Some(profile) = account.vendor_profile {
            tables.next_vendor_id += 1;
            let vendor_id = tables.next_vendor_id;
            tables.vendors.insert(
                vendor_id,
                VendorRow {
                    vendor_id,
                    user_id,
                    company_name: profile.company_name,
                    description: profile.description,
                    is_approved: false,
                    created_at: Utc::now(),
                },
            );
        }

        Ok(user_id)
    }

    async fn find_credentials(&self, username: &str) -> Result<Option<CredentialRecord>, ApiError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.record.username == username)
            .map(|u| u.record.clone()))
    }

    async fn vendor_approval(&self, user_id: UserId) -> Result<Option<bool>, ApiError> {
        Ok(self
            .lock()
            .vendors
            .values()
            .find(|v| v.user_id == user_id)
            .map(|v| v.is_approved))
    }
}

#[async_trait]
impl VendorRepository for MemoryStore {
    async fn list_pending(&self) -> Result<Vec<VendorSummary>, ApiError> {
        let tables = self.lock();
        let mut pending: Vec<VendorSummary> = tables
            .vendors
            .values()
            .filter(|v| !v.is_approved)
            .filter_map(|v| {
                tables.users.get(&v.user_id).map(|u| VendorSummary {
                    vendor_id: v.vendor_id,
                    company_name: v.company_name.clone(),
                    description: v.description.clone(),
                    username: u.record.username.clone(),
                    email: u.email.clone(),
                    created_at: v.created_at,
                })
            })
            .collect();
        pending.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then(a.vendor_id.cmp(&b.vendor_id))
        });
        Ok(pending)
    }

    async fn approve(&self, vendor_id: VendorId) -> Result<u64, ApiError> {
        match self.lock().vendors.get_mut(&vendor_id) {
            Some(vendor) => {
                vendor.is_approved = true;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn insert(&self, order: NewOrder) -> Result<OrderId, ApiError> {
        let mut tables = self.lock();
        tables.next_order_id += 1;
        let order_id = tables.next_order_id;
        let now = Utc::now();
        tables.orders.insert(
            order_id,
            Order {
                order_id,
                user_id: order.user_id,
                vendor_id: order.vendor_id,
                service_id: order.service_id,
                order_details: order.order_details,
                total_amount: order.total_amount.round_dp(2),
                status: OrderStatus::Pending,
                created_at: now,
                updated_at: now,
            },
        );
        Ok(order_id)
    }

    async fn find(&self, order_id: OrderId) -> Result<Option<Order>, ApiError> {
        Ok(self.lock().orders.get(&order_id).cloned())
    }

    async fn find_ownership(&self, order_id: OrderId) -> Result<Option<OrderOwnership>, ApiError> {
        Ok(self.lock().orders.get(&order_id).map(|o| OrderOwnership {
            vendor_id: o.vendor_id,
            status: o.status,
        }))
    }

    async fn update_status(
        &self,
        order_id: OrderId,
        vendor_id: VendorId,
        status: OrderStatus,
    ) -> Result<u64, ApiError> {
        match self.lock().orders.get_mut(&order_id) {
            Some(order) if order.vendor_id == vendor_id && order.status != status => {
                order.status = status;
                order.updated_at = Utc::now();
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}
