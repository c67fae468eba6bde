//! Application state shared across all handlers.

use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::{JwtService, PasswordService};
use crate::config::Config;
use crate::database::repository::{IdentityRepository, OrderRepository, VendorRepository};
use crate::services::{ApprovalService, FlashStore, IdentityService, OrderService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,
    /// Registration and login
    pub identity: IdentityService,
    /// Vendor approval workflow
    pub approvals: ApprovalService,
    /// Order lifecycle
    pub orders: OrderService,
    /// JWT session issuance and validation
    pub jwt_service: JwtService,
    /// One-shot notices for the admin page
    pub flash: Arc<FlashStore>,
    /// Prometheus renderer, absent when no recorder is installed
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Wire services over a single store implementing every repository.
    pub fn new<S>(config: Config, store: Arc<S>) -> Self
    where
        S: IdentityRepository + VendorRepository + OrderRepository + 'static,
    {
        let identity_repo: Arc<dyn IdentityRepository> = store.clone();
        let vendor_repo: Arc<dyn VendorRepository> = store.clone();
        let order_repo: Arc<dyn OrderRepository> = store;

        Self {
            identity: IdentityService::new(
                identity_repo,
                PasswordService::new(config.bcrypt_cost),
            ),
            approvals: ApprovalService::new(vendor_repo),
            orders: OrderService::new(order_repo, config.transition_policy),
            jwt_service: JwtService::new(&config.jwt_secret, config.jwt_expiration),
            flash: Arc::new(FlashStore::new(Duration::from_secs(config.flash_ttl_secs))),
            metrics_handle: None,
            config: Arc::new(config),
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }
}
