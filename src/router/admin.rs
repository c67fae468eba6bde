//! Admin-only routes. Every handler here takes an `AdminPrincipal`.

use axum::{
    routing::{get, post},
    Router,
};

use crate::app_state::AppState;
use crate::handlers::{admin, method_not_allowed};

/// The HTML approval page and the JSON admin API.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin",
            get(admin::admin_page).post(admin::approve_from_form),
        )
        .route("/api/admin/vendors/pending", get(admin::list_pending_vendors))
        .route(
            "/api/admin/vendors/{vendor_id}/approve",
            post(admin::approve_vendor).fallback(method_not_allowed),
        )
}
