//! Account and order routes. These are reachable without a session.

use axum::{
    routing::{get, post},
    Router,
};

use crate::app_state::AppState;
use crate::handlers::{method_not_allowed, order, user};

/// `/api/user/*`
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/register",
            post(user::register).fallback(method_not_allowed),
        )
        .route("/login", post(user::login).fallback(method_not_allowed))
}

/// `/api/order/*`
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/create",
            post(order::create_order).fallback(method_not_allowed),
        )
        .route(
            "/update_status",
            post(order::update_status).fallback(method_not_allowed),
        )
        .route("/{order_id}", get(order::get_order))
}
