//! Router configuration module

use axum::{middleware, routing::get, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::app_state::AppState;
use crate::handlers::health;
use crate::middleware::{add_security_headers, metrics_middleware, request_logger_middleware};
use crate::openapi::ApiDoc;

pub mod admin;
pub mod public;

pub use admin::admin_routes;
pub use public::{order_routes, user_routes};

/// Build the application router.
pub fn build_router(app_state: AppState) -> Router {
    let request_timeout = Duration::from_secs(app_state.config.request_timeout);

    let health = Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics));

    health
        .nest("/api/user", user_routes())
        .nest("/api/order", order_routes())
        .merge(admin_routes())
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logger_middleware))
                .layer(middleware::from_fn(add_security_headers))
                .layer(TimeoutLayer::with_status_code(
                    axum::http::StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}
