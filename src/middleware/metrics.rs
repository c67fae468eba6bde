use axum::{extract::MatchedPath, extract::Request, middleware::Next, response::Response};
use metrics::{counter, gauge, histogram};
use std::time::Instant;

/// Metrics middleware that tracks request metrics
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    // Route template rather than raw path, so ids don't explode label cardinality
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let start = Instant::now();

    gauge!("http_requests_in_flight").increment(1.0);

    let response = next.run(request).await;

    gauge!("http_requests_in_flight").decrement(1.0);

    let status = response.status().as_u16().to_string();
    histogram!(
        "http_request_duration_seconds",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .record(start.elapsed().as_secs_f64());

    counter!(
        "http_responses_total",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .increment(1);

    response
}

/// Track login attempts by result (`success`, `invalid_credentials`, `pending_approval`, ...)
pub fn track_auth_attempt(result: &'static str) {
    counter!("auth_attempts_total", "result" => result).increment(1);
}

/// Track completed registrations
pub fn track_registration(role: &str) {
    counter!("registrations_total", "role" => role.to_string()).increment(1);
}

pub fn track_order_created() {
    counter!("orders_created_total").increment(1);
}

/// Track status update outcomes (`updated`, `unchanged`, `forbidden`, ...)
pub fn track_status_update(outcome: &'static str) {
    counter!("order_status_updates_total", "outcome" => outcome).increment(1);
}

pub fn track_vendor_approval() {
    counter!("vendor_approvals_total").increment(1);
}
