//! Account registration and login handlers.

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};

use super::extractors::ValidatedJson;
use super::response::Created;
use super::types::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use crate::auth::SESSION_COOKIE;
use crate::error::{ApiError, ErrorResponse, Result};
use crate::AppState;

/// Register a user or vendor account
#[utoipa::path(
    post,
    path = "/api/user/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Username or email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "user"
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<Created<MessageResponse>> {
    let outcome = state.identity.register(request.into()).await?;
    Ok(Created(MessageResponse::ok(outcome.message())))
}

/// Log in and receive a session token
#[utoipa::path(
    post,
    path = "/api/user/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing username or password", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Vendor account pending approval", body = ErrorResponse),
        (status = 404, description = "Vendor profile missing", body = ErrorResponse)
    ),
    tag = "user"
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse> {
    let password = request.password.ok_or_else(|| {
        ApiError::Validation("Username and password are required.".to_string())
    })?;

    let principal = state.identity.login(&request.username, &password).await?;
    let token = state.jwt_service.issue(&principal)?;

    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        state.jwt_service.expiration_secs()
    );
    if state.config.is_production() {
        cookie.push_str("; Secure");
    }
    let cookie = HeaderValue::from_str(&cookie)
        .map_err(|e| ApiError::Internal(format!("Invalid session cookie: {}", e)))?;

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, cookie)],
        Json(LoginResponse {
            success: true,
            message: "Login successful.".to_string(),
            user_id: principal.user_id,
            role: principal.role,
            access_token: token,
            token_type: "Bearer".to_string(),
            expires_in: state.jwt_service.expiration_secs(),
        }),
    ))
}
