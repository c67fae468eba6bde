use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::database::schema::types::OrderStatus;
use crate::middleware::request_logger::current_request_id;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Error codes for categorizing errors
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum ErrorCode {
    // Authentication errors (1xxx)
    #[serde(rename = "AUTH_1001")]
    InvalidCredentials,
    #[serde(rename = "AUTH_1008")]
    PendingApproval,

    // Authorization errors (2xxx)
    #[serde(rename = "AUTHZ_2002")]
    ResourceAccessDenied,

    // Validation errors (3xxx)
    #[serde(rename = "VAL_3001")]
    InvalidInput,

    // Resource errors (4xxx)
    #[serde(rename = "RES_4001")]
    NotFound,
    #[serde(rename = "RES_4003")]
    Conflict,
    #[serde(rename = "RES_4005")]
    IntegrityViolation,
    #[serde(rename = "REQ_4050")]
    MethodNotAllowed,

    // Business logic errors (5xxx)
    #[serde(rename = "BIZ_5001")]
    InvalidTransition,

    // Database errors (7xxx)
    #[serde(rename = "DB_7002")]
    QueryFailed,

    // Internal errors (9xxx)
    #[serde(rename = "INT_9999")]
    InternalServerError,
}

impl ErrorCode {
    /// Get numeric code
    pub fn code(&self) -> u16 {
        match self {
            ErrorCode::InvalidCredentials => 1001,
            ErrorCode::PendingApproval => 1008,
            ErrorCode::ResourceAccessDenied => 2002,
            ErrorCode::InvalidInput => 3001,
            ErrorCode::NotFound => 4001,
            ErrorCode::Conflict => 4003,
            ErrorCode::IntegrityViolation => 4005,
            ErrorCode::MethodNotAllowed => 4050,
            ErrorCode::InvalidTransition => 5001,
            ErrorCode::QueryFailed => 7002,
            ErrorCode::InternalServerError => 9999,
        }
    }

    /// Get user-friendly message
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::InvalidCredentials => "Invalid username or password.",
            ErrorCode::PendingApproval => "Your vendor account is pending approval.",
            ErrorCode::ResourceAccessDenied => "Access to this resource is denied.",
            ErrorCode::InvalidInput => "Invalid input provided.",
            ErrorCode::NotFound => "The requested resource was not found.",
            ErrorCode::Conflict => "A conflict occurred with an existing resource.",
            ErrorCode::IntegrityViolation => "A related record is missing. Please contact support.",
            ErrorCode::MethodNotAllowed => "Invalid request method. Only POST is accepted.",
            ErrorCode::InvalidTransition => "The requested status change is not allowed.",
            ErrorCode::QueryFailed => "An unexpected error occurred.",
            ErrorCode::InternalServerError => "An internal server error occurred.",
        }
    }
}

/// Error body shared by every endpoint.
///
/// `success` and `status` are both present so that clients of the account
/// endpoints and of the order endpoints can check the field they expect.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub status: String,
    pub error: String,
    pub message: String,
    pub code: ErrorCode,
    pub code_number: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub request_id: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation failed: {field}")]
    ValidationWithField { field: String, message: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Vendor account pending approval")]
    PendingApproval,

    #[error("Integrity error: {0}")]
    Integrity(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Transition from {from} to {to} is not allowed")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{message}: {source}")]
    Persistence {
        message: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Create validation error for specific field
    pub fn validation_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::ValidationWithField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Wrap a store failure with the message shown to the client.
    pub fn persistence(message: impl Into<String>) -> impl FnOnce(sqlx::Error) -> Self {
        let message = message.into();
        move |source| ApiError::Persistence { message, source }
    }

    /// Get error code
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ApiError::Validation(_) | ApiError::ValidationWithField { .. } => {
                ErrorCode::InvalidInput
            }
            ApiError::Conflict(_) => ErrorCode::Conflict,
            ApiError::InvalidCredentials => ErrorCode::InvalidCredentials,
            ApiError::PendingApproval => ErrorCode::PendingApproval,
            ApiError::Integrity(_) => ErrorCode::IntegrityViolation,
            ApiError::NotFound(_) => ErrorCode::NotFound,
            ApiError::Forbidden(_) => ErrorCode::ResourceAccessDenied,
            ApiError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            ApiError::MethodNotAllowed => ErrorCode::MethodNotAllowed,
            ApiError::Database(_) | ApiError::Persistence { .. } => ErrorCode::QueryFailed,
            ApiError::Internal(_) => ErrorCode::InternalServerError,
        }
    }

    /// Get status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::ValidationWithField { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::PendingApproval | ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Integrity(_) | ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) | ApiError::InvalidTransition { .. } => StatusCode::CONFLICT,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Database(_) | ApiError::Persistence { .. } | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message returned to the client. Server-side detail is never included.
    pub fn client_message(&self) -> String {
        match self {
            ApiError::Validation(msg)
            | ApiError::Conflict(msg)
            | ApiError::Integrity(msg)
            | ApiError::NotFound(msg)
            | ApiError::Forbidden(msg) => msg.clone(),
            ApiError::ValidationWithField { message, .. } => message.clone(),
            ApiError::Persistence { message, .. } => message.clone(),
            ApiError::InvalidTransition { from, to } => format!(
                "Cannot change order status from '{}' to '{}'.",
                from, to
            ),
            ApiError::InvalidCredentials
            | ApiError::PendingApproval
            | ApiError::MethodNotAllowed
            | ApiError::Database(_)
            | ApiError::Internal(_) => self.error_code().message().to_string(),
        }
    }

    fn error_field(&self) -> Option<String> {
        match self {
            ApiError::ValidationWithField { field, .. } => Some(field.clone()),
            _ => None,
        }
    }

    /// Log error with appropriate level
    fn log_error(&self, request_id: &str) {
        match self.status_code() {
            status if status.is_server_error() => {
                error!(
                    request_id = %request_id,
                    error = %self,
                    "Server error occurred"
                );
            }
            status if status.is_client_error() => {
                warn!(
                    request_id = %request_id,
                    error = %self,
                    "Client error occurred"
                );
            }
            _ => {}
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let request_id = current_request_id().unwrap_or_else(|| Uuid::new_v4().to_string());
        let status = self.status_code();
        let code = self.error_code();

        self.log_error(&request_id);

        let message = self.client_message();
        let error_response = ErrorResponse {
            success: false,
            status: "error".to_string(),
            error: message.clone(),
            message,
            code,
            code_number: code.code(),
            field: self.error_field(),
            request_id,
        };

        (status, Json(error_response)).into_response()
    }
}

/// Handle Axum JSON rejections and convert to structured API errors
pub fn handle_rejection(err: JsonRejection) -> ApiError {
    match err {
        JsonRejection::JsonDataError(e) => {
            ApiError::Validation(format!("Invalid input: {}", e.body_text()))
        }
        JsonRejection::JsonSyntaxError(_) => ApiError::Validation("Invalid JSON format.".to_string()),
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::Validation("JSON content type required.".to_string())
        }
        JsonRejection::BytesRejection(_) => {
            ApiError::Validation("Invalid request body format.".to_string())
        }
        other => ApiError::Validation(format!("Invalid request: {}", other.body_text())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_taxonomy() {
        assert_eq!(ApiError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Conflict("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(ApiError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::PendingApproval.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::Integrity("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Forbidden("x".into()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_error_detail_is_not_exposed() {
        let err = ApiError::Persistence {
            message: "Failed to create order.".to_string(),
            source: sqlx::Error::PoolTimedOut,
        };
        assert_eq!(err.client_message(), "Failed to create order.");

        let err = ApiError::Internal("bcrypt exploded at line 42".to_string());
        assert!(!err.client_message().contains("bcrypt"));
    }

    #[test]
    fn test_invalid_credentials_message_is_generic() {
        assert_eq!(
            ApiError::InvalidCredentials.client_message(),
            "Invalid username or password."
        );
    }
}
