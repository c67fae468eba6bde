use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::database::schema::types::UserRole;

pub type UserId = i64;

/// Account data ready to be persisted. Inputs are already trimmed and the
/// password already hashed.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    /// Present exactly when `role` is `Vendor`.
    pub vendor_profile: Option<NewVendorProfile>,
}

#[derive(Debug, Clone)]
pub struct NewVendorProfile {
    pub company_name: String,
    pub description: Option<String>,
}

/// Row used for credential verification.
#[derive(Debug, Clone, FromRow)]
pub struct CredentialRecord {
    pub user_id: UserId,
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// An authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Principal {
    pub user_id: UserId,
    pub username: String,
    pub role: UserRole,
}

/// What a successful registration produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    pub user_id: UserId,
    pub role: UserRole,
}

impl RegistrationOutcome {
    pub fn message(&self) -> String {
        let mut message = "Registration successful.".to_string();
        if self.role == UserRole::Vendor {
            message.push_str(" Your vendor account is now pending approval.");
        }
        message
    }
}
