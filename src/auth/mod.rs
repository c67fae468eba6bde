use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::database::schema::types::UserRole;
use crate::models::{Principal, UserId};

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::JwtService;
pub use middleware::AdminPrincipal;
pub use password::PasswordService;

/// Issuer written into and required from every session token.
pub const TOKEN_ISSUER: &str = "marketplace-api";

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// User claims for JWT tokens
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub sub: UserId,          // Subject (user ID)
    pub username: String,
    pub role: UserRole,
    pub exp: i64,             // Expiration time
    pub iat: i64,             // Issued at
    pub iss: String,
}

impl Claims {
    pub fn new(principal: &Principal, lifetime_secs: i64) -> Self {
        let now = Utc::now();
        let exp = now + chrono::Duration::seconds(lifetime_secs);

        Self {
            sub: principal.user_id,
            username: principal.username.clone(),
            role: principal.role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: TOKEN_ISSUER.to_string(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    pub fn has_role(&self, required_role: UserRole) -> bool {
        self.role == required_role
    }

    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.sub,
            username: self.username.clone(),
            role: self.role,
        }
    }
}
