//! Account registration, credential verification and admin bootstrap.

use std::sync::Arc;
use tracing::{info, warn};
use validator::ValidateEmail;

use crate::auth::PasswordService;
use crate::config::AdminBootstrap;
use crate::database::schema::types::UserRole;
use crate::database::IdentityRepository;
use crate::error::{ApiError, Result};
use crate::middleware::metrics::{track_auth_attempt, track_registration};
use crate::models::{NewAccount, NewVendorProfile, Principal, RegistrationOutcome};

/// Raw registration input as received from a client.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub email: String,
    pub role: String,
    pub company_name: Option<String>,
    pub description: Option<String>,
}

/// A registration that passed every input rule, with text fields trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRegistration {
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub vendor_profile: Option<(String, Option<String>)>,
}

const MAX_USERNAME_CHARS: usize = 64;
const MAX_EMAIL_CHARS: usize = 255;
const MAX_COMPANY_NAME_CHARS: usize = 255;

/// Reject `value` when it has more than `max` characters.
fn check_length(field: &str, value: &str, max: usize, label: &str) -> Result<()> {
    if value.chars().count() > max {
        return Err(ApiError::validation_field(
            field,
            format!("{} must be at most {} characters.", label, max),
        ));
    }
    Ok(())
}

/// Check a registration against the input rules. No store access.
///
/// Lengths are measured on the trimmed values, which are what gets stored.
pub fn validate_registration(input: &Registration) -> Result<ValidRegistration> {
    let username = input.username.trim();
    let email = input.email.trim();

    if username.is_empty() || email.is_empty() || input.password.trim().is_empty() {
        return Err(ApiError::Validation(
            "Missing required fields: username, password, email, role.".to_string(),
        ));
    }

    check_length("username", username, MAX_USERNAME_CHARS, "Username")?;
    check_length("email", email, MAX_EMAIL_CHARS, "Email")?;

    let role = match input.role.parse::<UserRole>() {
        Ok(role) if role.is_self_registrable() => role,
        _ => {
            return Err(ApiError::validation_field(
                "role",
                "Invalid role. Must be either \"user\" or \"vendor\".",
            ))
        }
    };

    let vendor_profile = if role == UserRole::Vendor {
        let company_name = input
            .company_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                ApiError::validation_field(
                    "company_name",
                    "Vendor registration requires a non-empty \"company_name\".",
                )
            })?;
        check_length(
            "company_name",
            company_name,
            MAX_COMPANY_NAME_CHARS,
            "Company name",
        )?;
        let description = input.description.as_deref().map(|d| d.trim().to_string());
        Some((company_name.to_string(), description))
    } else {
        None
    };

    if !email.validate_email() {
        return Err(ApiError::validation_field("email", "Invalid email format."));
    }

    Ok(ValidRegistration {
        username: username.to_string(),
        email: email.to_string(),
        role,
        vendor_profile,
    })
}

#[derive(Clone)]
pub struct IdentityService {
    repository: Arc<dyn IdentityRepository>,
    passwords: PasswordService,
}

impl IdentityService {
    pub fn new(repository: Arc<dyn IdentityRepository>, passwords: PasswordService) -> Self {
        Self {
            repository,
            passwords,
        }
    }

    /// Register a user or vendor account.
    pub async fn register(&self, input: Registration) -> Result<RegistrationOutcome> {
        let valid = validate_registration(&input)?;

        if self
            .repository
            .account_exists(&valid.username, &valid.email)
            .await?
        {
            return Err(ApiError::Conflict(
                "A user with this username or email already exists.".to_string(),
            ));
        }

        let password_hash = self.passwords.hash_password(&input.password)?;

        let account = NewAccount {
            username: valid.username,
            email: valid.email,
            password_hash,
            role: valid.role,
            vendor_profile: valid
                .vendor_profile
                .map(|(company_name, description)| NewVendorProfile {
                    company_name,
                    description,
                }),
        };
        let username = account.username.clone();

        let user_id = self.repository.create_account(account).await?;

        info!(user_id, username = %username, role = %valid.role, "✅ Account registered");
        track_registration(valid.role.as_str());

        Ok(RegistrationOutcome {
            user_id,
            role: valid.role,
        })
    }

    /// Verify credentials and, for vendors, the approval gate.
    pub async fn login(&self, username: &str, password: &str) -> Result<Principal> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ApiError::Validation(
                "Username and password are required.".to_string(),
            ));
        }

        info!("🔐 Login attempt for username: {}", username);

        let record = match self.repository.find_credentials(username).await? {
            Some(record) => record,
            None => {
                track_auth_attempt("invalid_credentials");
                return Err(ApiError::InvalidCredentials);
            }
        };

        if !self
            .passwords
            .verify_password(password, &record.password_hash)?
        {
            track_auth_attempt("invalid_credentials");
            return Err(ApiError::InvalidCredentials);
        }

        if record.role == UserRole::Vendor {
            match self.repository.vendor_approval(record.user_id).await? {
                Some(true) => {}
                Some(false) => {
                    track_auth_attempt("pending_approval");
                    return Err(ApiError::PendingApproval);
                }
                None => {
                    warn!(
                        user_id = record.user_id,
                        "Vendor account has no vendor profile"
                    );
                    track_auth_attempt("integrity_error");
                    return Err(ApiError::Integrity(
                        "Vendor profile not found. Please contact support.".to_string(),
                    ));
                }
            }
        }

        track_auth_attempt("success");
        info!(user_id = record.user_id, role = %record.role, "✅ Login successful");

        Ok(Principal {
            user_id: record.user_id,
            username: record.username,
            role: record.role,
        })
    }

    /// Create the configured admin account unless its username or email is taken.
    /// Returns whether an account was created.
    pub async fn bootstrap_admin(&self, admin: &AdminBootstrap) -> Result<bool> {
        let username = admin.username.trim();
        let email = admin.email.trim();
        if username.is_empty() || email.is_empty() || admin.password.is_empty() {
            return Err(ApiError::Validation(
                "Admin bootstrap requires username, email and password.".to_string(),
            ));
        }

        if self.repository.account_exists(username, email).await? {
            info!(username = %username, "Admin account already present, skipping bootstrap");
            return Ok(false);
        }

        let account = NewAccount {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: self.passwords.hash_password(&admin.password)?,
            role: UserRole::Admin,
            vendor_profile: None,
        };
        let user_id = self.repository.create_account(account).await?;
        info!(user_id, username = %username, "👤 Bootstrapped admin account");
        Ok(true)
    }
}
