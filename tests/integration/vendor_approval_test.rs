//! Registration, approval and login against a real PostgreSQL database.
//!
//! Run with `TEST_DATABASE_URL=postgres://... cargo test -- --ignored`.

use anyhow::Result;
use marketplace_api::auth::PasswordService;
use marketplace_api::database::schema::types::UserRole;
use marketplace_api::database::{run_migrations, setup_database, IdentityRepository, PgStore};
use marketplace_api::error::ApiError;
use marketplace_api::models::{ApprovalOutcome, NewAccount, NewVendorProfile, Principal};
use marketplace_api::services::{ApprovalService, IdentityService, Registration};
use std::sync::Arc;

struct Services {
    identity: IdentityService,
    approvals: ApprovalService,
}

async fn store() -> Result<Arc<PgStore>> {
    let url = std::env::var("TEST_DATABASE_URL")?;
    let pool = setup_database(&url, 2).await?;
    run_migrations(&pool).await?;
    Ok(Arc::new(PgStore::new(pool)))
}

async fn services() -> Result<Services> {
    let store = store().await?;

    Ok(Services {
        identity: IdentityService::new(store.clone(), PasswordService::new(4)),
        approvals: ApprovalService::new(store),
    })
}

fn admin() -> Principal {
    Principal {
        user_id: 0,
        username: "integration-admin".to_string(),
        role: UserRole::Admin,
    }
}

fn vendor_registration(username: &str) -> Registration {
    Registration {
        username: username.to_string(),
        password: "vendor-pass".to_string(),
        email: format!("{}@example.com", username),
        role: "vendor".to_string(),
        company_name: Some("Spotless Cleaning".to_string()),
        description: None,
    }
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_vendor_can_log_in_only_after_approval() -> Result<()> {
    let services = services().await?;
    let username = format!("vendor-{}", uuid::Uuid::new_v4().simple());

    let outcome = services
        .identity
        .register(vendor_registration(&username))
        .await?;
    assert_eq!(outcome.role, UserRole::Vendor);

    let pending = services.identity.login(&username, "vendor-pass").await;
    assert!(matches!(pending, Err(ApiError::PendingApproval)));

    let vendor_id = services
        .approvals
        .list_pending()
        .await?
        .into_iter()
        .find(|vendor| vendor.username == username)
        .map(|vendor| vendor.vendor_id)
        .expect("new vendor should be pending");

    let approved = services
        .approvals
        .approve(&admin(), &vendor_id.to_string())
        .await?;
    assert_eq!(approved, ApprovalOutcome::Approved(vendor_id));

    let principal = services.identity.login(&username, "vendor-pass").await?;
    assert_eq!(principal.user_id, outcome.user_id);
    assert_eq!(principal.role, UserRole::Vendor);

    let still_pending = services.approvals.list_pending().await?;
    assert!(still_pending.iter().all(|v| v.vendor_id != vendor_id));

    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_duplicate_username_or_email_conflicts() -> Result<()> {
    let services = services().await?;
    let username = format!("vendor-{}", uuid::Uuid::new_v4().simple());
    services
        .identity
        .register(vendor_registration(&username))
        .await?;

    let mut same_email = vendor_registration("someone-else");
    same_email.email = format!("{}@example.com", username);
    let result = services.identity.register(same_email).await;
    assert!(matches!(result, Err(ApiError::Conflict(_))));

    let result = services
        .identity
        .register(vendor_registration(&username))
        .await;
    assert!(matches!(result, Err(ApiError::Conflict(_))));

    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_approving_unknown_vendor() -> Result<()> {
    let services = services().await?;
    let outcome = services.approvals.approve(&admin(), "2147483000").await?;
    assert_eq!(outcome, ApprovalOutcome::NoSuchVendor(2_147_483_000));

    let ignored = services.approvals.approve(&admin(), "not-a-number").await?;
    assert_eq!(ignored, ApprovalOutcome::Ignored);

    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_failed_vendor_insert_rolls_back_user() -> Result<()> {
    let store = store().await?;
    let username = format!("vendor-{}", uuid::Uuid::new_v4().simple());
    let email = format!("{}@example.com", username);

    // The user row is valid; the company name overflows VARCHAR(255).
    let account = NewAccount {
        username: username.clone(),
        email: email.clone(),
        password_hash: PasswordService::new(4).hash_password("vendor-pass")?,
        role: UserRole::Vendor,
        vendor_profile: Some(NewVendorProfile {
            company_name: "c".repeat(300),
            description: None,
        }),
    };

    let result = store.create_account(account).await;
    assert!(matches!(result, Err(ApiError::Persistence { .. })));
    assert!(!store.account_exists(&username, &email).await?);
    assert!(store.find_credentials(&username).await?.is_none());

    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_oversized_company_name_is_rejected_before_insert() -> Result<()> {
    let services = services().await?;
    let username = format!("vendor-{}", uuid::Uuid::new_v4().simple());
    let mut registration = vendor_registration(&username);
    registration.company_name = Some("c".repeat(300));

    let result = services.identity.register(registration).await;
    assert!(matches!(
        result,
        Err(ApiError::ValidationWithField { ref field, .. }) if field == "company_name"
    ));

    Ok(())
}
