use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

pub type VendorId = i64;

/// A vendor awaiting approval, joined with its owning user.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct VendorSummary {
    pub vendor_id: VendorId,
    pub company_name: String,
    pub description: Option<String>,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalOutcome {
    /// The vendor is now approved (it may already have been).
    Approved(VendorId),
    /// The id was well-formed but matched no vendor.
    NoSuchVendor(VendorId),
    /// The id was not a positive integer; nothing was done.
    Ignored,
}

impl ApprovalOutcome {
    /// Notice shown to the admin after the redirect, if any.
    pub fn notice(&self) -> Option<String> {
        match self {
            ApprovalOutcome::Approved(id) => {
                Some(format!("Vendor ID #{} has been approved successfully.", id))
            }
            ApprovalOutcome::NoSuchVendor(id) => Some(format!("No vendor with ID #{} exists.", id)),
            ApprovalOutcome::Ignored => None,
        }
    }
}
