//! Admin approval of vendor accounts.

use std::sync::Arc;
use tracing::{debug, info};

use crate::database::VendorRepository;
use crate::error::Result;
use crate::middleware::metrics::track_vendor_approval;
use crate::models::{ApprovalOutcome, Principal, VendorSummary};

#[derive(Clone)]
pub struct ApprovalService {
    repository: Arc<dyn VendorRepository>,
}

impl ApprovalService {
    pub fn new(repository: Arc<dyn VendorRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_pending(&self) -> Result<Vec<VendorSummary>> {
        self.repository.list_pending().await
    }

    /// Approve a vendor given the raw id submitted by the admin.
    ///
    /// Anything but a positive integer is ignored without error.
    pub async fn approve(&self, admin: &Principal, raw_vendor_id: &str) -> Result<ApprovalOutcome> {
        let vendor_id = match raw_vendor_id.trim().parse::<i64>() {
            Ok(id) if id > 0 => id,
            _ => {
                debug!(input = %raw_vendor_id, "Ignoring approval with invalid vendor id");
                return Ok(ApprovalOutcome::Ignored);
            }
        };

        let rows = self.repository.approve(vendor_id).await?;
        if rows == 0 {
            info!(vendor_id, admin = %admin.username, "Approval requested for unknown vendor");
            return Ok(ApprovalOutcome::NoSuchVendor(vendor_id));
        }

        track_vendor_approval();
        info!(vendor_id, admin = %admin.username, "✅ Vendor approved");
        Ok(ApprovalOutcome::Approved(vendor_id))
    }
}
