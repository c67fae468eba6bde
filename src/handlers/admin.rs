//! Admin vendor approval: the HTML page and its JSON counterpart.

use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Form, Json,
};
use tracing::error;
use uuid::Uuid;

use super::types::{ApprovalForm, MessageResponse, NoticeQuery, PendingVendorsResponse};
use crate::auth::AdminPrincipal;
use crate::error::{ApiError, ErrorResponse, Result};
use crate::models::{ApprovalOutcome, VendorSummary};
use crate::services::NoticeKind;
use crate::utils::escape_html;
use crate::AppState;

const ADMIN_PATH: &str = "/admin";

/// Pending vendor queue with approve buttons
pub async fn admin_page(
    State(state): State<AppState>,
    AdminPrincipal(_admin): AdminPrincipal,
    Query(query): Query<NoticeQuery>,
) -> Html<String> {
    let mut notices: Vec<(NoticeKind, String)> = query
        .notice
        .as_deref()
        .and_then(|token| Uuid::parse_str(token).ok())
        .and_then(|token| state.flash.take(&token))
        .into_iter()
        .collect();

    let vendors = match state.approvals.list_pending().await {
        Ok(vendors) => vendors,
        Err(e) => {
            error!("Failed to list pending vendors: {}", e);
            notices.push((NoticeKind::Error, "Error fetching vendors.".to_string()));
            Vec::new()
        }
    };

    Html(render_admin_page(&vendors, &notices))
}

/// Approve a vendor, then redirect back to the page
pub async fn approve_from_form(
    State(state): State<AppState>,
    AdminPrincipal(admin): AdminPrincipal,
    Form(form): Form<ApprovalForm>,
) -> Redirect {
    if form.approve_vendor.is_none() {
        return Redirect::to(ADMIN_PATH);
    }

    let notice = match state.approvals.approve(&admin, &form.vendor_id).await {
        Ok(outcome) => outcome.notice().map(|text| (notice_kind(&outcome), text)),
        Err(e) => {
            error!(vendor_id = %form.vendor_id, "Failed to approve vendor: {}", e);
            Some((NoticeKind::Error, "Error approving vendor.".to_string()))
        }
    };

    match notice {
        Some((kind, text)) => {
            let token = state.flash.push(kind, text);
            Redirect::to(&format!("{}?notice={}", ADMIN_PATH, token))
        }
        None => Redirect::to(ADMIN_PATH),
    }
}

/// List vendors awaiting approval
#[utoipa::path(
    get,
    path = "/api/admin/vendors/pending",
    responses(
        (status = 200, description = "Pending vendors, oldest first", body = PendingVendorsResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn list_pending_vendors(
    State(state): State<AppState>,
    AdminPrincipal(_admin): AdminPrincipal,
) -> Result<Json<PendingVendorsResponse>> {
    let vendors = state.approvals.list_pending().await?;
    Ok(Json(PendingVendorsResponse {
        success: true,
        count: vendors.len(),
        vendors,
    }))
}

/// Approve a vendor
#[utoipa::path(
    post,
    path = "/api/admin/vendors/{vendor_id}/approve",
    params(("vendor_id" = i64, Path, description = "Vendor id")),
    responses(
        (status = 200, description = "Vendor approved", body = MessageResponse),
        (status = 400, description = "Vendor id is not a positive integer", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "No such vendor", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn approve_vendor(
    State(state): State<AppState>,
    AdminPrincipal(admin): AdminPrincipal,
    Path(vendor_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let outcome = state.approvals.approve(&admin, &vendor_id).await?;
    match outcome {
        ApprovalOutcome::Approved(_) => Ok(Json(MessageResponse::ok(
            outcome.notice().unwrap_or_default(),
        ))),
        ApprovalOutcome::NoSuchVendor(_) => Err(ApiError::NotFound(
            outcome.notice().unwrap_or_default(),
        )),
        ApprovalOutcome::Ignored => Err(ApiError::validation_field(
            "vendor_id",
            "Vendor id must be a positive integer.",
        )),
    }
}

fn notice_kind(outcome: &ApprovalOutcome) -> NoticeKind {
    match outcome {
        ApprovalOutcome::Approved(_) => NoticeKind::Success,
        ApprovalOutcome::NoSuchVendor(_) | ApprovalOutcome::Ignored => NoticeKind::Error,
    }
}

fn render_admin_page(vendors: &[VendorSummary], notices: &[(NoticeKind, String)]) -> String {
    let notice_html = notices
        .iter()
        .map(|(kind, text)| {
            let class = match kind {
                NoticeKind::Success => "notice success",
                NoticeKind::Error => "notice error",
            };
            format!(
                r#"<div class="{}" role="alert">{}</div>"#,
                class,
                escape_html(text)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let rows = if vendors.is_empty() {
        r#"<tr><td colspan="5" class="empty">No pending vendor approvals at this time.</td></tr>"#
            .to_string()
    } else {
        vendors
            .iter()
            .map(|vendor| {
                format!(
                    r#"<tr>
  <td class="company">{company}</td>
  <td>{username}</td>
  <td>{email}</td>
  <td>{registered}</td>
  <td class="action">
    <form method="post" action="{path}">
      <input type="hidden" name="vendor_id" value="{id}">
      <button type="submit" name="approve_vendor" value="1">Approve</button>
    </form>
  </td>
</tr>"#,
                    company = escape_html(&vendor.company_name),
                    username = escape_html(&vendor.username),
                    email = escape_html(&vendor.email),
                    registered = vendor.created_at.format("%Y-%m-%d %H:%M"),
                    path = ADMIN_PATH,
                    id = vendor.vendor_id,
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Admin Portal - Vendor Approval</title>
<style>
body {{ background: #f3f4f6; font-family: sans-serif; margin: 0; }}
.container {{ max-width: 1100px; margin: 0 auto; padding: 2rem; }}
h1 {{ color: #1f2937; margin-bottom: 0.25rem; }}
.notice {{ padding: 1rem; margin-bottom: 1rem; border-radius: 0.5rem; font-size: 0.9rem; }}
.notice.success {{ color: #15803d; background: #dcfce7; }}
.notice.error {{ color: #b91c1c; background: #fee2e2; }}
table {{ width: 100%; background: #fff; border-collapse: collapse; font-size: 0.9rem; }}
th {{ text-align: left; text-transform: uppercase; font-size: 0.75rem; background: #f9fafb; }}
th, td {{ padding: 0.75rem 1.5rem; border-bottom: 1px solid #e5e7eb; }}
td.company {{ font-weight: 600; }}
td.empty {{ text-align: center; color: #6b7280; }}
td.action {{ text-align: center; }}
button {{ color: #fff; background: #2563eb; border: 0; border-radius: 0.5rem; padding: 0.5rem 1rem; cursor: pointer; }}
</style>
</head>
<body>
<div class="container">
<header>
<h1>Admin Portal</h1>
<p>Pending Vendor Approvals</p>
</header>
{notice}
<table>
<thead>
<tr><th>Company Name</th><th>Username</th><th>Email</th><th>Registered On</th><th>Action</th></tr>
</thead>
<tbody>
{rows}
</tbody>
</table>
</div>
</body>
</html>
"#,
        notice = notice_html,
        rows = rows,
    )
}
