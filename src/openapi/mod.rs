use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Service Marketplace API",
        version = "0.1.0",
        description = "Accounts, vendor approval and order lifecycle",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // Health
        crate::handlers::health::health_check,

        // Accounts
        crate::handlers::user::register,
        crate::handlers::user::login,

        // Orders
        crate::handlers::order::create_order,
        crate::handlers::order::update_status,
        crate::handlers::order::get_order,

        // Admin
        crate::handlers::admin::list_pending_vendors,
        crate::handlers::admin::approve_vendor,
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            crate::error::ErrorCode,
            crate::database::schema::types::UserRole,
            crate::database::schema::types::OrderStatus,
            crate::models::Order,
            crate::models::VendorSummary,
            crate::handlers::types::RegisterRequest,
            crate::handlers::types::LoginRequest,
            crate::handlers::types::LoginResponse,
            crate::handlers::types::MessageResponse,
            crate::handlers::types::CreateOrderRequest,
            crate::handlers::types::CreateOrderResponse,
            crate::handlers::types::UpdateStatusRequest,
            crate::handlers::types::StatusResponse,
            crate::handlers::types::OrderResponse,
            crate::handlers::types::PendingVendorsResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "user", description = "Registration and login"),
        (name = "order", description = "Order creation and status updates"),
        (name = "admin", description = "Vendor approval"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token returned by /api/user/login"))
                    .build(),
            ),
        );
    }
}
