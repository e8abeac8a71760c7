//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the schema wrappers that keep
//! domain types free of utoipa, and the admin session cookie scheme. Debug
//! builds serve it through Swagger UI at `/docs`; `openapi-dump` prints it.

use crate::inbound::http::schemas::{
    DeletionFailureSchema, ErrorCodeSchema, ErrorSchema, MediaAssetSchema, RsvpSchema,
    RsvpStatsSchema,
};
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the admin session cookie scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "AdminSession",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Admin session cookie issued by POST /api/admin/session. \
                 Endpoints taking a password field also accept it instead.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Wedding site backend API",
        description = "Guest RSVPs with access codes, the photo gallery and the admin dashboard."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("AdminSession" = [])),
    paths(
        crate::inbound::http::rsvp::submit_rsvp,
        crate::inbound::http::admin::admin_action,
        crate::inbound::http::admin::admin_login,
        crate::inbound::http::admin::admin_logout,
        crate::inbound::http::gallery::list_images,
        crate::inbound::http::gallery::delete_images,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RsvpSchema,
        RsvpStatsSchema,
        MediaAssetSchema,
        DeletionFailureSchema
    )),
    tags(
        (name = "rsvp", description = "Guest RSVP submission"),
        (name = "admin", description = "Admin sign-in and dashboard data"),
        (name = "gallery", description = "Guest photo listing and removal"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
