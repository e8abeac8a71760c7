//! Admin dashboard handlers.
//!
//! ```text
//! POST   /api/admin          {"password":"...","action":"stats"}
//! POST   /api/admin/session  {"password":"..."}
//! DELETE /api/admin/session
//! ```
//!
//! `POST /api/admin` accepts either a live admin session or the password in
//! the body. Authorisation is checked before the action is looked at.

use actix_web::{HttpResponse, delete, post, web};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::domain::{Error, Rsvp, RsvpStats};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, RsvpSchema, RsvpStatsSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_value_error, missing_field_error};

const ACTION_FIELD: FieldName = FieldName::new("action");
const PASSWORD_FIELD: FieldName = FieldName::new("password");

/// Request body for `POST /api/admin`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminRequest {
    /// Optional when an admin session cookie is present.
    pub password: Option<String>,
    #[schema(example = "stats")]
    pub action: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminAction {
    Stats,
    Attendees,
}

impl AdminAction {
    fn parse(raw: Option<&str>) -> Result<Self, Error> {
        match raw.map(str::trim) {
            None | Some("") => Err(missing_field_error(ACTION_FIELD)),
            Some("stats") => Ok(Self::Stats),
            Some("attendees") => Ok(Self::Attendees),
            Some(other) => Err(invalid_value_error(
                ACTION_FIELD,
                other,
                "one of \"stats\" or \"attendees\"",
            )),
        }
    }
}

/// Response body for `POST /api/admin`; exactly one of the payloads is set.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<RsvpStatsSchema>)]
    pub stats: Option<RsvpStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<RsvpSchema>>)]
    pub attendees: Option<Vec<Rsvp>>,
}

/// Request body for `POST /api/admin/session`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginRequest {
    pub password: Option<String>,
}

/// Run an admin dashboard action.
#[utoipa::path(
    post,
    path = "/api/admin",
    request_body = AdminRequest,
    responses(
        (status = 200, description = "Dashboard data", body = AdminResponse),
        (status = 400, description = "Missing or unknown action", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Failed to read RSVPs", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminAction"
)]
#[post("/admin")]
pub async fn admin_action(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AdminRequest>,
) -> ApiResult<web::Json<AdminResponse>> {
    let AdminRequest { password, action } = payload.into_inner();
    session.require_admin(&state.admin_access, password.as_deref())?;

    let response = match AdminAction::parse(action.as_deref())? {
        AdminAction::Stats => AdminResponse {
            success: true,
            stats: Some(state.admin.stats().await?),
            attendees: None,
        },
        AdminAction::Attendees => AdminResponse {
            success: true,
            stats: None,
            attendees: Some(state.admin.attendees().await?),
        },
    };
    Ok(web::Json(response))
}

/// Exchange the admin password for a session cookie.
#[utoipa::path(
    post,
    path = "/api/admin/session",
    request_body = AdminLoginRequest,
    responses(
        (status = 204, description = "Signed in", headers(("Set-Cookie" = String, description = "Admin session cookie"))),
        (status = 400, description = "Missing password", body = ErrorSchema),
        (status = 401, description = "Wrong password", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminLogin",
    security([])
)]
#[post("/admin/session")]
pub async fn admin_login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AdminLoginRequest>,
) -> ApiResult<HttpResponse> {
    let password = payload
        .into_inner()
        .password
        .filter(|password| !password.is_empty())
        .ok_or_else(|| missing_field_error(PASSWORD_FIELD))?;

    let access = &state.admin_access;
    if !access.verify_password(&password) {
        warn!("admin sign-in rejected");
        return Err(Error::unauthorized("unauthorized"));
    }
    session.persist_admin(access.clock.utc())?;
    info!("admin signed in");
    Ok(HttpResponse::NoContent().finish())
}

/// End the admin session.
#[utoipa::path(
    delete,
    path = "/api/admin/session",
    responses((status = 204, description = "Signed out")),
    tags = ["admin"],
    operation_id = "adminLogout",
    security([])
)]
#[delete("/admin/session")]
pub async fn admin_logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}
