//! Guest RSVP handler.
//!
//! ```text
//! POST /api/rsvp {"name":"Ada Lovelace","email":"ada@example.com","goodwillMessage":"Congrats!"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::RsvpSubmissionRequest;
use crate::domain::RsvpReceipt;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Shown to guests alongside their access code.
pub const RSVP_CONFIRMATION: &str =
    "RSVP received. Keep your access code safe; you will need it to upload photos.";

/// Request body for `POST /api/rsvp`.
///
/// Fields are optional at the wire level so missing values reach the
/// domain's validation and get its error messages.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RsvpRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "Congrats!", max_length = 250)]
    pub goodwill_message: Option<String>,
}

impl From<RsvpRequest> for RsvpSubmissionRequest {
    fn from(value: RsvpRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            goodwill_message: value.goodwill_message,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RsvpConfirmation {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "WED-7KQ2M-X9TB")]
    pub access_code: String,
    #[schema(example = "RSVP received. Keep your access code safe; you will need it to upload photos.")]
    pub message: String,
}

impl From<RsvpReceipt> for RsvpConfirmation {
    fn from(receipt: RsvpReceipt) -> Self {
        Self {
            name: receipt.name,
            email: receipt.email,
            access_code: receipt.access_code.into(),
            message: RSVP_CONFIRMATION.to_owned(),
        }
    }
}

/// Response body for `POST /api/rsvp`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RsvpResponse {
    pub success: bool,
    pub data: RsvpConfirmation,
}

/// Record a guest RSVP and return their access code.
#[utoipa::path(
    post,
    path = "/api/rsvp",
    request_body = RsvpRequest,
    responses(
        (status = 200, description = "RSVP stored", body = RsvpResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Access code race lost; retry", body = ErrorSchema),
        (status = 500, description = "Failed to save RSVP", body = ErrorSchema)
    ),
    tags = ["rsvp"],
    operation_id = "submitRsvp",
    security([])
)]
#[post("/rsvp")]
pub async fn submit_rsvp(
    state: web::Data<HttpState>,
    payload: web::Json<RsvpRequest>,
) -> ApiResult<web::Json<RsvpResponse>> {
    let receipt = state.rsvp.submit(payload.into_inner().into()).await?;
    Ok(web::Json(RsvpResponse {
        success: true,
        data: receipt.into(),
    }))
}
