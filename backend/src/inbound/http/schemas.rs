//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shape so the generated document matches
//! what handlers actually serialise.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    #[schema(rename = "forbidden")]
    Forbidden,
    #[schema(rename = "not_found")]
    NotFound,
    /// The request raced with stored state; retrying may succeed.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing service is unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for the error envelope built from [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Always `false`.
    #[schema(example = false)]
    success: bool,
    /// Human-readable message. Internal errors carry a generic message.
    #[schema(example = "invalid email format")]
    error: String,
    code: ErrorCodeSchema,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context such as `{"field":"email","code":"invalid_email"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Rsvp`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Rsvp, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RsvpSchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "Ada Lovelace")]
    name: String,
    #[schema(example = "ada@example.com")]
    email: String,
    #[schema(example = "Congrats!")]
    goodwill_message: Option<String>,
    #[schema(example = "WED-7KQ2M-X9TB", pattern = "^WED-[A-Z0-9]{5}-[A-Z0-9]{4}$")]
    access_code: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::RsvpStats`].
#[derive(ToSchema)]
#[schema(as = crate::domain::RsvpStats, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RsvpStatsSchema {
    #[schema(example = 42)]
    total_rsvps: u64,
    #[schema(example = 17)]
    with_goodwill_message: u64,
    #[schema(value_type = Option<String>, format = DateTime)]
    latest_rsvp_at: Option<String>,
}

/// OpenAPI schema for [`crate::domain::MediaAsset`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MediaAsset, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MediaAssetSchema {
    #[schema(example = "wedding/first-dance")]
    id: String,
    #[schema(example = "https://res.cloudinary.com/demo/image/upload/wedding/first-dance.jpg")]
    url: String,
    width: Option<u32>,
    height: Option<u32>,
    #[schema(value_type = Option<String>, format = DateTime)]
    created_at: Option<String>,
    #[schema(example = "wedding/first-dance")]
    public_id: String,
}

/// OpenAPI schema for [`crate::domain::DeletionFailure`].
#[derive(ToSchema)]
#[schema(as = crate::domain::DeletionFailure, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DeletionFailureSchema {
    #[schema(example = "wedding/blurry")]
    public_id: String,
    /// Host result token such as `not found`, or the transport error.
    #[schema(example = "not found")]
    error: String,
}
