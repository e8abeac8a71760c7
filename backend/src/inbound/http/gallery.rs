//! Gallery listing and bulk photo deletion handlers.
//!
//! ```text
//! GET    /api/images?folder=wedding
//! DELETE /api/images {"password":"...","publicIds":["wedding/a","wedding/b"]}
//! ```

use actix_web::{HttpResponse, delete, get, http::header, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{BulkDeletionRequest, BulkDeletionSummary, DeletionFailure, MediaAsset};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{DeletionFailureSchema, ErrorSchema, MediaAssetSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, bulk_deletion_error, missing_field_error, parse_folder,
};

const FOLDER_FIELD: FieldName = FieldName::new("folder");
const PUBLIC_IDS_FIELD: FieldName = FieldName::new("publicIds");

/// Query parameters for `GET /api/images`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GalleryQueryParams {
    /// Media host folder; defaults to the configured wedding folder.
    pub folder: Option<String>,
}

/// Response body for `GET /api/images`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryResponse {
    pub success: bool,
    #[schema(value_type = Vec<MediaAssetSchema>)]
    pub images: Vec<MediaAsset>,
    pub total: usize,
    /// Set when the media host was unreachable and cached data is served.
    pub stale: bool,
}

/// Request body for `DELETE /api/images`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteImagesRequest {
    /// Optional when an admin session cookie is present.
    pub password: Option<String>,
    #[schema(example = json!(["wedding/first-dance", "wedding/cake"]))]
    pub public_ids: Option<Vec<String>>,
}

/// Response body for `DELETE /api/images`.
///
/// `success` is `true` only when nothing failed; `details` lists failures
/// and is omitted otherwise.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteImagesResponse {
    pub success: bool,
    pub deleted: usize,
    pub failed: usize,
    pub total: usize,
    #[schema(example = "Deleted 2 of 3 images; 1 failed")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<DeletionFailureSchema>>)]
    pub details: Option<Vec<DeletionFailure>>,
}

impl From<BulkDeletionSummary> for DeleteImagesResponse {
    fn from(summary: BulkDeletionSummary) -> Self {
        let message = summary.message();
        let success = summary.all_succeeded();
        let BulkDeletionSummary {
            succeeded,
            failed,
            total,
            details,
        } = summary;
        Self {
            success,
            deleted: succeeded,
            failed,
            total,
            message,
            details: (!details.is_empty()).then_some(details),
        }
    }
}

/// List gallery images, newest first.
#[utoipa::path(
    get,
    path = "/api/images",
    params(GalleryQueryParams),
    responses(
        (status = 200, description = "Gallery images", body = GalleryResponse),
        (status = 400, description = "Invalid folder", body = ErrorSchema),
        (status = 500, description = "Media host not configured", body = ErrorSchema)
    ),
    tags = ["gallery"],
    operation_id = "listImages",
    security([])
)]
#[get("/images")]
pub async fn list_images(
    state: web::Data<HttpState>,
    query: web::Query<GalleryQueryParams>,
) -> ApiResult<HttpResponse> {
    let folder = parse_folder(query.folder.as_deref(), &state.media_folder, FOLDER_FIELD)?;
    let listing = state.gallery.list(&folder).await?;
    let body = GalleryResponse {
        success: true,
        total: listing.images.len(),
        images: listing.images,
        stale: listing.stale,
    };
    Ok(HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(body))
}

/// Delete a batch of gallery images.
///
/// Every identifier is attempted. A batch with failures still returns 200;
/// the counts and `details` say what happened to each item.
#[utoipa::path(
    delete,
    path = "/api/images",
    request_body = DeleteImagesRequest,
    responses(
        (status = 200, description = "Batch attempted", body = DeleteImagesResponse),
        (status = 400, description = "Missing or empty publicIds", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Media host not configured", body = ErrorSchema)
    ),
    tags = ["gallery"],
    operation_id = "deleteImages"
)]
#[delete("/images")]
pub async fn delete_images(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<DeleteImagesRequest>,
) -> ApiResult<web::Json<DeleteImagesResponse>> {
    let DeleteImagesRequest {
        password,
        public_ids,
    } = payload.into_inner();
    session.require_admin(&state.admin_access, password.as_deref())?;

    let public_ids = public_ids.ok_or_else(|| missing_field_error(PUBLIC_IDS_FIELD))?;
    let request = BulkDeletionRequest::try_new(public_ids)
        .map_err(|err| bulk_deletion_error(PUBLIC_IDS_FIELD, err))?;
    let summary = state.media_deletion.delete_all(request).await?;
    Ok(web::Json(summary.into()))
}
