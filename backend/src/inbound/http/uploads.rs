//! Static serving of uploaded images.
//!
//! ```text
//! GET /uploads/{name}
//! ```

use actix_web::{HttpResponse, get, http::header, web};
use serde_json::json;

use crate::domain::{BlobName, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Serve the stored bytes of one uploaded image.
///
/// Names that could escape the uploads directory are answered with 404, the
/// same as names that do not exist.
#[utoipa::path(
    get,
    path = "/uploads/{name}",
    params(("name" = String, Path, description = "Stored file name")),
    responses(
        (status = 200, description = "Raw image bytes", content_type = "application/octet-stream"),
        (status = 404, description = "No such file", body = ErrorSchema)
    ),
    tags = ["wardrobe"],
    operation_id = "getUpload"
)]
#[get("/uploads/{name}")]
pub async fn get_upload(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let name = BlobName::new(path.as_str()).map_err(|_| {
        Error::not_found("image not found").with_details(json!({ "name": path.as_str() }))
    })?;
    let blob = state.wardrobe_query.image(&name).await?;
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, blob.content_type))
        .insert_header((header::CACHE_CONTROL, "public, max-age=86400"))
        .body(blob.bytes))
}
