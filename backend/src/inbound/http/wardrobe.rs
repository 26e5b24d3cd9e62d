//! Wardrobe HTTP handlers.
//!
//! ```text
//! POST   /api/wardrobe                       multipart upload
//! GET    /api/wardrobe/{user_id}?category=&q=
//! GET    /api/wardrobe/{user_id}/categories
//! DELETE /api/wardrobe/{item_id}
//! ```

use actix_multipart::{Field, Multipart};
use actix_web::{delete, get, post, web};
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::AddItemRequest;
use crate::domain::{
    CategorySummary, Error, WardrobeFilter, WardrobeItem, WardrobeItemDetails, WardrobeItemId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UploadItemForm};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, IMAGE, invalid_multipart_error, parse_category, parse_image, parse_user_id,
    payload_too_large_error,
};

/// Cap on any non-file form field.
const TEXT_FIELD_LIMIT: usize = 16 * 1024;

const FORM: FieldName = FieldName::new("form");

/// Acknowledgement body for deletes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Item deleted successfully")]
    pub message: String,
}

/// Optional listing filters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Exact category, case-insensitive.
    pub category: Option<String>,
    /// Substring searched in category, subcategory, color, and brand.
    pub q: Option<String>,
}

/// Raw upload parts as they arrive; nothing is validated until the form has
/// been read completely.
#[derive(Debug, Default)]
struct UploadForm {
    user_id: Option<String>,
    category: Option<String>,
    file_name: Option<String>,
    image: Option<Vec<u8>>,
    details: WardrobeItemDetails,
}

impl UploadForm {
    fn into_request(self) -> Result<AddItemRequest, Error> {
        Ok(AddItemRequest {
            user_id: parse_user_id(self.user_id.as_deref())?,
            category: parse_category(self.category.as_deref())?,
            image: parse_image(self.file_name, self.image)?,
            details: self.details,
        })
    }
}

async fn read_bytes(field: &mut Field, name: FieldName, limit: usize) -> Result<Vec<u8>, Error> {
    let mut buffer = Vec::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|err| invalid_multipart_error(name, err))?
    {
        if buffer.len() + chunk.len() > limit {
            return Err(payload_too_large_error(name, limit));
        }
        buffer.extend_from_slice(&chunk);
    }
    Ok(buffer)
}

async fn read_text(field: &mut Field, name: FieldName) -> Result<String, Error> {
    let bytes = read_bytes(field, name, TEXT_FIELD_LIMIT).await?;
    String::from_utf8(bytes).map_err(|err| invalid_multipart_error(name, err))
}

/// The form slot for a text part, or `None` for unknown parts.
fn text_slot<'a>(
    form: &'a mut UploadForm,
    name: &str,
) -> Option<(FieldName, &'a mut Option<String>)> {
    let details = &mut form.details;
    let slot = match name {
        "userId" => (FieldName::new("userId"), &mut form.user_id),
        "category" => (FieldName::new("category"), &mut form.category),
        "subcategory" => (FieldName::new("subcategory"), &mut details.subcategory),
        "color" => (FieldName::new("color"), &mut details.color),
        "fit" => (FieldName::new("fit"), &mut details.fit),
        "brand" => (FieldName::new("brand"), &mut details.brand),
        "size" => (FieldName::new("size"), &mut details.size),
        _ => return None,
    };
    Some(slot)
}

async fn read_upload_form(
    mut payload: Multipart,
    max_image_bytes: usize,
) -> Result<UploadForm, Error> {
    let mut form = UploadForm::default();
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|err| invalid_multipart_error(FORM, err))?
    {
        let name = field.name().unwrap_or_default().to_owned();
        if name == IMAGE.as_str() {
            form.file_name = field
                .content_disposition()
                .and_then(|disposition| disposition.get_filename())
                .map(str::to_owned);
            form.image = Some(read_bytes(&mut field, IMAGE, max_image_bytes).await?);
        } else if let Some((field_name, slot)) = text_slot(&mut form, &name) {
            *slot = Some(read_text(&mut field, field_name).await?);
        } else {
            // Unknown parts are drained so the stream can advance.
            read_bytes(&mut field, FORM, TEXT_FIELD_LIMIT).await?;
        }
    }
    Ok(form)
}

/// Upload a clothing photo and record it as a wardrobe item.
///
/// The whole form is read and validated before the image is stored, so a
/// rejected upload leaves no file behind.
#[utoipa::path(
    post,
    path = "/api/wardrobe",
    request_body(content = UploadItemForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Created item", body = WardrobeItem),
        (status = 400, description = "Missing userId, category, or image", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["wardrobe"],
    operation_id = "addWardrobeItem"
)]
#[post("/wardrobe")]
pub async fn add_item(
    state: web::Data<HttpState>,
    payload: Multipart,
) -> ApiResult<web::Json<WardrobeItem>> {
    let request = read_upload_form(payload, state.max_upload_bytes)
        .await?
        .into_request()?;
    let item = state.wardrobe.add_item(request).await?;
    Ok(web::Json(item))
}

/// List a user's items, newest first.
#[utoipa::path(
    get,
    path = "/api/wardrobe/{user_id}",
    params(("user_id" = String, Path, description = "Owner identifier"), ListQuery),
    responses(
        (status = 200, description = "Matching items, newest first", body = [WardrobeItem]),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["wardrobe"],
    operation_id = "listWardrobeItems"
)]
#[get("/wardrobe/{user_id}")]
pub async fn list_items(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<Vec<WardrobeItem>>> {
    let user_id = parse_user_id(Some(path.as_str()))?;
    let ListQuery { category, q } = query.into_inner();
    let items = state
        .wardrobe_query
        .list_items(&user_id, &WardrobeFilter::new(category, q))
        .await?;
    Ok(web::Json(items))
}

/// Count a user's items per category.
#[utoipa::path(
    get,
    path = "/api/wardrobe/{user_id}/categories",
    params(("user_id" = String, Path, description = "Owner identifier")),
    responses(
        (status = 200, description = "Per-category counts", body = CategorySummary),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["wardrobe"],
    operation_id = "summariseWardrobeCategories"
)]
#[get("/wardrobe/{user_id}/categories")]
pub async fn category_summary(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CategorySummary>> {
    let user_id = parse_user_id(Some(path.as_str()))?;
    let summary = state.wardrobe_query.category_summary(&user_id).await?;
    Ok(web::Json(summary))
}

/// Delete an item and its image.
#[utoipa::path(
    delete,
    path = "/api/wardrobe/{item_id}",
    params(("item_id" = String, Path, description = "Item identifier")),
    responses(
        (status = 200, description = "Item deleted", body = MessageResponse),
        (status = 404, description = "No such item", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["wardrobe"],
    operation_id = "deleteWardrobeItem"
)]
#[delete("/wardrobe/{item_id}")]
pub async fn delete_item(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    // A non-UUID identifier cannot name a stored item.
    let id = WardrobeItemId::parse(path.as_str()).ok_or_else(|| {
        Error::not_found("wardrobe item not found").with_details(json!({ "itemId": path.as_str() }))
    })?;
    state.wardrobe.delete_item(&id).await?;
    Ok(web::Json(MessageResponse {
        message: "Item deleted successfully".to_owned(),
    }))
}

#[cfg(test)]
#[path = "wardrobe_tests.rs"]
mod tests;
