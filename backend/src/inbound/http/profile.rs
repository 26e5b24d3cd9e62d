//! Profile HTTP handlers.
//!
//! ```text
//! POST /api/profile
//! GET  /api/profile/{user_id}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::UpsertProfileRequest;
use crate::domain::{Error, Profile, ProfileAttributes};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_user_id;

/// Request body for a profile upsert.
///
/// Attributes the body leaves out keep their stored values.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    #[schema(example = "u1")]
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub attributes: ProfileAttributes,
}

fn parse_profile_request(payload: ProfileRequest) -> Result<UpsertProfileRequest, Error> {
    Ok(UpsertProfileRequest {
        user_id: parse_user_id(payload.user_id.as_deref())?,
        attributes: payload.attributes,
    })
}

/// Create or update the profile for `userId`.
#[utoipa::path(
    post,
    path = "/api/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Stored profile", body = Profile),
        (status = 400, description = "Missing userId", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "upsertProfile"
)]
#[post("/profile")]
pub async fn upsert_profile(
    state: web::Data<HttpState>,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<Profile>> {
    let request = parse_profile_request(payload.into_inner())?;
    let profile = state.profiles.upsert(request).await?;
    Ok(web::Json(profile))
}

/// Fetch the profile stored for `user_id`.
#[utoipa::path(
    get,
    path = "/api/profile/{user_id}",
    params(("user_id" = String, Path, description = "Owner identifier")),
    responses(
        (status = 200, description = "Stored profile", body = Profile),
        (status = 404, description = "No profile for this user", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "getProfile"
)]
#[get("/profile/{user_id}")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Profile>> {
    let user_id = parse_user_id(Some(path.as_str()))?;
    let profile = state.profiles_query.get(&user_id).await?;
    Ok(web::Json(profile))
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
