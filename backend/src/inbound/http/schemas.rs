//! OpenAPI schema definitions that have no runtime counterpart.
//!
//! The error payload serialises through a private DTO, and multipart forms
//! are read field by field, so their documented shapes live here.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// A required field is missing or invalid.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No matching record exists.
    #[schema(rename = "not_found")]
    NotFound,
    /// The chat provider failed; the message is the provider's.
    #[schema(rename = "upstream_error")]
    UpstreamError,
    /// A backing store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected server failure.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "missing required field: userId")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details such as the offending field.
    details: Option<serde_json::Value>,
}

/// Multipart form accepted by `POST /api/wardrobe`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UploadItemForm {
    /// The clothing photo.
    #[schema(value_type = String, format = Binary)]
    image: Vec<u8>,
    #[schema(example = "u1")]
    user_id: String,
    #[schema(example = "shirts")]
    category: String,
    subcategory: Option<String>,
    #[schema(example = "blue")]
    color: Option<String>,
    fit: Option<String>,
    brand: Option<String>,
    size: Option<String>,
}
