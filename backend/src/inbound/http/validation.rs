//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejection is an `invalid_request` error whose details name the
//! offending field and a machine-readable reason.

use actix_web::HttpRequest;
use actix_web::error::JsonPayloadError;
use serde_json::json;

use crate::domain::{Category, Error, UploadedImage, UserId};

/// Validation reason codes reported in error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    PayloadTooLarge,
    InvalidMultipart,
    InvalidJson,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::PayloadTooLarge => "payload_too_large",
            ErrorCode::InvalidMultipart => "invalid_multipart",
            ErrorCode::InvalidJson => "invalid_json",
        }
    }
}

/// Newtype wrapper for wire-level field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) const USER_ID: FieldName = FieldName::new("userId");
pub(crate) const CATEGORY: FieldName = FieldName::new("category");
pub(crate) const IMAGE: FieldName = FieldName::new("image");
const BODY: FieldName = FieldName::new("body");

fn field_error(field: FieldName, code: ErrorCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {name}"),
    )
}

pub(crate) fn payload_too_large_error(field: FieldName, limit: usize) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::PayloadTooLarge,
        format!("{name} exceeds the {limit} byte limit"),
    )
}

pub(crate) fn invalid_multipart_error(field: FieldName, reason: impl std::fmt::Display) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::InvalidMultipart,
        format!("could not read {name}: {reason}"),
    )
}

/// Report malformed JSON bodies in the same envelope as every other
/// rejection. Registered through `web::JsonConfig::error_handler`.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    field_error(BODY, ErrorCode::InvalidJson, format!("invalid JSON body: {err}")).into()
}

/// Parse a required user identifier; absent and blank are both missing.
pub(crate) fn parse_user_id(value: Option<&str>) -> Result<UserId, Error> {
    value
        .and_then(|raw| UserId::new(raw).ok())
        .ok_or_else(|| missing_field_error(USER_ID))
}

pub(crate) fn parse_category(value: Option<&str>) -> Result<Category, Error> {
    value
        .and_then(|raw| Category::new(raw).ok())
        .ok_or_else(|| missing_field_error(CATEGORY))
}

/// An image part with no bytes counts as missing.
pub(crate) fn parse_image(
    file_name: Option<String>,
    bytes: Option<Vec<u8>>,
) -> Result<UploadedImage, Error> {
    let bytes = bytes.ok_or_else(|| missing_field_error(IMAGE))?;
    UploadedImage::new(file_name.unwrap_or_default(), bytes)
        .map_err(|_| missing_field_error(IMAGE))
}
