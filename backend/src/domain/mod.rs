//! Domain primitives, ports, and services.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence layers, the ports that separate them, and the services that
//! implement the use cases. Nothing here depends on actix or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - TraceId: request-scoped correlation identifier.
//! - Profile, ProfileAttributes, UserId: style profiles.
//! - WardrobeItem and friends: clothing entries, filters, and summaries.
//! - BlobAddress, BlobName, UploadedImage: image storage addressing.
//! - ChatMessage, ChatCompletion: relay payloads.
//! - ProfileService, WardrobeService, ChatRelayService: use cases.

pub mod blob;
pub mod chat;
pub mod chat_relay_service;
pub mod error;
pub mod ports;
pub mod profile;
pub mod profile_service;
mod text;
pub mod trace_id;
pub mod wardrobe;
pub mod wardrobe_service;

pub use self::blob::{
    BlobAddress, BlobAddressError, BlobName, StoredBlob, UPLOADS_PREFIX, UploadedImage,
    UploadedImageError,
};
pub use self::chat::{ChatCompletion, ChatMessage};
pub use self::chat_relay_service::ChatRelayService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::profile::{Profile, ProfileAttributes, ProfileUpsert, UserId, UserIdValidationError};
pub use self::profile_service::ProfileService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::wardrobe::{
    Category, CategoryCount, CategorySummary, CategoryValidationError, WardrobeFilter,
    WardrobeItem, WardrobeItemDetails, WardrobeItemId,
};
pub use self::wardrobe_service::WardrobeService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use wardrobe::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such item"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
