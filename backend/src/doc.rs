//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer (profile,
//!   wardrobe, chat, uploads, health)
//! - **Schemas**: domain payloads plus wrappers ([`ErrorSchema`],
//!   [`ErrorCodeSchema`], [`UploadItemForm`]) that describe transport shapes
//!   without coupling domain types to utoipa
//!
//! The generated document is served by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::domain::{
    CategoryCount, CategorySummary, ChatCompletion, ChatMessage, Profile, ProfileAttributes,
    WardrobeItem, WardrobeItemDetails,
};
use crate::inbound::http::chat::ChatRequest;
use crate::inbound::http::profile::ProfileRequest;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, UploadItemForm};
use crate::inbound::http::wardrobe::MessageResponse;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wardrobe backend API",
        description = "Style profiles, wardrobe item uploads, and the stylist chat relay."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::profile::upsert_profile,
        crate::inbound::http::profile::get_profile,
        crate::inbound::http::wardrobe::add_item,
        crate::inbound::http::wardrobe::list_items,
        crate::inbound::http::wardrobe::category_summary,
        crate::inbound::http::wardrobe::delete_item,
        crate::inbound::http::uploads::get_upload,
        crate::inbound::http::chat::relay_chat,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Profile,
        ProfileAttributes,
        ProfileRequest,
        WardrobeItem,
        WardrobeItemDetails,
        CategorySummary,
        CategoryCount,
        UploadItemForm,
        MessageResponse,
        ChatMessage,
        ChatCompletion,
        ChatRequest,
        ErrorSchema,
        ErrorCodeSchema,
    )),
    tags(
        (name = "profile", description = "Style profile records"),
        (name = "wardrobe", description = "Clothing items and their images"),
        (name = "chat", description = "Stylist chat relay"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
