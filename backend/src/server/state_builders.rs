//! Builders wiring services to their outbound adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use wardrobe::domain::{ChatRelayService, ProfileService, WardrobeService};
use wardrobe::inbound::http::state::{HttpState, HttpStatePorts};
use wardrobe::outbound::persistence::{DieselProfileRepository, DieselWardrobeItemRepository};

use super::ServerConfig;

/// Build the handler state from the configured adapters.
///
/// Each service is constructed once and shared by every worker; the command
/// and query ports of a service point at the same instance.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let profiles = Arc::new(ProfileService::new(
        Arc::new(DieselProfileRepository::new(config.db_pool.clone())),
        Arc::clone(&clock),
    ));
    let wardrobe = Arc::new(WardrobeService::new(
        Arc::new(DieselWardrobeItemRepository::new(config.db_pool.clone())),
        Arc::new(config.blobs.clone()),
        clock,
    ));
    let chat = Arc::new(ChatRelayService::new(Arc::clone(&config.chat_source)));

    let state = HttpState::new(HttpStatePorts {
        profiles: profiles.clone(),
        profiles_query: profiles,
        wardrobe: wardrobe.clone(),
        wardrobe_query: wardrobe,
        chat,
    })
    .with_max_upload_bytes(config.max_upload_bytes);

    web::Data::new(state)
}
