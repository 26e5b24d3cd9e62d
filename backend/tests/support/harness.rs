//! Shared world for HTTP integration suites.
//!
//! Wires the real services to in-memory Record Store adapters, a temporary
//! uploads directory, and a scripted chat source, then mounts the same routes
//! as the production server.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{App, test as actix_test, web};
use chrono::{TimeDelta, TimeZone, Utc};
use mockable::Clock;

use wardrobe::Trace;
use wardrobe::domain::{ChatRelayService, ProfileService, WardrobeService};
use wardrobe::inbound::http::chat::relay_chat;
use wardrobe::inbound::http::health::{HealthState, live, ready};
use wardrobe::inbound::http::profile::{get_profile, upsert_profile};
use wardrobe::inbound::http::state::{HttpState, HttpStatePorts};
use wardrobe::inbound::http::uploads::get_upload;
use wardrobe::inbound::http::validation::json_error_handler;
use wardrobe::inbound::http::wardrobe::{add_item, category_summary, delete_item, list_items};
use wardrobe::test_support::{
    InMemoryProfileRepository, InMemoryWardrobeItemRepository, ScriptedChatSource, SteppingClock,
    TempUploads,
};

pub const BOUNDARY: &str = "wardrobe-integration-boundary";

/// Adapters behind one application instance, kept for inspection.
pub struct World {
    pub profiles: Arc<InMemoryProfileRepository>,
    pub items: Arc<InMemoryWardrobeItemRepository>,
    pub uploads: TempUploads,
    pub chat: Arc<ScriptedChatSource>,
    pub clock: Arc<SteppingClock>,
    max_upload_bytes: Option<usize>,
}

impl World {
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 1, 5, 9, 0, 0)
            .single()
            .expect("start timestamp");
        Self {
            profiles: Arc::new(InMemoryProfileRepository::new()),
            items: Arc::new(InMemoryWardrobeItemRepository::new()),
            uploads: TempUploads::new().expect("temporary uploads directory"),
            chat: Arc::new(ScriptedChatSource::new()),
            clock: Arc::new(SteppingClock::new(start)),
            max_upload_bytes: None,
        }
    }

    #[must_use]
    pub fn with_max_upload_bytes(mut self, limit: usize) -> Self {
        self.max_upload_bytes = Some(limit);
        self
    }

    /// Move time forward so the next write gets a later timestamp.
    pub fn tick(&self) {
        self.clock.advance(TimeDelta::seconds(1));
    }

    fn state(&self) -> HttpState {
        let clock: Arc<dyn Clock> = self.clock.clone();
        let profiles = Arc::new(ProfileService::new(
            Arc::clone(&self.profiles),
            Arc::clone(&clock),
        ));
        let wardrobe = Arc::new(WardrobeService::new(
            Arc::clone(&self.items),
            Arc::new(self.uploads.store()),
            clock,
        ));
        let state = HttpState::new(HttpStatePorts {
            profiles: profiles.clone(),
            profiles_query: profiles,
            wardrobe: wardrobe.clone(),
            wardrobe_query: wardrobe,
            chat: Arc::new(ChatRelayService::new(Arc::clone(&self.chat))),
        });
        match self.max_upload_bytes {
            Some(limit) => state.with_max_upload_bytes(limit),
            None => state,
        }
    }

    /// The application as the server mounts it.
    pub fn app(
        &self,
    ) -> App<
        impl use<>
        + ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let health = HealthState::new();
        health.mark_ready();
        App::new()
            .app_data(web::Data::new(health))
            .app_data(web::Data::new(self.state()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .wrap(Trace)
            .service(
                web::scope("/api")
                    .service(upsert_profile)
                    .service(get_profile)
                    .service(add_item)
                    .service(category_summary)
                    .service(list_items)
                    .service(delete_item)
                    .service(relay_chat),
            )
            .service(get_upload)
            .service(ready)
            .service(live)
    }
}

/// Encode a multipart form with text `fields` and an optional image part.
pub fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; \
                 filename=\"{file_name}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn upload_request(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri("/api/wardrobe")
        .insert_header((
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body(fields, image))
        .to_request()
}
