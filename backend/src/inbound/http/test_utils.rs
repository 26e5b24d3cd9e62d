//! Test helpers for inbound HTTP handlers.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::domain::ports::{
    FixtureChatRelay, MockProfileCommand, MockProfileQuery, MockWardrobeCommand,
    MockWardrobeQuery,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Mock ports for a handler test; unset expectations fail loudly if called.
#[derive(Default)]
pub(crate) struct MockPorts {
    pub(crate) profiles: MockProfileCommand,
    pub(crate) profiles_query: MockProfileQuery,
    pub(crate) wardrobe: MockWardrobeCommand,
    pub(crate) wardrobe_query: MockWardrobeQuery,
}

impl MockPorts {
    pub(crate) fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            profiles: Arc::new(self.profiles),
            profiles_query: Arc::new(self.profiles_query),
            wardrobe: Arc::new(self.wardrobe),
            wardrobe_query: Arc::new(self.wardrobe_query),
            chat: Arc::new(FixtureChatRelay),
        })
    }
}

/// App wrapped in the trace middleware with `state` registered.
pub(crate) fn app_with_state(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).wrap(Trace)
}
