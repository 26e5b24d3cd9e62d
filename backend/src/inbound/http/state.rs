//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and depend only on driving ports, so
//! they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ChatRelay, ProfileCommand, ProfileQuery, WardrobeCommand, WardrobeQuery};

/// Default cap on an uploaded image, in bytes.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Parameter object bundling the port implementations.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub profiles: Arc<dyn ProfileCommand>,
    pub profiles_query: Arc<dyn ProfileQuery>,
    pub wardrobe: Arc<dyn WardrobeCommand>,
    pub wardrobe_query: Arc<dyn WardrobeQuery>,
    pub chat: Arc<dyn ChatRelay>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub profiles: Arc<dyn ProfileCommand>,
    pub profiles_query: Arc<dyn ProfileQuery>,
    pub wardrobe: Arc<dyn WardrobeCommand>,
    pub wardrobe_query: Arc<dyn WardrobeQuery>,
    pub chat: Arc<dyn ChatRelay>,
    pub max_upload_bytes: usize,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state with the default upload limit.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            profiles,
            profiles_query,
            wardrobe,
            wardrobe_query,
            chat,
        } = ports;
        Self {
            profiles,
            profiles_query,
            wardrobe,
            wardrobe_query,
            chat,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Override the upload limit. Zero is raised to one byte.
    #[must_use]
    pub fn with_max_upload_bytes(mut self, limit: usize) -> Self {
        self.max_upload_bytes = limit.max(1);
        self
    }
}
