//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use wardrobe::inbound::http::state::DEFAULT_MAX_UPLOAD_BYTES;
use wardrobe::outbound::blob::LocalBlobStore;
use wardrobe::outbound::chat::OpenAiChatSource;
use wardrobe::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) blobs: LocalBlobStore,
    pub(crate) chat_source: Arc<OpenAiChatSource>,
    pub(crate) max_upload_bytes: usize,
}

impl ServerConfig {
    /// Construct a server configuration from its required adapters.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        db_pool: DbPool,
        blobs: LocalBlobStore,
        chat_source: OpenAiChatSource,
    ) -> Self {
        Self {
            bind_addr,
            db_pool,
            blobs,
            chat_source: Arc::new(chat_source),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Cap the size of uploaded images.
    #[must_use]
    pub fn with_max_upload_bytes(mut self, limit: usize) -> Self {
        self.max_upload_bytes = limit;
        self
    }
}
