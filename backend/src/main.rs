//! Backend entry-point: loads settings, prepares storage, and serves the API.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use wardrobe::inbound::http::health::HealthState;
use wardrobe::outbound::blob::LocalBlobStore;
use wardrobe::outbound::chat::{OpenAiChatConfig, OpenAiChatSource};
use wardrobe::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use wardrobe::settings::AppSettings;

/// Log a fatal startup failure and convert it for `main`.
fn fatal(context: &str, err: impl std::fmt::Display) -> io::Error {
    error!(error = %err, "{context}");
    io::Error::other(format!("{context}: {err}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| fatal("failed to load settings", err))?;
    let database_url = settings
        .database_url()
        .map_err(|err| fatal("invalid configuration", err))?;

    let applied = run_pending_migrations(database_url)
        .await
        .map_err(|err| fatal("database migration failed", err))?;
    info!(applied, "database migrations complete");

    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .await
    .map_err(|err| fatal("database pool unavailable", err))?;

    let uploads_dir = settings.uploads_dir();
    let blobs = LocalBlobStore::new(&uploads_dir)
        .map_err(|err| fatal("uploads directory unavailable", err))?;
    info!(path = %uploads_dir.display(), "serving uploads");

    let api_key = settings.openai_api_key();
    if api_key.is_none() {
        warn!("chat provider API key not configured; /api/chat will fail");
    }
    let chat_source = OpenAiChatSource::new(OpenAiChatConfig {
        api_base: settings.chat_api_base().to_owned(),
        model: settings.chat_model().to_owned(),
        api_key,
        timeout: settings.chat_timeout(),
    })
    .map_err(|err| fatal("chat provider client could not be built", err))?;

    let bind_addr = settings.bind_addr();
    let config = ServerConfig::new(bind_addr, pool, blobs, chat_source)
        .with_max_upload_bytes(settings.max_upload_bytes());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
