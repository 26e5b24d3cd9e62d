//! Process configuration loaded once at startup via OrthoConfig.
//!
//! Values come from `WARDROBE_*` environment variables, command-line flags,
//! or a configuration file. Only the database URL is mandatory. Numeric
//! settings carry OrthoConfig defaults; the rest fall back through their
//! accessors.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

const DEFAULT_BIND_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_UPLOADS_DIR: &str = "uploads";
const DEFAULT_CHAT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

/// Errors raised when required settings are absent or unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("WARDROBE_DATABASE_URL must be set")]
    MissingDatabaseUrl,
}

/// Application settings.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WARDROBE")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Chat provider API key; chat calls fail until it is set.
    pub openai_api_key: Option<String>,
    #[ortho_config(default = 5000)]
    pub port: u16,
    pub bind_host: Option<IpAddr>,
    /// Directory holding uploaded images, created when missing.
    pub uploads_dir: Option<PathBuf>,
    pub chat_api_base: Option<String>,
    pub chat_model: Option<String>,
    #[ortho_config(default = 60)]
    pub chat_timeout_secs: u64,
    /// Largest accepted upload body, in bytes.
    #[ortho_config(default = 10_485_760)]
    pub max_upload_bytes: usize,
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
}

impl AppSettings {
    /// The database URL, required for startup.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// The provider key, wiped from memory when dropped.
    pub fn openai_api_key(&self) -> Option<Zeroizing<String>> {
        self.openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| Zeroizing::new(key.to_owned()))
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.bind_host.unwrap_or(DEFAULT_BIND_HOST),
            self.port,
        )
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.uploads_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOADS_DIR))
    }

    pub fn chat_api_base(&self) -> &str {
        self.chat_api_base.as_deref().unwrap_or(DEFAULT_CHAT_API_BASE)
    }

    pub fn chat_model(&self) -> &str {
        self.chat_model.as_deref().unwrap_or(DEFAULT_CHAT_MODEL)
    }

    pub fn chat_timeout(&self) -> Duration {
        Duration::from_secs(self.chat_timeout_secs)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Both secrets stay out of logs.
        f.debug_struct("AppSettings")
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<redacted>"))
            .field("bind_addr", &self.bind_addr())
            .field("uploads_dir", &self.uploads_dir())
            .field("chat_api_base", &self.chat_api_base())
            .field("chat_model", &self.chat_model())
            .field("chat_timeout", &self.chat_timeout())
            .field("max_upload_bytes", &self.max_upload_bytes())
            .field("db_max_connections", &self.db_max_connections())
            .finish()
    }
}
