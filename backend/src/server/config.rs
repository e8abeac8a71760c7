//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use chrono::TimeDelta;
use url::Url;
use wedding_backend::inbound::http::session_config::SessionSettings;
use wedding_backend::inbound::http::state::{
    DEFAULT_ADMIN_SESSION_TTL_MINUTES, DEFAULT_MEDIA_FOLDER,
};
use wedding_backend::outbound::media_host::MediaHostCredentials;
use wedding_backend::outbound::persistence::DbPool;
use zeroize::Zeroizing;

/// Where photos live and how to reach them.
pub struct MediaConfig {
    /// `None` leaves the gallery unconfigured; requests then fail with 500.
    pub credentials: Option<MediaHostCredentials>,
    pub base_url: Url,
    pub folder: String,
    pub timeout: Duration,
}

/// Outbound email settings; absent means notifications are disabled.
pub struct EmailConfig {
    pub api_key: Zeroizing<String>,
    pub base_url: Url,
    pub from: String,
    pub timeout: Duration,
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) admin_password: Option<String>,
    pub(crate) admin_session_ttl: TimeDelta,
    pub(crate) media: Option<MediaConfig>,
    pub(crate) email: Option<EmailConfig>,
    pub(crate) organizer_emails: Vec<String>,
}

impl ServerConfig {
    /// Construct a configuration with every optional collaborator disabled.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            db_pool: None,
            admin_password: None,
            admin_session_ttl: TimeDelta::minutes(DEFAULT_ADMIN_SESSION_TTL_MINUTES),
            media: None,
            email: None,
            organizer_emails: Vec::new(),
        }
    }

    /// Attach a database pool; without one RSVPs are kept in memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_admin(mut self, password: Option<String>, session_ttl: TimeDelta) -> Self {
        self.admin_password = password;
        self.admin_session_ttl = session_ttl;
        self
    }

    #[must_use]
    pub fn with_media(mut self, media: MediaConfig) -> Self {
        self.media = Some(media);
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: Option<EmailConfig>, organizer_emails: Vec<String>) -> Self {
        self.email = email;
        self.organizer_emails = organizer_emails;
        self
    }

    /// Folder served when gallery requests name none.
    pub(crate) fn media_folder(&self) -> &str {
        self.media
            .as_ref()
            .map_or(DEFAULT_MEDIA_FOLDER, |media| media.folder.as_str())
    }
}
