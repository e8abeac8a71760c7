//! Builders for HTTP state ports and the adapters behind them.
//!
//! Every optional collaborator has a fallback: RSVPs live in memory without a
//! database, notifications are skipped without an email key and the gallery
//! answers 500 without media credentials.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use wedding_backend::domain::ports::{
    DisabledNotifier, GalleryCache, MediaHost, Notifier, RsvpRepository, UnconfiguredMediaHost,
};
use wedding_backend::domain::{
    AccessCodeGenerator, AdminCredential, AdminQueryService, GalleryService, MediaDeletionService,
    RandomAccessCodeGenerator, RecentDeletions, RsvpService,
};
use wedding_backend::inbound::http::state::{AdminAccess, HttpState, HttpStatePorts};
use wedding_backend::outbound::cache::InMemoryGalleryCache;
use wedding_backend::outbound::email::HttpEmailNotifier;
use wedding_backend::outbound::media_host::HttpMediaHost;
use wedding_backend::outbound::memory::InMemoryRsvpRepository;
use wedding_backend::outbound::persistence::DieselRsvpRepository;

use super::ServerConfig;
use super::config::{EmailConfig, MediaConfig};

/// Pick the RSVP store: PostgreSQL when a pool is configured, memory otherwise.
fn build_rsvp_repository(config: &ServerConfig) -> Arc<dyn RsvpRepository> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselRsvpRepository::new(pool.clone())),
        None => {
            warn!("no database configured; RSVPs are kept in memory and lost on restart");
            Arc::new(InMemoryRsvpRepository::default())
        }
    }
}

fn build_notifier(email: Option<&EmailConfig>) -> std::io::Result<Arc<dyn Notifier>> {
    let Some(email) = email else {
        info!("email API key not configured; RSVP notifications are disabled");
        return Ok(Arc::new(DisabledNotifier));
    };
    let notifier = HttpEmailNotifier::new(
        &email.base_url,
        email.api_key.clone(),
        email.from.clone(),
        email.timeout,
    )?;
    Ok(Arc::new(notifier))
}

fn build_media_host(
    media: Option<&MediaConfig>,
    clock: Arc<dyn Clock>,
) -> std::io::Result<Arc<dyn MediaHost>> {
    let Some((media, credentials)) =
        media.and_then(|media| media.credentials.clone().map(|creds| (media, creds)))
    else {
        warn!("media host credentials not configured; gallery requests will fail");
        return Ok(Arc::new(UnconfiguredMediaHost));
    };
    let host = HttpMediaHost::new(media.base_url.clone(), credentials, media.timeout, clock)
        .map_err(|err| std::io::Error::other(format!("media host client: {err}")))?;
    Ok(Arc::new(host))
}

fn build_admin_access(config: &ServerConfig, clock: Arc<dyn Clock>) -> std::io::Result<AdminAccess> {
    let credential = match config.admin_password.clone() {
        Some(password) => Some(AdminCredential::from_password(password).map_err(|err| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string())
        })?),
        None => {
            warn!("admin password not configured; admin endpoints will refuse every request");
            None
        }
    };
    Ok(AdminAccess::new(credential)
        .with_session_ttl(config.admin_session_ttl)
        .with_clock(clock))
}

/// Assemble the driving ports from already-built driven adapters.
///
/// The gallery and the deletion service share one [`RecentDeletions`] so a
/// freshly deleted photo stays hidden from listings.
pub(crate) fn build_ports(
    repository: Arc<dyn RsvpRepository>,
    notifier: Arc<dyn Notifier>,
    host: Arc<dyn MediaHost>,
    cache: Arc<dyn GalleryCache>,
    clock: Arc<dyn Clock>,
    organizer_emails: Vec<String>,
) -> HttpStatePorts {
    let generator: Arc<dyn AccessCodeGenerator> = Arc::new(RandomAccessCodeGenerator);
    let recent = Arc::new(RecentDeletions::new(clock));
    HttpStatePorts {
        rsvp: Arc::new(RsvpService::new(
            Arc::clone(&repository),
            notifier,
            generator,
            organizer_emails,
        )),
        admin: Arc::new(AdminQueryService::new(repository)),
        media_deletion: Arc::new(MediaDeletionService::new(
            Arc::clone(&host),
            Arc::clone(&recent),
        )),
        gallery: Arc::new(GalleryService::new(host, cache, recent)),
    }
}

/// Build the shared HTTP state from server configuration.
///
/// # Errors
/// Returns [`std::io::Error`] when an outbound HTTP client cannot be built or
/// the admin password is unusable.
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let ports = build_ports(
        build_rsvp_repository(config),
        build_notifier(config.email.as_ref())?,
        build_media_host(config.media.as_ref(), Arc::clone(&clock))?,
        Arc::new(InMemoryGalleryCache::default()),
        Arc::clone(&clock),
        config.organizer_emails.clone(),
    );
    let admin_access = build_admin_access(config, clock)?;
    Ok(HttpState::new(ports, admin_access).with_media_folder(config.media_folder()))
}
