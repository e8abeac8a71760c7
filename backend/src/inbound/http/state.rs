//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use chrono::TimeDelta;
use mockable::{Clock, DefaultClock};

use crate::domain::AdminCredential;
use crate::domain::ports::{
    AdminQuery, BulkMediaDeletion, FixtureAdminQuery, FixtureBulkMediaDeletion,
    FixtureGalleryQuery, FixtureRsvpCommand, GalleryQuery, RsvpCommand,
};

/// Default admin session lifetime in minutes.
pub const DEFAULT_ADMIN_SESSION_TTL_MINUTES: i64 = 120;

/// Default media folder listed when a request names none.
pub const DEFAULT_MEDIA_FOLDER: &str = "wedding";

/// Parameter object bundling the driving ports used by handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub rsvp: Arc<dyn RsvpCommand>,
    pub admin: Arc<dyn AdminQuery>,
    pub media_deletion: Arc<dyn BulkMediaDeletion>,
    pub gallery: Arc<dyn GalleryQuery>,
}

impl Default for HttpStatePorts {
    fn default() -> Self {
        Self {
            rsvp: Arc::new(FixtureRsvpCommand),
            admin: Arc::new(FixtureAdminQuery),
            media_deletion: Arc::new(FixtureBulkMediaDeletion),
            gallery: Arc::new(FixtureGalleryQuery),
        }
    }
}

/// How administrators prove who they are.
#[derive(Clone)]
pub struct AdminAccess {
    /// `None` disables every admin endpoint.
    pub credential: Option<Arc<AdminCredential>>,
    pub session_ttl: TimeDelta,
    pub clock: Arc<dyn Clock>,
}

impl AdminAccess {
    pub fn new(credential: Option<AdminCredential>) -> Self {
        Self {
            credential: credential.map(Arc::new),
            session_ttl: TimeDelta::minutes(DEFAULT_ADMIN_SESSION_TTL_MINUTES),
            clock: Arc::new(DefaultClock),
        }
    }

    pub fn with_session_ttl(mut self, ttl: TimeDelta) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Whether `password` matches the configured credential.
    pub fn verify_password(&self, password: &str) -> bool {
        self.credential
            .as_ref()
            .is_some_and(|credential| credential.verify(password))
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub rsvp: Arc<dyn RsvpCommand>,
    pub admin: Arc<dyn AdminQuery>,
    pub media_deletion: Arc<dyn BulkMediaDeletion>,
    pub gallery: Arc<dyn GalleryQuery>,
    pub admin_access: AdminAccess,
    pub media_folder: String,
}

impl HttpState {
    /// Construct state from a ports bundle and admin access settings.
    ///
    /// # Examples
    /// ```
    /// use wedding_backend::domain::AdminCredential;
    /// use wedding_backend::inbound::http::state::{AdminAccess, HttpState, HttpStatePorts};
    ///
    /// let credential = AdminCredential::from_password("hunter2".to_owned()).expect("password");
    /// let state = HttpState::new(HttpStatePorts::default(), AdminAccess::new(Some(credential)));
    /// assert!(state.admin_access.verify_password("hunter2"));
    /// assert_eq!(state.media_folder, "wedding");
    /// ```
    pub fn new(ports: HttpStatePorts, admin_access: AdminAccess) -> Self {
        let HttpStatePorts {
            rsvp,
            admin,
            media_deletion,
            gallery,
        } = ports;
        Self {
            rsvp,
            admin,
            media_deletion,
            gallery,
            admin_access,
            media_folder: DEFAULT_MEDIA_FOLDER.to_owned(),
        }
    }

    pub fn with_media_folder(mut self, folder: impl Into<String>) -> Self {
        self.media_folder = folder.into();
        self
    }
}
