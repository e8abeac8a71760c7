//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The admin session cookie carries only the time it was issued. Expiry is
//! checked server-side against the configured TTL on every request; the
//! cookie itself is encrypted and signed by the session middleware.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use chrono::{DateTime, TimeDelta, Utc};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, error};

use super::state::AdminAccess;
use crate::domain::Error;

pub(crate) const ADMIN_ISSUED_AT_KEY: &str = "admin_issued_at";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Mark the session as an administrator session issued at `now`.
    pub fn persist_admin(&self, now: DateTime<Utc>) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(ADMIN_ISSUED_AT_KEY, now.timestamp())
            .map_err(|err| {
                error!(error = %err, "failed to persist admin session");
                Error::internal("failed to persist session")
            })
    }

    /// Drop every session value and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }

    fn admin_issued_at(&self) -> Result<Option<DateTime<Utc>>, Error> {
        let raw = self
            .0
            .get::<i64>(ADMIN_ISSUED_AT_KEY)
            .map_err(|err| {
                error!(error = %err, "failed to read admin session");
                Error::internal("failed to read session")
            })?;
        Ok(raw.and_then(|seconds| DateTime::from_timestamp(seconds, 0)))
    }

    /// Whether this request carries an unexpired admin session.
    ///
    /// Expired sessions are purged so the browser drops the cookie.
    pub fn is_admin(&self, now: DateTime<Utc>, ttl: TimeDelta) -> Result<bool, Error> {
        let Some(issued_at) = self.admin_issued_at()? else {
            return Ok(false);
        };
        let age = now - issued_at;
        if age < TimeDelta::zero() || age >= ttl {
            debug!(issued_at = %issued_at, "admin session expired");
            self.clear();
            return Ok(false);
        }
        Ok(true)
    }

    /// Authorise an admin request by session or, failing that, by password.
    ///
    /// Returns `401 Unauthorized` when neither holds.
    pub fn require_admin(&self, access: &AdminAccess, password: Option<&str>) -> Result<(), Error> {
        if self.is_admin(access.clock.utc(), access.session_ttl)? {
            return Ok(());
        }
        match password {
            Some(password) if access.verify_password(password) => Ok(()),
            _ => Err(Error::unauthorized("unauthorized")),
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
