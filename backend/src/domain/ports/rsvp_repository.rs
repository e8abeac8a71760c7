//! Port abstraction for RSVP persistence adapters.
use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{AccessCode, NewRsvp, Rsvp, RsvpStats};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by RSVP repository adapters.
    pub enum RsvpRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "rsvp repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "rsvp repository query failed: {message}",
        /// The store already holds a record with this access code.
        DuplicateAccessCode { code: String } => "access code already stored: {code}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RsvpRepository: Send + Sync {
    /// Whether any stored record uses `code`.
    async fn access_code_exists(&self, code: &AccessCode) -> Result<bool, RsvpRepositoryError>;

    /// Insert a record; the store assigns `id` and `created_at`.
    ///
    /// Returns [`RsvpRepositoryError::DuplicateAccessCode`] when the
    /// uniqueness constraint on the access code rejects the write.
    async fn insert(&self, record: &NewRsvp) -> Result<Rsvp, RsvpRepositoryError>;

    /// All records, newest first.
    async fn list_newest_first(&self) -> Result<Vec<Rsvp>, RsvpRepositoryError>;

    /// Aggregate counts for the admin dashboard.
    async fn stats(&self) -> Result<RsvpStats, RsvpRepositoryError>;
}

/// Fixture repository that accepts every write and stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRsvpRepository;

#[async_trait]
impl RsvpRepository for FixtureRsvpRepository {
    async fn access_code_exists(&self, _code: &AccessCode) -> Result<bool, RsvpRepositoryError> {
        Ok(false)
    }

    async fn insert(&self, record: &NewRsvp) -> Result<Rsvp, RsvpRepositoryError> {
        Ok(Rsvp {
            id: 1,
            name: record.submission.name().to_owned(),
            email: record.submission.email().to_owned(),
            goodwill_message: record.submission.goodwill_message().map(str::to_owned),
            access_code: record.access_code.clone(),
            created_at: Utc::now(),
        })
    }

    async fn list_newest_first(&self) -> Result<Vec<Rsvp>, RsvpRepositoryError> {
        Ok(Vec::new())
    }

    async fn stats(&self) -> Result<RsvpStats, RsvpRepositoryError> {
        Ok(RsvpStats::default())
    }
}
