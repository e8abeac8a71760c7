//! Driving port for the admin dashboard reads.

use async_trait::async_trait;

use crate::domain::{Error, Rsvp, RsvpStats};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminQuery: Send + Sync {
    /// Aggregate RSVP counts.
    async fn stats(&self) -> Result<RsvpStats, Error>;

    /// Every RSVP record, newest first.
    async fn attendees(&self) -> Result<Vec<Rsvp>, Error>;
}

/// Fixture query reporting an empty guest list.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAdminQuery;

#[async_trait]
impl AdminQuery for FixtureAdminQuery {
    async fn stats(&self) -> Result<RsvpStats, Error> {
        Ok(RsvpStats::default())
    }

    async fn attendees(&self) -> Result<Vec<Rsvp>, Error> {
        Ok(Vec::new())
    }
}
