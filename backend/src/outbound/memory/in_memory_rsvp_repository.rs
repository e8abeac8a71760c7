//! In-memory `RsvpRepository` for local development and tests.
//!
//! Not durable: every record is lost on restart. All writes take the same
//! write lock, so the access-code uniqueness check and the insert are
//! atomic within one process.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::ports::{RsvpRepository, RsvpRepositoryError};
use crate::domain::{AccessCode, NewRsvp, Rsvp, RsvpStats};

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    records: Vec<Rsvp>,
}

pub struct InMemoryRsvpRepository {
    state: RwLock<State>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryRsvpRepository {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryRsvpRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(State::default()),
            clock,
        }
    }
}

#[async_trait]
impl RsvpRepository for InMemoryRsvpRepository {
    async fn access_code_exists(&self, code: &AccessCode) -> Result<bool, RsvpRepositoryError> {
        let state = self.state.read().await;
        Ok(state.records.iter().any(|rsvp| &rsvp.access_code == code))
    }

    async fn insert(&self, record: &NewRsvp) -> Result<Rsvp, RsvpRepositoryError> {
        let mut state = self.state.write().await;
        if state
            .records
            .iter()
            .any(|rsvp| rsvp.access_code == record.access_code)
        {
            return Err(RsvpRepositoryError::duplicate_access_code(
                record.access_code.as_str(),
            ));
        }

        state.next_id += 1;
        let rsvp = Rsvp {
            id: state.next_id,
            name: record.submission.name().to_owned(),
            email: record.submission.email().to_owned(),
            goodwill_message: record.submission.goodwill_message().map(str::to_owned),
            access_code: record.access_code.clone(),
            created_at: self.clock.utc(),
        };
        state.records.push(rsvp.clone());
        Ok(rsvp)
    }

    async fn list_newest_first(&self) -> Result<Vec<Rsvp>, RsvpRepositoryError> {
        let state = self.state.read().await;
        let mut records = state.records.clone();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    async fn stats(&self) -> Result<RsvpStats, RsvpRepositoryError> {
        let state = self.state.read().await;
        Ok(RsvpStats {
            total_rsvps: state.records.len() as u64,
            with_goodwill_message: state
                .records
                .iter()
                .filter(|rsvp| rsvp.goodwill_message.is_some())
                .count() as u64,
            latest_rsvp_at: state.records.iter().map(|rsvp| rsvp.created_at).max(),
        })
    }
}
