//! Admin dashboard reads backed by the RSVP repository.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::ports::{AdminQuery, RsvpRepository, RsvpRepositoryError};
use super::{Error, Rsvp, RsvpStats};

pub struct AdminQueryService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: RsvpRepository + ?Sized> AdminQueryService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_repository_error(error: RsvpRepositoryError) -> Error {
    Error::internal("failed to read RSVPs").with_details(json!({ "cause": error.to_string() }))
}

#[async_trait]
impl<R: RsvpRepository + ?Sized> AdminQuery for AdminQueryService<R> {
    async fn stats(&self) -> Result<RsvpStats, Error> {
        self.repository.stats().await.map_err(map_repository_error)
    }

    async fn attendees(&self) -> Result<Vec<Rsvp>, Error> {
        self.repository
            .list_newest_first()
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockRsvpRepository;
    use rstest::rstest;

    #[tokio::test]
    async fn stats_pass_through() {
        let mut repository = MockRsvpRepository::new();
        repository.expect_stats().times(1).return_once(|| {
            Ok(RsvpStats {
                total_rsvps: 3,
                with_goodwill_message: 1,
                latest_rsvp_at: None,
            })
        });

        let stats = AdminQueryService::new(Arc::new(repository))
            .stats()
            .await
            .expect("stats");
        assert_eq!(stats.total_rsvps, 3);
    }

    #[rstest]
    #[case(RsvpRepositoryError::connection("could not connect to 10.0.0.5:5432"))]
    #[case(RsvpRepositoryError::query("bad sql"))]
    #[tokio::test]
    async fn attendee_failures_are_generic_internal_errors(#[case] failure: RsvpRepositoryError) {
        let mut repository = MockRsvpRepository::new();
        repository
            .expect_list_newest_first()
            .times(1)
            .return_once(move || Err(failure));

        let error = AdminQueryService::new(Arc::new(repository))
            .attendees()
            .await
            .expect_err("failure surfaces");
        assert_eq!(error.code(), ErrorCode::InternalError);
        assert_eq!(error.message(), "failed to read RSVPs");
    }
}
