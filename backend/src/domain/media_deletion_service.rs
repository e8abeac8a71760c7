//! All-settled bulk deletion of guest photos.
//!
//! Every identifier is attempted concurrently and nothing is rolled back:
//! a partial failure leaves the successful deletions in place and reports
//! each failure individually.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::{info, warn};

use super::ports::{BulkMediaDeletion, DestroyResult, MediaHost, MediaHostError};
use super::{BulkDeletionRequest, BulkDeletionSummary, DeletionOutcome, Error, RecentDeletions};

pub struct MediaDeletionService<H: ?Sized> {
    host: Arc<H>,
    recent: Arc<RecentDeletions>,
}

impl<H: MediaHost + ?Sized> MediaDeletionService<H> {
    pub fn new(host: Arc<H>, recent: Arc<RecentDeletions>) -> Self {
        Self { host, recent }
    }
}

fn settle(public_id: &str, result: Result<DestroyResult, MediaHostError>) -> DeletionOutcome {
    match result {
        Ok(result) if result.is_ok() => DeletionOutcome::succeeded(public_id),
        Ok(result) => {
            warn!(public_id, result = %result.result, "media host declined delete");
            DeletionOutcome::failed(public_id, result.result)
        }
        Err(error) => {
            warn!(public_id, %error, "media delete failed");
            DeletionOutcome::failed(public_id, error.to_string())
        }
    }
}

#[async_trait]
impl<H: MediaHost + ?Sized> BulkMediaDeletion for MediaDeletionService<H> {
    async fn delete_all(&self, request: BulkDeletionRequest) -> Result<BulkDeletionSummary, Error> {
        let results = join_all(
            request
                .public_ids()
                .iter()
                .map(|public_id| self.host.destroy(public_id)),
        )
        .await;

        // A mixed batch still reports its successes; only a host that refused
        // every item as unconfigured fails the request.
        if results
            .iter()
            .all(|result| matches!(result, Err(MediaHostError::NotConfigured)))
        {
            return Err(Error::internal("media host not configured"));
        }

        let outcomes: Vec<DeletionOutcome> = request
            .public_ids()
            .iter()
            .zip(results)
            .map(|(public_id, result)| settle(public_id, result))
            .collect();

        self.recent.record(
            outcomes
                .iter()
                .filter(|outcome| outcome.is_success())
                .map(|outcome| outcome.public_id.clone()),
        );

        let summary = BulkDeletionSummary::from_outcomes(&outcomes);
        info!(
            deleted = summary.succeeded,
            failed = summary.failed,
            total = summary.total,
            "bulk media deletion finished"
        );
        Ok(summary)
    }
}
