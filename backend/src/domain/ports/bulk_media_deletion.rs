//! Driving port for the admin bulk photo deletion.

use async_trait::async_trait;

use crate::domain::{BulkDeletionRequest, BulkDeletionSummary, DeletionOutcome, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BulkMediaDeletion: Send + Sync {
    /// Attempt every identifier and report the aggregate.
    ///
    /// Individual failures are part of the summary, never an error.
    async fn delete_all(&self, request: BulkDeletionRequest) -> Result<BulkDeletionSummary, Error>;
}

/// Fixture deleter reporting every identifier as deleted.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBulkMediaDeletion;

#[async_trait]
impl BulkMediaDeletion for FixtureBulkMediaDeletion {
    async fn delete_all(&self, request: BulkDeletionRequest) -> Result<BulkDeletionSummary, Error> {
        let outcomes: Vec<DeletionOutcome> = request
            .public_ids()
            .iter()
            .map(DeletionOutcome::succeeded)
            .collect();
        Ok(BulkDeletionSummary::from_outcomes(&outcomes))
    }
}
