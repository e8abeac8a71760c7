//! Guest photo metadata and bulk deletion results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result token the media host returns for a successful destroy.
pub const DESTROY_OK: &str = "ok";

/// A photo stored at the media host.
///
/// `id` is the display identifier; `public_id` is what deletion targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    pub id: String,
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub created_at: Option<DateTime<Utc>>,
    pub public_id: String,
}

/// A gallery page as served to guests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryListing {
    pub images: Vec<MediaAsset>,
    /// Set when the media host could not be reached and cached data is served.
    pub stale: bool,
}

/// Validation failures for [`BulkDeletionRequest::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BulkDeletionRequestError {
    #[error("publicIds must be a non-empty array")]
    Empty,
    #[error("publicIds must not contain blank entries")]
    BlankIdentifier { index: usize },
}

/// A non-empty batch of public identifiers to delete.
///
/// Duplicates are kept; each occurrence is attempted and counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkDeletionRequest {
    public_ids: Vec<String>,
}

impl BulkDeletionRequest {
    pub fn try_new(public_ids: Vec<String>) -> Result<Self, BulkDeletionRequestError> {
        if public_ids.is_empty() {
            return Err(BulkDeletionRequestError::Empty);
        }
        if let Some(index) = public_ids.iter().position(|id| id.trim().is_empty()) {
            return Err(BulkDeletionRequestError::BlankIdentifier { index });
        }
        Ok(Self { public_ids })
    }

    pub fn public_ids(&self) -> &[String] {
        &self.public_ids
    }

    pub fn len(&self) -> usize {
        self.public_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.public_ids.is_empty()
    }
}

/// Outcome of deleting a single identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionOutcome {
    pub public_id: String,
    pub error: Option<String>,
}

impl DeletionOutcome {
    pub fn succeeded(public_id: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
            error: None,
        }
    }

    pub fn failed(public_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-identifier failure reported in a [`BulkDeletionSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionFailure {
    pub public_id: String,
    pub error: String,
}

/// Aggregate result of a bulk deletion.
///
/// `succeeded + failed == total` and `details.len() == failed` always hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkDeletionSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub total: usize,
    pub details: Vec<DeletionFailure>,
}

impl BulkDeletionSummary {
    /// Fold outcomes into counts, keeping failures in input order.
    ///
    /// # Examples
    /// ```
    /// use wedding_backend::domain::{BulkDeletionSummary, DeletionOutcome};
    ///
    /// let summary = BulkDeletionSummary::from_outcomes(&[
    ///     DeletionOutcome::succeeded("a"),
    ///     DeletionOutcome::failed("b", "not found"),
    /// ]);
    /// assert_eq!((summary.succeeded, summary.failed, summary.total), (1, 1, 2));
    /// assert_eq!(summary.details[0].public_id, "b");
    /// ```
    pub fn from_outcomes(outcomes: &[DeletionOutcome]) -> Self {
        let details: Vec<DeletionFailure> = outcomes
            .iter()
            .filter_map(|outcome| {
                outcome.error.as_ref().map(|error| DeletionFailure {
                    public_id: outcome.public_id.clone(),
                    error: error.clone(),
                })
            })
            .collect();
        let failed = details.len();
        Self {
            succeeded: outcomes.len() - failed,
            failed,
            total: outcomes.len(),
            details,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    /// Human-readable batch summary.
    pub fn message(&self) -> String {
        if self.all_succeeded() {
            format!("Deleted {} of {} images", self.succeeded, self.total)
        } else {
            format!(
                "Deleted {} of {} images; {} failed",
                self.succeeded, self.total, self.failed
            )
        }
    }
}
