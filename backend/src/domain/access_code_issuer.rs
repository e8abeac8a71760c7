//! Bounded-retry issuance of unused access codes.
//!
//! The issuer checks each candidate against the store and gives up after a
//! fixed number of collisions rather than handing out a code it could not
//! confirm as free. The store's unique constraint remains the final arbiter
//! for the race between the check and the insert.

use std::sync::Arc;

use tracing::{debug, warn};

use super::ports::{RsvpRepository, RsvpRepositoryError};
use super::{AccessCode, AccessCodeGenerator};

/// Maximum candidates generated per issuance.
pub const MAX_ISSUE_ATTEMPTS: u32 = 10;

/// Failures raised by [`AccessCodeIssuer::issue`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessCodeIssueError {
    /// Every candidate collided with a stored code.
    #[error("no unused access code found after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },
    /// The uniqueness lookup itself failed.
    #[error(transparent)]
    Repository(#[from] RsvpRepositoryError),
}

/// Issues access codes that were free at the time of the check.
pub struct AccessCodeIssuer<R: ?Sized> {
    repository: Arc<R>,
    generator: Arc<dyn AccessCodeGenerator>,
    max_attempts: u32,
}

impl<R: ?Sized> Clone for AccessCodeIssuer<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
            max_attempts: self.max_attempts,
        }
    }
}

impl<R> AccessCodeIssuer<R>
where
    R: RsvpRepository + ?Sized,
{
    pub fn new(repository: Arc<R>, generator: Arc<dyn AccessCodeGenerator>) -> Self {
        Self {
            repository,
            generator,
            max_attempts: MAX_ISSUE_ATTEMPTS,
        }
    }

    /// Return the first generated candidate the store reports as unused.
    ///
    /// Reads only; the caller persists the code.
    pub async fn issue(&self) -> Result<AccessCode, AccessCodeIssueError> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.generator.generate();
            if !self.repository.access_code_exists(&candidate).await? {
                return Ok(candidate);
            }
            debug!(attempt, code = %candidate, "access code candidate already taken");
        }

        warn!(
            attempts = self.max_attempts,
            "access code space exhausted; refusing to issue a duplicate"
        );
        Err(AccessCodeIssueError::CodeSpaceExhausted {
            attempts: self.max_attempts,
        })
    }
}
