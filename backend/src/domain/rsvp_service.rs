//! RSVP submission service.
//!
//! Implements [`RsvpCommand`]: validate, issue an access code, persist, then
//! notify. Persistence strictly precedes notification and notification
//! failures never undo or fail a stored RSVP.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join;
use serde_json::json;
use tracing::{info, warn};

use super::notifications::{guest_confirmation, organizer_notification};
use super::ports::{
    EmailMessage, Notifier, NotifierError, RsvpCommand, RsvpRepository, RsvpRepositoryError,
    RsvpSubmissionRequest,
};
use super::{
    AccessCodeGenerator, AccessCodeIssueError, AccessCodeIssuer, Error, NewRsvp, Rsvp,
    RsvpReceipt, RsvpSubmission, RsvpValidationError,
};

/// Insert attempts before a persistent access-code race is reported.
pub const MAX_WRITE_ATTEMPTS: u32 = 3;

const SAVE_FAILED: &str = "failed to save RSVP";

/// RSVP service wiring the repository, issuer and notifier together.
pub struct RsvpService<R: ?Sized, N: ?Sized> {
    repository: Arc<R>,
    notifier: Arc<N>,
    issuer: AccessCodeIssuer<R>,
    organizer_recipients: Vec<String>,
}

impl<R, N> RsvpService<R, N>
where
    R: RsvpRepository + ?Sized,
    N: Notifier + ?Sized,
{
    pub fn new(
        repository: Arc<R>,
        notifier: Arc<N>,
        generator: Arc<dyn AccessCodeGenerator>,
        organizer_recipients: Vec<String>,
    ) -> Self {
        let issuer = AccessCodeIssuer::new(Arc::clone(&repository), generator);
        Self {
            repository,
            notifier,
            issuer,
            organizer_recipients,
        }
    }

    fn map_validation_error(error: RsvpValidationError) -> Error {
        Error::invalid_request(error.to_string()).with_details(json!({
            "field": error.field(),
            "code": error.code(),
        }))
    }

    fn map_issue_error(error: AccessCodeIssueError) -> Error {
        match error {
            AccessCodeIssueError::CodeSpaceExhausted { attempts } => {
                Error::internal(SAVE_FAILED).with_details(json!({
                    "code": "code_space_exhausted",
                    "attempts": attempts,
                }))
            }
            AccessCodeIssueError::Repository(error) => Self::map_repository_error(error),
        }
    }

    /// Every store failure reads as the same generic 500; the cause only
    /// reaches clients in diagnostic mode.
    fn map_repository_error(error: RsvpRepositoryError) -> Error {
        Error::internal(SAVE_FAILED).with_details(json!({ "cause": error.to_string() }))
    }

    async fn persist(&self, submission: RsvpSubmission) -> Result<Rsvp, Error> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let access_code = self
                .issuer
                .issue()
                .await
                .map_err(Self::map_issue_error)?;
            let record = NewRsvp {
                submission: submission.clone(),
                access_code,
            };
            match self.repository.insert(&record).await {
                Ok(rsvp) => return Ok(rsvp),
                Err(RsvpRepositoryError::DuplicateAccessCode { code }) => {
                    warn!(attempt, %code, "access code taken between check and insert; reissuing");
                }
                Err(error) => return Err(Self::map_repository_error(error)),
            }
        }

        Err(Error::conflict(SAVE_FAILED).with_details(json!({
            "code": "access_code_conflict",
            "attempts": MAX_WRITE_ATTEMPTS,
        })))
    }

    async fn send_or_skip(&self, message: Option<EmailMessage>) -> Result<(), NotifierError> {
        match message {
            Some(message) => self.notifier.send(&message).await,
            None => Ok(()),
        }
    }

    async fn notify(&self, rsvp: &Rsvp) {
        let organizers = organizer_notification(rsvp, &self.organizer_recipients);
        let guest = guest_confirmation(rsvp);
        let (organizer_result, guest_result) =
            join(self.send_or_skip(organizers), self.notifier.send(&guest)).await;

        if let Err(error) = organizer_result {
            warn!(rsvp_id = rsvp.id, %error, "organizer notification failed");
        }
        if let Err(error) = guest_result {
            warn!(rsvp_id = rsvp.id, %error, "guest confirmation failed");
        }
    }
}

#[async_trait]
impl<R, N> RsvpCommand for RsvpService<R, N>
where
    R: RsvpRepository + ?Sized,
    N: Notifier + ?Sized,
{
    async fn submit(&self, request: RsvpSubmissionRequest) -> Result<RsvpReceipt, Error> {
        let submission = RsvpSubmission::try_from_parts(
            request.name.as_deref(),
            request.email.as_deref(),
            request.goodwill_message.as_deref(),
        )
        .map_err(Self::map_validation_error)?;

        let rsvp = self.persist(submission).await?;
        info!(rsvp_id = rsvp.id, "rsvp stored");

        self.notify(&rsvp).await;
        Ok(RsvpReceipt::from(&rsvp))
    }
}

#[cfg(test)]
#[path = "rsvp_service_tests.rs"]
mod tests;
