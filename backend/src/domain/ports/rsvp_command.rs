//! Driving port for guest RSVP submissions.

use async_trait::async_trait;

use crate::domain::{AccessCode, Error, RsvpReceipt};

/// Raw submission as received from a guest; validation happens in the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RsvpSubmissionRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub goodwill_message: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RsvpCommand: Send + Sync {
    /// Validate, persist under a fresh access code and notify.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` for validation failures, before any store access.
    /// - `Conflict` when repeated inserts lose the access-code race.
    /// - `InternalError` when no unused access code could be found or the
    ///   store fails.
    async fn submit(&self, request: RsvpSubmissionRequest) -> Result<RsvpReceipt, Error>;
}

/// Fixture command that echoes the request with a fixed access code.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRsvpCommand;

pub const FIXTURE_ACCESS_CODE: &str = "WED-FIXTR-0001";

#[async_trait]
impl RsvpCommand for FixtureRsvpCommand {
    async fn submit(&self, request: RsvpSubmissionRequest) -> Result<RsvpReceipt, Error> {
        let access_code = AccessCode::new(FIXTURE_ACCESS_CODE)
            .map_err(|err| Error::internal(format!("invalid fixture access code: {err}")))?;
        Ok(RsvpReceipt {
            name: request.name.unwrap_or_default(),
            email: request.email.unwrap_or_default(),
            access_code,
        })
    }
}
