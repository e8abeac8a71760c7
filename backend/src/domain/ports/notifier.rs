//! Port abstraction for transactional email delivery.
use async_trait::async_trait;
use tracing::debug;

use super::define_port_error;

define_port_error! {
    /// Errors raised by email delivery adapters.
    pub enum NotifierError {
        /// The provider could not be reached.
        Transport { message: String } => "email transport failed: {message}",
        /// The provider answered with a non-success status.
        Rejected { status: u16, message: String } => "email provider rejected message ({status}): {message}",
    }
}

/// A fully composed outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifierError>;
}

/// Notifier used when no email provider is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifierError> {
        debug!(subject = %message.subject, "email delivery disabled; dropping message");
        Ok(())
    }
}
