//! Driven port for the third-party media host holding guest photos.
//!
//! Guests upload directly to the host; the backend only lists and destroys.

use async_trait::async_trait;

use crate::domain::{DESTROY_OK, MediaAsset};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the media host.
    pub enum MediaHostError {
        /// Credentials are missing from configuration.
        NotConfigured => "media host not configured",
        /// Network transport failed before a response arrived.
        Transport { message: String } => "media host transport failed: {message}",
        /// The call exceeded the client timeout.
        Timeout { message: String } => "media host timeout: {message}",
        /// The host answered with a non-success status.
        Rejected { status: u16, message: String } =>
            "media host rejected request ({status}): {message}",
        /// The response body could not be decoded.
        Decode { message: String } => "media host response decode failed: {message}",
    }
}

/// Raw result token of a single destroy call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestroyResult {
    pub result: String,
}

impl DestroyResult {
    pub fn ok() -> Self {
        Self {
            result: DESTROY_OK.to_owned(),
        }
    }

    /// Only the exact `"ok"` token counts as success.
    pub fn is_ok(&self) -> bool {
        self.result == DESTROY_OK
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaHost: Send + Sync {
    /// Every image under `folder`, newest first.
    async fn list(&self, folder: &str) -> Result<Vec<MediaAsset>, MediaHostError>;

    /// Destroy one image and invalidate CDN caches for it.
    async fn destroy(&self, public_id: &str) -> Result<DestroyResult, MediaHostError>;
}

/// Fixture host with an empty gallery that accepts every destroy.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMediaHost;

#[async_trait]
impl MediaHost for FixtureMediaHost {
    async fn list(&self, _folder: &str) -> Result<Vec<MediaAsset>, MediaHostError> {
        Ok(Vec::new())
    }

    async fn destroy(&self, _public_id: &str) -> Result<DestroyResult, MediaHostError> {
        Ok(DestroyResult::ok())
    }
}

/// Host used when media credentials are absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredMediaHost;

#[async_trait]
impl MediaHost for UnconfiguredMediaHost {
    async fn list(&self, _folder: &str) -> Result<Vec<MediaAsset>, MediaHostError> {
        Err(MediaHostError::not_configured())
    }

    async fn destroy(&self, _public_id: &str) -> Result<DestroyResult, MediaHostError> {
        Err(MediaHostError::not_configured())
    }
}
