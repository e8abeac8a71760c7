//! Driving port for guest gallery listings.

use async_trait::async_trait;

use crate::domain::{Error, GalleryListing};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GalleryQuery: Send + Sync {
    /// Images under `folder`, falling back to cached data when the host is
    /// unreachable.
    ///
    /// Fails only when the media host is not configured.
    async fn list(&self, folder: &str) -> Result<GalleryListing, Error>;
}

/// Fixture query serving an empty, fresh gallery.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGalleryQuery;

#[async_trait]
impl GalleryQuery for FixtureGalleryQuery {
    async fn list(&self, _folder: &str) -> Result<GalleryListing, Error> {
        Ok(GalleryListing::default())
    }
}
