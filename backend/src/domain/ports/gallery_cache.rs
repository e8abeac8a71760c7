//! Port interface for caching the last successful gallery listing.
use async_trait::async_trait;

use crate::domain::MediaAsset;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by the caching adapter.
    pub enum GalleryCacheError {
        /// Cache backend is unavailable.
        Backend { message: String } => "gallery cache backend failure: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GalleryCache: Send + Sync {
    /// Last snapshot stored for `folder`.
    async fn get(&self, folder: &str) -> Result<Option<Vec<MediaAsset>>, GalleryCacheError>;

    /// Replace the snapshot for `folder`.
    async fn put(&self, folder: &str, images: &[MediaAsset]) -> Result<(), GalleryCacheError>;
}
