//! Gallery listing with last-known-good fallback.
//!
//! A fresh listing replaces the cached snapshot for its folder. When the
//! media host fails, guests get the cached snapshot (or nothing) marked as
//! stale instead of an error page.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::ports::{GalleryCache, GalleryQuery, MediaHost, MediaHostError};
use super::{Error, GalleryListing, MediaAsset, RecentDeletions};

pub struct GalleryService<H: ?Sized, C: ?Sized> {
    host: Arc<H>,
    cache: Arc<C>,
    recent: Arc<RecentDeletions>,
}

impl<H, C> GalleryService<H, C>
where
    H: MediaHost + ?Sized,
    C: GalleryCache + ?Sized,
{
    pub fn new(host: Arc<H>, cache: Arc<C>, recent: Arc<RecentDeletions>) -> Self {
        Self {
            host,
            cache,
            recent,
        }
    }

    fn visible(&self, images: Vec<MediaAsset>) -> Vec<MediaAsset> {
        self.recent.filter(images, |image| image.public_id.as_str())
    }

    async fn fallback(&self, folder: &str) -> GalleryListing {
        let cached = match self.cache.get(folder).await {
            Ok(cached) => cached,
            Err(error) => {
                warn!(folder, %error, "gallery cache read failed");
                None
            }
        };
        debug!(folder, hit = cached.is_some(), "serving stale gallery listing");
        GalleryListing {
            images: self.visible(cached.unwrap_or_default()),
            stale: true,
        }
    }
}

#[async_trait]
impl<H, C> GalleryQuery for GalleryService<H, C>
where
    H: MediaHost + ?Sized,
    C: GalleryCache + ?Sized,
{
    async fn list(&self, folder: &str) -> Result<GalleryListing, Error> {
        match self.host.list(folder).await {
            Ok(images) => {
                if let Err(error) = self.cache.put(folder, &images).await {
                    warn!(folder, %error, "gallery cache write failed");
                }
                Ok(GalleryListing {
                    images: self.visible(images),
                    stale: false,
                })
            }
            Err(MediaHostError::NotConfigured) => {
                Err(Error::internal("media host not configured"))
            }
            Err(error) => {
                warn!(folder, %error, "media host listing failed; falling back to cache");
                Ok(self.fallback(folder).await)
            }
        }
    }
}
