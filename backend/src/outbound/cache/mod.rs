//! In-process gallery cache adapter.
//!
//! Holds the last successful listing per folder so the gallery can degrade
//! to stale data when the media host is unreachable. Entries never expire;
//! when the folder limit is reached the least recently written folder is
//! evicted.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::MediaAsset;
use crate::domain::ports::{GalleryCache, GalleryCacheError};

/// Default number of folders kept.
pub const DEFAULT_GALLERY_CACHE_FOLDERS: usize = 16;

#[derive(Debug, Default)]
struct Entries {
    next_write: u64,
    by_folder: HashMap<String, (u64, Vec<MediaAsset>)>,
}

#[derive(Debug)]
pub struct InMemoryGalleryCache {
    capacity: usize,
    entries: Mutex<Entries>,
}

impl Default for InMemoryGalleryCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_GALLERY_CACHE_FOLDERS)
    }
}

impl InMemoryGalleryCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(Entries::default()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Entries>, GalleryCacheError> {
        self.entries
            .lock()
            .map_err(|_| GalleryCacheError::backend("gallery cache mutex poisoned"))
    }
}

#[async_trait]
impl GalleryCache for InMemoryGalleryCache {
    async fn get(&self, folder: &str) -> Result<Option<Vec<MediaAsset>>, GalleryCacheError> {
        let entries = self.lock()?;
        Ok(entries.by_folder.get(folder).map(|(_, images)| images.clone()))
    }

    async fn put(&self, folder: &str, images: &[MediaAsset]) -> Result<(), GalleryCacheError> {
        let mut entries = self.lock()?;
        entries.next_write += 1;
        let write = entries.next_write;

        if !entries.by_folder.contains_key(folder) && entries.by_folder.len() >= self.capacity {
            let oldest = entries
                .by_folder
                .iter()
                .min_by_key(|(_, (written, _))| *written)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                entries.by_folder.remove(&oldest);
            }
        }

        entries
            .by_folder
            .insert(folder.to_owned(), (write, images.to_vec()));
        Ok(())
    }
}
