//! Short-lived record of media identifiers the admin just deleted.
//!
//! The media host's listing API is eventually consistent, so a photo can
//! reappear in a listing for a few seconds after a successful destroy.
//! Listings filter identifiers recorded here until the window lapses.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

/// Default suppression window.
pub const DEFAULT_SUPPRESSION_WINDOW: Duration = Duration::from_secs(30);

pub struct RecentDeletions {
    window: TimeDelta,
    clock: Arc<dyn Clock>,
    deleted_at: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl RecentDeletions {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_window(clock, DEFAULT_SUPPRESSION_WINDOW)
    }

    pub fn with_window(clock: Arc<dyn Clock>, window: Duration) -> Self {
        Self {
            window: TimeDelta::from_std(window).unwrap_or(TimeDelta::MAX),
            clock,
            deleted_at: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, DateTime<Utc>>> {
        // Entries are plain timestamps, so a poisoned map is still usable.
        self.deleted_at
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Record identifiers as deleted now, dropping lapsed entries.
    pub fn record<I, S>(&self, public_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let now = self.clock.utc();
        let mut map = self.lock();
        map.retain(|_, at| now - *at < self.window);
        for id in public_ids {
            map.insert(id.into(), now);
        }
    }

    /// Whether `public_id` was deleted within the window.
    pub fn is_suppressed(&self, public_id: &str) -> bool {
        let now = self.clock.utc();
        self.lock()
            .get(public_id)
            .is_some_and(|at| now - *at < self.window)
    }

    /// Drop every suppressed identifier from `items`.
    pub fn filter<T>(&self, items: Vec<T>, public_id: impl Fn(&T) -> &str) -> Vec<T> {
        let now = self.clock.utc();
        let map = self.lock();
        if map.is_empty() {
            return items;
        }
        items
            .into_iter()
            .filter(|item| {
                !map.get(public_id(item))
                    .is_some_and(|at| now - *at < self.window)
            })
            .collect()
    }
}
