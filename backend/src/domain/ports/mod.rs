//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, `BulkMediaDeletion`) are what the
//! HTTP layer calls; driven ports (repositories, the media host, the
//! notifier, the gallery cache) are what adapters implement.

mod macros;
pub(crate) use macros::define_port_error;

mod admin_query;
mod bulk_media_deletion;
mod gallery_cache;
mod gallery_query;
mod media_host;
mod notifier;
mod rsvp_command;
mod rsvp_repository;

#[cfg(test)]
pub use admin_query::MockAdminQuery;
pub use admin_query::{AdminQuery, FixtureAdminQuery};
#[cfg(test)]
pub use bulk_media_deletion::MockBulkMediaDeletion;
pub use bulk_media_deletion::{BulkMediaDeletion, FixtureBulkMediaDeletion};
#[cfg(test)]
pub use gallery_cache::MockGalleryCache;
pub use gallery_cache::{GalleryCache, GalleryCacheError};
#[cfg(test)]
pub use gallery_query::MockGalleryQuery;
pub use gallery_query::{FixtureGalleryQuery, GalleryQuery};
#[cfg(test)]
pub use media_host::MockMediaHost;
pub use media_host::{
    DestroyResult, FixtureMediaHost, MediaHost, MediaHostError, UnconfiguredMediaHost,
};
#[cfg(test)]
pub use notifier::MockNotifier;
pub use notifier::{DisabledNotifier, EmailMessage, Notifier, NotifierError};
#[cfg(test)]
pub use rsvp_command::MockRsvpCommand;
pub use rsvp_command::{FIXTURE_ACCESS_CODE, FixtureRsvpCommand, RsvpCommand, RsvpSubmissionRequest};
#[cfg(test)]
pub use rsvp_repository::MockRsvpRepository;
pub use rsvp_repository::{FixtureRsvpRepository, RsvpRepository, RsvpRepositoryError};
