//! Domain primitives, services and ports.
//!
//! Purpose: hold the RSVP, access-code, gallery and admin rules with no
//! knowledge of HTTP or storage. Adapters reach the domain only through the
//! traits in [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic failure.
//! - AccessCode / AccessCodeIssuer: guest codes and their bounded issuance.
//! - RsvpService: validates and persists submissions, then notifies.
//! - MediaDeletionService / GalleryService: photo management.
//! - AdminQueryService / AdminCredential: dashboard reads and password check.

pub mod access_code;
pub mod access_code_issuer;
pub mod admin;
pub mod admin_service;
pub mod error;
pub mod gallery_service;
pub mod media;
pub mod media_deletion_service;
pub mod notifications;
pub mod ports;
pub mod recent_deletions;
pub mod rsvp;
pub mod rsvp_service;
pub mod trace_id;

#[cfg(test)]
pub use self::access_code::MockAccessCodeGenerator;
pub use self::access_code::{
    ACCESS_CODE_ALPHABET, AccessCode, AccessCodeGenerator, AccessCodeValidationError,
    RandomAccessCodeGenerator,
};
pub use self::access_code_issuer::{AccessCodeIssueError, AccessCodeIssuer, MAX_ISSUE_ATTEMPTS};
pub use self::admin::{AdminCredential, AdminCredentialError, RsvpStats};
pub use self::admin_service::AdminQueryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::gallery_service::GalleryService;
pub use self::media::{
    BulkDeletionRequest, BulkDeletionRequestError, BulkDeletionSummary, DESTROY_OK,
    DeletionFailure, DeletionOutcome, GalleryListing, MediaAsset,
};
pub use self::media_deletion_service::MediaDeletionService;
pub use self::recent_deletions::{DEFAULT_SUPPRESSION_WINDOW, RecentDeletions};
pub use self::rsvp::{
    GOODWILL_MESSAGE_MAX, NewRsvp, Rsvp, RsvpReceipt, RsvpSubmission, RsvpValidationError,
};
pub use self::rsvp_service::{MAX_WRITE_ATTEMPTS, RsvpService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
