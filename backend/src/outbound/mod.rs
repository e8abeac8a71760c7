//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed RSVP repository using Diesel ORM
//! - **memory**: in-process RSVP repository for development
//! - **media_host**: reqwest client for the photo host
//! - **email**: reqwest client for the transactional email provider
//! - **cache**: in-process last-known-good gallery cache
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod cache;
pub mod email;
pub mod media_host;
pub mod memory;
pub mod persistence;
