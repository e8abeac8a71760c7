//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations translate between Diesel rows and domain
//! types and nothing else. Row structs and the table definitions stay
//! private to this module. Connections come from a `bb8` pool driven by
//! `diesel-async`; migrations run once at startup over a synchronous
//! connection.
//!
//! # Example
//!
//! ```ignore
//! use wedding_backend::outbound::persistence::{DbPool, DieselRsvpRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/wedding")).await?;
//! let repository = DieselRsvpRepository::new(pool);
//! ```

mod diesel_rsvp_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_rsvp_repository::DieselRsvpRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
