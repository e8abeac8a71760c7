//! In-process adapters used when no durable backend is configured.

mod in_memory_rsvp_repository;

pub use in_memory_rsvp_repository::InMemoryRsvpRepository;
