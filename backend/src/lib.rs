//! Wedding site backend library.
//!
//! Hexagonal layout: [`domain`] holds the RSVP, access-code, gallery and
//! admin rules; [`inbound`] adapts HTTP onto domain ports; [`outbound`]
//! implements those ports against PostgreSQL, the media host and the email
//! API. The binary in `main.rs` wires them together from [`settings`].

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(test)]
mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
