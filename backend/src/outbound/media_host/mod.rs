//! Media host outbound adapters.
//!
//! A thin reqwest implementation of the `MediaHost` port against a
//! Cloudinary-compatible admin and upload API.

mod dto;
mod http_media_host;

pub use http_media_host::{HttpMediaHost, MediaHostCredentials};
