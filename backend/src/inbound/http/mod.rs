//! HTTP inbound adapter exposing REST endpoints.

pub mod admin;
pub mod error;
pub mod gallery;
pub mod health;
pub mod rsvp;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::{ApiResult, set_diagnostic_errors};

/// Register every `/api` endpoint on `cfg`.
///
/// Callers wrap the enclosing scope in the session middleware and provide
/// [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use wedding_backend::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .service(rsvp::submit_rsvp)
        .service(admin::admin_action)
        .service(admin::admin_login)
        .service(admin::admin_logout)
        .service(gallery::list_images)
        .service(gallery::delete_images);
}
