//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use crate::domain::AdminCredential;
use crate::inbound::http::state::{AdminAccess, HttpState, HttpStatePorts};

/// Cookie name used by [`test_session_middleware`].
pub const TEST_SESSION_COOKIE: &str = "session";

/// Password accepted by [`admin_state`].
pub const TEST_ADMIN_PASSWORD: &str = "correct horse battery staple";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(TEST_SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// HTTP state whose admin password is [`TEST_ADMIN_PASSWORD`].
pub fn admin_state(ports: HttpStatePorts) -> HttpState {
    let credential =
        AdminCredential::from_password(TEST_ADMIN_PASSWORD.to_owned()).expect("test password");
    HttpState::new(ports, AdminAccess::new(Some(credential)))
}

/// The session cookie set on `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == TEST_SESSION_COOKIE)
        .map(Cookie::into_owned)
}
