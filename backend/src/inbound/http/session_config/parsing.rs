//! Environment toggles for admin session settings.

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, SAMESITE_ENV, SessionConfigError};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// A boolean variable together with its debug-build fallback.
pub(super) struct BoolEnvConfig {
    name: &'static str,
    fallback: bool,
}

impl BoolEnvConfig {
    pub(super) const fn new(name: &'static str, fallback: bool) -> Self {
        Self { name, fallback }
    }

    fn fallback_label(&self) -> &'static str {
        if self.fallback { "enabled" } else { "disabled" }
    }
}

/// Read a boolean toggle, applying `check` to any value that parses.
pub(super) fn parse_bool_env<E, F>(
    env: &E,
    mode: BuildMode,
    config: BoolEnvConfig,
    check: F,
) -> Result<bool, SessionConfigError>
where
    E: Env + ?Sized,
    F: FnOnce(bool, BuildMode) -> Result<bool, SessionConfigError>,
{
    let Some(raw) = env.string(config.name) else {
        return debug_warn_or_error(
            mode,
            config.fallback,
            SessionConfigError::MissingEnv { name: config.name },
            || {
                warn!(
                    variable = config.name,
                    "session toggle not set; defaulting to {}",
                    config.fallback_label()
                );
            },
        );
    };

    if let Some(flag) = parse_bool(&raw) {
        return check(flag, mode);
    }

    debug_warn_or_error(
        mode,
        config.fallback,
        SessionConfigError::InvalidEnv {
            name: config.name,
            value: raw.clone(),
            expected: BOOL_EXPECTED,
        },
        || {
            warn!(
                variable = config.name,
                value = %raw,
                "invalid session toggle; defaulting to {}",
                config.fallback_label()
            );
        },
    )
}

/// Warn and fall back in debug builds; fail in release builds.
pub(super) fn debug_warn_or_error<T, F>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
    warn_fn: F,
) -> Result<T, SessionConfigError>
where
    F: FnOnce(),
{
    if mode.is_debug() {
        warn_fn();
        Ok(fallback)
    } else {
        Err(error)
    }
}

pub(super) fn parse_same_site_value(
    value: String,
    mode: BuildMode,
    cookie_secure: bool,
    fallback: SameSite,
) -> Result<SameSite, SessionConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => debug_warn_or_error(
            mode,
            SameSite::None,
            SessionConfigError::InsecureSameSiteNone,
            || warn!("SESSION_SAMESITE=None without a secure cookie; browsers may drop it"),
        ),
        _ => debug_warn_or_error(
            mode,
            fallback,
            SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value: value.clone(),
                expected: SAMESITE_EXPECTED,
            },
            || warn!(value = %value, "invalid SESSION_SAMESITE; using default"),
        ),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
