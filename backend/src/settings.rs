//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `WEDDING_*` environment variables or a config
//! file. Secrets are optional here; whatever is missing switches the matching
//! feature off instead of failing startup.

use std::net::SocketAddr;
use std::time::Duration;

use chrono::TimeDelta;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;
use zeroize::Zeroizing;

use crate::inbound::http::state::{DEFAULT_ADMIN_SESSION_TTL_MINUTES, DEFAULT_MEDIA_FOLDER};
use crate::outbound::media_host::MediaHostCredentials;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MEDIA_BASE_URL: &str = "https://api.cloudinary.com/";
const DEFAULT_EMAIL_BASE_URL: &str = "https://api.resend.com/";
const DEFAULT_EMAIL_FROM: &str = "Wedding RSVP <rsvp@example.com>";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid {name}='{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl SettingsError {
    fn invalid(name: &'static str, value: impl Into<String>, reason: impl ToString) -> Self {
        Self::Invalid {
            name,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

/// Runtime configuration for the wedding backend.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WEDDING")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it RSVPs live in memory only.
    pub database_url: Option<String>,
    /// Admin dashboard password. Without it every admin request is refused.
    pub admin_password: Option<String>,
    pub media_cloud_name: Option<String>,
    pub media_api_key: Option<String>,
    pub media_api_secret: Option<String>,
    /// Media host API root.
    pub media_base_url: Option<String>,
    /// Folder listed when a gallery request names none.
    pub media_folder: Option<String>,
    /// Email API key. Without it notifications are disabled.
    pub email_api_key: Option<String>,
    pub email_base_url: Option<String>,
    pub email_from: Option<String>,
    /// Comma separated organiser addresses copied on every RSVP.
    pub organizer_emails: Option<String>,
    /// Timeout for outbound media and email calls, in seconds.
    pub http_timeout_secs: Option<u64>,
    /// Expose internal error messages to clients. Staging only.
    #[ortho_config(default = false)]
    pub diagnostic_errors: bool,
    pub admin_session_ttl_minutes: Option<i64>,
}

impl std::fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("admin_password", &self.admin_password.as_ref().map(|_| "<set>"))
            .field("media_cloud_name", &self.media_cloud_name)
            .field("media_base_url", &self.media_base_url)
            .field("media_folder", &self.media_folder)
            .field("email_base_url", &self.email_base_url)
            .field("email_from", &self.email_from)
            .field("diagnostic_errors", &self.diagnostic_errors)
            .finish_non_exhaustive()
    }
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|raw| raw.trim()).filter(|raw| !raw.is_empty())
}

/// Parse `raw` as a base URL that `Url::join` extends rather than replaces.
fn base_url(name: &'static str, raw: &str) -> Result<Url, SettingsError> {
    let normalised = if raw.ends_with('/') {
        raw.to_owned()
    } else {
        format!("{raw}/")
    };
    let url = Url::parse(&normalised).map_err(|err| SettingsError::invalid(name, raw, err))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SettingsError::invalid(
            name,
            raw,
            format!("unsupported scheme {other}"),
        )),
    }
}

impl AppSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = non_blank(self.bind_addr.as_ref()).unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|err| SettingsError::invalid("bind_addr", raw, err))
    }

    pub fn database_url(&self) -> Option<&str> {
        non_blank(self.database_url.as_ref())
    }

    pub fn admin_password(&self) -> Option<String> {
        non_blank(self.admin_password.as_ref()).map(str::to_owned)
    }

    /// Media host credentials, or `None` unless all three parts are set.
    pub fn media_credentials(&self) -> Option<MediaHostCredentials> {
        let cloud_name = non_blank(self.media_cloud_name.as_ref())?;
        let api_key = non_blank(self.media_api_key.as_ref())?;
        let api_secret = non_blank(self.media_api_secret.as_ref())?;
        Some(MediaHostCredentials {
            cloud_name: cloud_name.to_owned(),
            api_key: api_key.to_owned(),
            api_secret: Zeroizing::new(api_secret.to_owned()),
        })
    }

    pub fn media_base_url(&self) -> Result<Url, SettingsError> {
        let raw = non_blank(self.media_base_url.as_ref()).unwrap_or(DEFAULT_MEDIA_BASE_URL);
        base_url("media_base_url", raw)
    }

    pub fn media_folder(&self) -> String {
        non_blank(self.media_folder.as_ref())
            .map(|folder| folder.trim_matches('/'))
            .filter(|folder| !folder.is_empty())
            .unwrap_or(DEFAULT_MEDIA_FOLDER)
            .to_owned()
    }

    pub fn email_api_key(&self) -> Option<Zeroizing<String>> {
        non_blank(self.email_api_key.as_ref()).map(|key| Zeroizing::new(key.to_owned()))
    }

    pub fn email_base_url(&self) -> Result<Url, SettingsError> {
        let raw = non_blank(self.email_base_url.as_ref()).unwrap_or(DEFAULT_EMAIL_BASE_URL);
        base_url("email_base_url", raw)
    }

    pub fn email_from(&self) -> String {
        non_blank(self.email_from.as_ref())
            .unwrap_or(DEFAULT_EMAIL_FROM)
            .to_owned()
    }

    /// Organiser addresses, split on commas with blanks dropped.
    pub fn organizer_emails(&self) -> Vec<String> {
        self.organizer_emails
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|address| !address.is_empty())
            .map(str::to_owned)
            .collect()
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(
            self.http_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
        )
    }

    pub fn admin_session_ttl(&self) -> Result<TimeDelta, SettingsError> {
        let minutes = self
            .admin_session_ttl_minutes
            .unwrap_or(DEFAULT_ADMIN_SESSION_TTL_MINUTES);
        if minutes <= 0 {
            return Err(SettingsError::invalid(
                "admin_session_ttl_minutes",
                minutes.to_string(),
                "must be positive",
            ));
        }
        TimeDelta::try_minutes(minutes).ok_or_else(|| {
            SettingsError::invalid(
                "admin_session_ttl_minutes",
                minutes.to_string(),
                "out of range",
            )
        })
    }
}
