//! Backend entry-point: loads settings, prepares storage and serves the API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use wedding_backend::inbound::http::health::HealthState;
use wedding_backend::inbound::http::session_config::{
    BuildMode, fingerprint::key_fingerprint, session_settings_from_env,
};
use wedding_backend::inbound::http::set_diagnostic_errors;
use wedding_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use wedding_backend::settings::AppSettings;

use server::{EmailConfig, MediaConfig, ServerConfig, create_server};

/// Apply pending migrations and open a pool, off the async runtime for the
/// blocking migration step.
async fn prepare_database(database_url: &str) -> std::io::Result<DbPool> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .map_err(|err| std::io::Error::other(format!("migration task failed: {err}")))?
        .map_err(|err| std::io::Error::other(format!("database migration failed: {err}")))?;

    DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|err| std::io::Error::other(format!("database pool: {}", err.message())))
}

fn invalid_setting(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string())
}

/// Translate loaded settings into server configuration.
async fn build_server_config(settings: &AppSettings) -> std::io::Result<ServerConfig> {
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(invalid_setting)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session signing key loaded"
    );

    let bind_addr = settings.bind_addr().map_err(invalid_setting)?;
    let timeout = settings.http_timeout();
    let email = settings.email_api_key().map(|api_key| {
        settings.email_base_url().map(|base_url| EmailConfig {
            api_key,
            base_url,
            from: settings.email_from(),
            timeout,
        })
    });
    let email = email.transpose().map_err(invalid_setting)?;

    let mut config = ServerConfig::new(session, bind_addr)
        .with_admin(
            settings.admin_password(),
            settings.admin_session_ttl().map_err(invalid_setting)?,
        )
        .with_media(MediaConfig {
            credentials: settings.media_credentials(),
            base_url: settings.media_base_url().map_err(invalid_setting)?,
            folder: settings.media_folder(),
            timeout,
        })
        .with_email(email, settings.organizer_emails());

    if let Some(database_url) = settings.database_url() {
        config = config.with_db_pool(prepare_database(database_url).await?);
    }
    Ok(config)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(invalid_setting)?;
    set_diagnostic_errors(settings.diagnostic_errors);
    if settings.diagnostic_errors {
        warn!("diagnostic errors enabled; internal messages reach clients");
    }

    let config = build_server_config(&settings).await?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(settings = ?settings, "server started");
    server.await
}
