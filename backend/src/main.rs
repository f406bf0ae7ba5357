//! MY5 server entry-point: loads settings, prepares storage and runs the
//! HTTP server.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use my5::inbound::http::health::HealthState;
use my5::inbound::http::session_config::{BuildMode, session_settings_from_env};
use my5::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use my5::settings::AppSettings;
use server::{ServerConfig, create_server};

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

async fn connect_store(database_url: &str) -> std::io::Result<DbPool> {
    run_pending_migrations(database_url)
        .await
        .map_err(|err| startup_error("migrations", err))?;
    DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|err| startup_error("database pool", err))
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

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| startup_error("settings", err))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|err| startup_error("session settings", err))?;

    let bind_addr = settings
        .bind_addr()
        .map_err(|err| startup_error("settings", err))?;
    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
        settings
            .ranking_api_url()
            .map_err(|err| startup_error("settings", err))?,
        settings
            .public_base_url()
            .map_err(|err| startup_error("settings", err))?,
    )
    .with_auth_service(
        settings
            .auth_service()
            .map_err(|err| startup_error("settings", err))?,
    )
    .with_outbound_limits(settings.http_timeout(), settings.lookup_concurrency());

    if let Some(database_url) = settings.database_url.as_deref() {
        config = config.with_db_pool(connect_store(database_url).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "my5 listening");
    server.await
}
