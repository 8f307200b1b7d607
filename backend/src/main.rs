//! Backend entry-point: loads settings, wires adapters and serves the API.

mod server;

use std::io;

use actix_web::web;
use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use cafe_guide::inbound::http::health::HealthState;
use cafe_guide::inbound::http::session_config::{BuildMode, session_settings};
use cafe_guide::settings::GuideSettings;
use server::{ServerConfig, create_server, drain_on_signal};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = GuideSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let session = session_settings(&settings, BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    )
    .with_form(settings.form_endpoint(), settings.form_id());
    if let Some(dir) = settings.storage_dir.clone() {
        let utf8_dir = Utf8PathBuf::from_path_buf(dir).map_err(|path| {
            io::Error::other(format!("storage dir {} is not UTF-8", path.display()))
        })?;
        config = config.with_storage_dir(utf8_dir);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on_signal(server.handle(), health_state));
    info!(%bind_addr, "server started");
    server.await
}
