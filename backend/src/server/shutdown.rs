//! Graceful shutdown: fail liveness first, then drain the listener.

use actix_web::dev::ServerHandle;
use actix_web::web;
use tracing::{info, warn};

use cafe_guide::inbound::http::health::HealthState;

/// Resolve on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(%error, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                warn!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

/// Mark the service unhealthy so health checks stop routing to it, then
/// stop the server once in-flight requests finish.
pub async fn drain(handle: ServerHandle, health_state: web::Data<HealthState>) {
    health_state.mark_unhealthy();
    info!("draining connections");
    handle.stop(true).await;
}

/// Wait for a shutdown signal and drain.
pub async fn drain_on_signal(handle: ServerHandle, health_state: web::Data<HealthState>) {
    shutdown_signal().await;
    info!("shutdown requested");
    drain(handle, health_state).await;
}
