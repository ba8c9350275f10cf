//! Serve command - warm-up cycle, background refresher and HTTP server

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::api::{AppState, create_router};
use crate::config::AppConfig;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::observability::init_metrics;

pub async fn run() -> anyhow::Result<()> {
    let config = super::load_config()?;
    init_logging(&config.logging);
    let metrics = init_metrics(&config.metrics);

    let services = crate::create_services(&config)?;

    info!("Running warm-up refresh cycle");
    services.refresher.run_full_cycle().await;

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let refresher = services.refresher.clone();
    let drain = refresher.intervals().tick();
    let refresher_handle = tokio::spawn(refresher.run(shutdown_rx));

    let state = AppState::new(services.dashboard, services.assistant);
    let app = create_router(state, metrics, &config.metrics.path);

    let addr = build_socket_addr(&config)?;
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The refresher only sees the signal between cycles; give it one tick
    let _ = shutdown_tx.send(());
    match tokio::time::timeout(drain, refresher_handle).await {
        Ok(Ok(())) => info!("Refresher stopped"),
        Ok(Err(e)) => warn!(error = %e, "Refresher task failed"),
        Err(_) => warn!(
            drain_secs = drain.as_secs(),
            "Refresher did not stop in time, abandoning it"
        ),
    }

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}
