//! nfmetricsd: nfcapd collector metrics -> Prometheus bridge.
//!
//! - Unix socket ingest: collectors push cumulative report frames
//! - HTTP exposition: `/metrics` (configurable), `/` index, `/healthz`
//! - Graceful shutdown on SIGINT/SIGTERM: ingest socket closed and unlinked

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use nfmetrics_daemon::{app_state::AppState, config, ingest::IngestListener, router};

const CONFIG_PATH: &str = "nfmetrics.yaml";

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = match config::load_or_default(CONFIG_PATH) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "config load failed");
            std::process::exit(1);
        }
    };

    let listen: SocketAddr = match cfg.exporter.listen.parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(error = %e, "exporter.listen must be a valid socket address");
            std::process::exit(1);
        }
    };

    let state = AppState::new(cfg);

    // Ingest socket comes up before HTTP; a bind failure is fatal.
    let mut ingest = match IngestListener::open(&state.cfg().exporter.socket) {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(error = %e, "ingest socket bind failed");
            std::process::exit(1);
        }
    };
    if let Err(e) = ingest.run(state.store(), state.metrics()) {
        tracing::error!(error = %e, "ingest listener start failed");
        std::process::exit(1);
    }

    let app = router::build_router(state.clone());

    tracing::info!(%listen, "nfmetricsd starting");
    let listener = match tokio::net::TcpListener::bind(listen).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(error = %e, %listen, "http bind failed");
            ingest.close().await;
            std::process::exit(1);
        }
    };

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    ingest.close().await;

    if let Err(e) = served {
        tracing::error!(error = %e, "http server failed");
        std::process::exit(1);
    }
    tracing::info!("exporter stopped");
}

async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "cannot install SIGTERM handler");
            std::process::exit(1);
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = sigterm.recv() => {}
    }
    tracing::info!("shutdown signal received");
}
