//! Unix socket listener and accept loop.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::UnixListener;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};

use nfmetrics_core::error::{NfMetricsError, Result};
use nfmetrics_core::MetricStore;

use crate::ingest::conn;
use crate::obs::DaemonMetrics;

/// How long `close()` waits for in-flight handlers before aborting them.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Ingestion endpoint for collector reports.
///
/// Lifecycle: `open` binds the socket, `run` starts accepting, `close`
/// shuts everything down and unlinks the path. `close` is idempotent.
pub struct IngestListener {
    path: PathBuf,
    listener: Option<UnixListener>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    accept_task: Option<JoinHandle<()>>,
}

impl IngestListener {
    /// Bind the listening socket at `path`.
    ///
    /// A stale socket file left by a crashed instance (one that refuses
    /// connections) is removed before binding; a path held by a live
    /// listener is a bind error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if path.exists() {
            match std::os::unix::net::UnixStream::connect(&path) {
                Ok(_) => {
                    return Err(NfMetricsError::Bind(format!(
                        "socket {} is in use by a live listener",
                        path.display()
                    )));
                }
                Err(_) => {
                    tracing::info!(path = %path.display(), "removing stale socket file");
                    std::fs::remove_file(&path).map_err(|e| {
                        NfMetricsError::Bind(format!(
                            "cannot remove stale socket {}: {e}",
                            path.display()
                        ))
                    })?;
                }
            }
        }

        let listener = UnixListener::bind(&path).map_err(|e| {
            NfMetricsError::Bind(format!("cannot bind {}: {e}", path.display()))
        })?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            path,
            listener: Some(listener),
            shutdown_tx,
            shutdown_rx,
            accept_task: None,
        })
    }

    /// Start accepting connections. Returns immediately; accepting and
    /// per-connection reading happen on spawned tasks.
    pub fn run(&mut self, store: Arc<MetricStore>, obs: Arc<DaemonMetrics>) -> Result<()> {
        let listener = self
            .listener
            .take()
            .ok_or_else(|| NfMetricsError::Internal("listener already running".into()))?;

        tracing::info!(path = %self.path.display(), "ingest listener accepting");
        let shutdown = self.shutdown_rx.clone();
        self.accept_task = Some(tokio::spawn(accept_loop(listener, store, obs, shutdown)));
        Ok(())
    }

    /// Stop accepting, drain handlers, unlink the socket path.
    ///
    /// After this returns no handler is left that could mutate the store.
    /// Repeated calls are no-ops.
    pub async fn close(&mut self) {
        let _ = self.shutdown_tx.send(true);

        if let Some(task) = self.accept_task.take() {
            if task.await.is_err() {
                tracing::warn!("accept loop ended abnormally");
            }
        }
        // open() without run(): drop the bound socket before unlinking.
        self.listener = None;

        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::info!(path = %self.path.display(), "ingest socket removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "socket unlink failed"),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

async fn accept_loop(
    listener: UnixListener,
    store: Arc<MetricStore>,
    obs: Arc<DaemonMetrics>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut handlers: JoinSet<()> = JoinSet::new();

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,

            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, _addr)) => {
                        obs.connections_total.inc(&[]);
                        obs.connections_active.inc(&[]);

                        let store = Arc::clone(&store);
                        let obs = Arc::clone(&obs);
                        let shutdown = shutdown.clone();
                        handlers.spawn(async move {
                            if let Err(e) = conn::handle(stream, &store, &obs, shutdown).await {
                                obs.connection_errors.inc(&[]);
                                tracing::debug!(error = %e, "connection ended with error");
                            }
                            obs.connections_active.dec(&[]);
                        });
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "accept failed");
                    }
                }
            }

            // Reap finished handlers so the set does not grow unbounded.
            Some(_) = handlers.join_next(), if !handlers.is_empty() => {}
        }
    }

    // Stop accepting before draining handlers.
    drop(listener);

    let drain = async {
        while handlers.join_next().await.is_some() {}
    };
    if tokio::time::timeout(SHUTDOWN_GRACE, drain).await.is_err() {
        tracing::warn!("handlers still running after grace period, aborting");
        handlers.shutdown().await;
    }
    tracing::debug!("accept loop stopped");
}
