//! Shared application state for the daemon.
//!
//! The store and self-metrics are constructed once here and handed out as
//! `Arc` handles to the ingestion listener and the HTTP handlers; no global
//! state exists anywhere.

use std::sync::Arc;

use nfmetrics_core::MetricStore;

use crate::config::DaemonConfig;
use crate::obs::DaemonMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: DaemonConfig,
    store: Arc<MetricStore>,
    metrics: Arc<DaemonMetrics>,
}

impl AppState {
    pub fn new(cfg: DaemonConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                store: Arc::new(MetricStore::new()),
                metrics: Arc::new(DaemonMetrics::default()),
            }),
        }
    }

    pub fn cfg(&self) -> &DaemonConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> Arc<MetricStore> {
        Arc::clone(&self.inner.store)
    }

    pub fn metrics(&self) -> Arc<DaemonMetrics> {
        Arc::clone(&self.inner.metrics)
    }
}
