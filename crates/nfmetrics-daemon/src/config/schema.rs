use std::net::SocketAddr;

use serde::Deserialize;

use nfmetrics_core::error::{NfMetricsError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DaemonConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub exporter: ExporterSection,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            exporter: ExporterSection::default(),
        }
    }
}

impl DaemonConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(NfMetricsError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }
        self.exporter.validate()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    /// Address the HTTP transport listens on for scrapes.
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Path under which metrics are exposed.
    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,

    /// Unix socket path collectors connect to.
    #[serde(default = "default_socket")]
    pub socket: String,
}

impl Default for ExporterSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            metrics_path: default_metrics_path(),
            socket: default_socket(),
        }
    }
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        self.listen.parse::<SocketAddr>().map_err(|e| {
            NfMetricsError::Config(format!(
                "exporter.listen must be a valid socket address: {e}"
            ))
        })?;
        if !self.metrics_path.starts_with('/') || self.metrics_path == "/" {
            return Err(NfMetricsError::Config(
                "exporter.metrics_path must start with '/' and not be the root".into(),
            ));
        }
        if self.socket.is_empty() {
            return Err(NfMetricsError::Config(
                "exporter.socket must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_version() -> u32 {
    1
}
fn default_listen() -> String {
    "0.0.0.0:9141".into()
}
fn default_metrics_path() -> String {
    "/metrics".into()
}
fn default_socket() -> String {
    "/tmp/nfsen.sock".into()
}
