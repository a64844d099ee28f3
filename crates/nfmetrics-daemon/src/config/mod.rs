//! Daemon config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use nfmetrics_core::error::{NfMetricsError, Result};

pub use schema::{DaemonConfig, ExporterSection};

pub fn load_from_file(path: &str) -> Result<DaemonConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| NfMetricsError::Config(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<DaemonConfig> {
    let cfg: DaemonConfig = serde_yaml::from_str(s)
        .map_err(|e| NfMetricsError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load the given config file, or fall back to built-in defaults when the
/// file does not exist. A file that exists but fails to parse is still an
/// error.
pub fn load_or_default(path: &str) -> Result<DaemonConfig> {
    if Path::new(path).exists() {
        load_from_file(path)
    } else {
        tracing::debug!(path, "no config file, using defaults");
        Ok(DaemonConfig::default())
    }
}
