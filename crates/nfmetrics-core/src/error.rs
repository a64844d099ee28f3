//! Shared error type across nfmetrics crates.

use thiserror::Error;

/// Stable error kind codes (used in logs and self-metric labels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Ingestion socket path unavailable at startup.
    Bind,
    /// Malformed report frame.
    Decode,
    /// Peer reset / closed / read failure.
    Connection,
    /// A snapshot entry could not be rendered.
    Render,
    /// Invalid configuration.
    Config,
    /// Internal error.
    Internal,
}

impl ErrorKind {
    /// String representation used in log fields and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Bind => "BIND",
            ErrorKind::Decode => "DECODE",
            ErrorKind::Connection => "CONNECTION",
            ErrorKind::Render => "RENDER",
            ErrorKind::Config => "CONFIG",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, NfMetricsError>;

/// Unified error type used by core and daemon.
#[derive(Debug, Error)]
pub enum NfMetricsError {
    #[error("bind failed: {0}")]
    Bind(String),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("connection error: {0}")]
    Connection(String),
    #[error("render failed: {0}")]
    Render(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl NfMetricsError {
    /// Map an error to its stable kind code.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NfMetricsError::Bind(_) => ErrorKind::Bind,
            NfMetricsError::Decode(_) => ErrorKind::Decode,
            NfMetricsError::Connection(_) => ErrorKind::Connection,
            NfMetricsError::Render(_) => ErrorKind::Render,
            NfMetricsError::Config(_) => ErrorKind::Config,
            NfMetricsError::Internal(_) => ErrorKind::Internal,
        }
    }
}
