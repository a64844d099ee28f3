//! nfmetrics core: report protocol, metric store, and exposition rendering.
//!
//! This crate defines the wire-level contract spoken by nfcapd-style
//! collectors, the typed record model, the concurrent store, and the pure
//! snapshot-to-text renderer. It intentionally carries no transport or
//! runtime dependencies so the daemon, test tooling, and client helpers can
//! all share it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `NfMetricsError`/`Result` so a
//! malformed report from a collector can never crash the exporter.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;
pub mod record;
pub mod render;
pub mod store;

/// Shared result type.
pub use error::{NfMetricsError, Result};
pub use record::{ClassCounters, Counters, MetricRecord, Proto, RecordKey};
pub use store::MetricStore;
