//! Lightweight in-process self-observability.
//!
//! These counters describe the daemon itself (connections, frames, decode
//! failures), not the collector traffic — those live in the metric store.
//! Stored as atomics and rendered alongside the store snapshot by the
//! metrics handler.

pub mod metrics;

pub use metrics::DaemonMetrics;
