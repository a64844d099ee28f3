//! Top-level facade crate for nfmetrics.
//!
//! Re-exports core types and the daemon library so users can depend on a single crate.

pub mod core {
    pub use nfmetrics_core::*;
}

pub mod daemon {
    pub use nfmetrics_daemon::*;
}
