//! nfmetrics daemon library entry.
//!
//! This crate wires the ingestion listener, metric store, and HTTP ops
//! endpoints into a running exporter process. It is intended to be consumed
//! by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod ingest;
pub mod obs;
pub mod ops;
pub mod router;
