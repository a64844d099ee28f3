//! Collector ingestion over a local Unix socket.
//!
//! Collectors connect as clients and push length-prefixed report frames.
//! The listener accepts off the caller's task, one handler task per
//! connection, all of them joined during shutdown so `close()` gives a real
//! completion guarantee.

pub mod conn;
pub mod listener;

pub use listener::IngestListener;
