//! Report frame wire format.
//!
//! Collectors push a stream of length-prefixed binary frames over the local
//! socket; each frame carries one full cumulative report for a single
//! (ident, exporter) pair.
//!
//! All parsers are panic-free: malformed input is reported as
//! `NfMetricsError` instead of panicking or indexing raw buffers, keeping
//! the daemon resilient to a misbehaving collector.

pub mod frame;

pub use frame::{decode_frame, encode_frame, encode_framed, FRAME_VERSION, MAX_FRAME_BYTES};
