//! Report frame parsing (panic-free).
//!
//! Frame body layout (little-endian):
//! ```text
//! version: u8      must be FRAME_VERSION
//! flags:   u8      reserved, any value decodes
//! ident_len: u8    1..=255
//! ident:   [u8; ident_len]   UTF-8
//! exporter_id: u64
//! uptime_secs: u64
//! flows:   4 x u64   tcp, udp, icmp, other
//! packets: 4 x u64   same order
//! bytes:   4 x u64   same order
//! ```
//! On the stream each body is preceded by a `u32` LE length prefix; the
//! prefix itself is the transport's concern and is not part of this module's
//! decode input.
//!
//! Parsing rules:
//! - Never index (`buf[0]`) — always use `Buf` and `remaining()` checks.
//! - Never `unwrap()` / `expect()` / `panic!()` in production paths.

use bytes::{Buf, BufMut, Bytes};

use crate::error::{NfMetricsError, Result};
use crate::record::{ClassCounters, Counters, MetricRecord};

/// Current frame version.
pub const FRAME_VERSION: u8 = 1;

/// Upper bound on a frame body. A length prefix above this cannot be
/// trusted, so the connection is dropped rather than resynced.
pub const MAX_FRAME_BYTES: usize = 4096;

/// Fixed tail after the ident: exporter_id + uptime + 12 counters.
const FIXED_TAIL_BYTES: usize = 14 * 8;

/// Decode one frame body into a record.
pub fn decode_frame(mut buf: Bytes) -> Result<MetricRecord> {
    // Minimum header: version, flags, ident_len
    if buf.remaining() < 3 {
        return Err(NfMetricsError::Decode("frame too short".into()));
    }

    let version = buf.get_u8();
    if version != FRAME_VERSION {
        return Err(NfMetricsError::Decode(format!(
            "unsupported frame version {version}"
        )));
    }

    let _flags = buf.get_u8();

    let ident_len = buf.get_u8() as usize;
    if ident_len == 0 {
        return Err(NfMetricsError::Decode("empty ident".into()));
    }
    // The body length is fully determined by ident_len; anything shorter is
    // truncated, anything longer is corrupt.
    if buf.remaining() < ident_len + FIXED_TAIL_BYTES {
        return Err(NfMetricsError::Decode("truncated frame body".into()));
    }
    if buf.remaining() > ident_len + FIXED_TAIL_BYTES {
        return Err(NfMetricsError::Decode("trailing bytes after frame body".into()));
    }

    let ident_bytes = buf.copy_to_bytes(ident_len);
    let ident = std::str::from_utf8(&ident_bytes)
        .map_err(|_| NfMetricsError::Decode("ident is not valid utf-8".into()))?
        .to_string();

    let exporter_id = buf.get_u64_le();
    let uptime_secs = buf.get_u64_le();

    let read_class_row = |buf: &mut Bytes| -> [u64; 4] {
        [
            buf.get_u64_le(),
            buf.get_u64_le(),
            buf.get_u64_le(),
            buf.get_u64_le(),
        ]
    };

    let flows = read_class_row(&mut buf);
    let packets = read_class_row(&mut buf);
    let bytes = read_class_row(&mut buf);

    let class = |i: usize| ClassCounters {
        flows: flows[i],
        packets: packets[i],
        bytes: bytes[i],
    };

    Ok(MetricRecord {
        ident,
        exporter_id,
        uptime_secs,
        counters: Counters {
            tcp: class(0),
            udp: class(1),
            icmp: class(2),
            other: class(3),
        },
    })
}

/// Encode a record into a frame body (no length prefix).
///
/// Returns `Decode` if the ident does not fit the wire format; the counters
/// themselves always encode.
pub fn encode_frame(record: &MetricRecord) -> Result<Vec<u8>> {
    let ident = record.ident.as_bytes();
    if ident.is_empty() || ident.len() > u8::MAX as usize {
        return Err(NfMetricsError::Decode(format!(
            "ident length {} out of range 1..=255",
            ident.len()
        )));
    }

    let mut out = Vec::with_capacity(3 + ident.len() + FIXED_TAIL_BYTES);
    out.put_u8(FRAME_VERSION);
    out.put_u8(0); // flags
    out.put_u8(ident.len() as u8);
    out.put_slice(ident);
    out.put_u64_le(record.exporter_id);
    out.put_u64_le(record.uptime_secs);

    let c = &record.counters;
    for row in [
        [c.tcp.flows, c.udp.flows, c.icmp.flows, c.other.flows],
        [c.tcp.packets, c.udp.packets, c.icmp.packets, c.other.packets],
        [c.tcp.bytes, c.udp.bytes, c.icmp.bytes, c.other.bytes],
    ] {
        for v in row {
            out.put_u64_le(v);
        }
    }

    Ok(out)
}

/// Encode a record with the `u32` LE length prefix, ready to write to the
/// socket. Used by client tooling and tests.
pub fn encode_framed(record: &MetricRecord) -> Result<Vec<u8>> {
    let body = encode_frame(record)?;
    let mut out = Vec::with_capacity(4 + body.len());
    out.put_u32_le(body.len() as u32);
    out.put_slice(&body);
    Ok(out)
}
