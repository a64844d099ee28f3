//! Prometheus text exposition rendering.
//!
//! Pure stage: a store snapshot goes in, exposition text comes out. No locks,
//! no I/O. Metric names and label sets follow the nfsen collector schema:
//! flows/packets/bytes counters labeled by ident, exporter id (as a decimal
//! string), and protocol class, plus one uptime gauge per record labeled by
//! ident.

use std::fmt::Write;

use crate::record::MetricRecord;

const UPTIME: &str = "nfsen_collector_uptime";
const FLOWS: &str = "nfsen_collector_flows";
const PACKETS: &str = "nfsen_collector_packets";
const BYTES: &str = "nfsen_collector_bytes";

/// Metric kind in the exposition format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
        }
    }
}

/// Static schema entry for one exposed metric family.
#[derive(Debug, Clone, Copy)]
pub struct MetricDesc {
    pub name: &'static str,
    pub help: &'static str,
    pub kind: MetricKind,
}

/// The static metric families exposed from collector reports. Invariant
/// across calls.
pub fn descriptors() -> [MetricDesc; 4] {
    [
        MetricDesc {
            name: UPTIME,
            help: "Seconds since the reporting collector started (per ident).",
            kind: MetricKind::Gauge,
        },
        MetricDesc {
            name: FLOWS,
            help: "How many flows have been received (per ident, exporter and protocol).",
            kind: MetricKind::Counter,
        },
        MetricDesc {
            name: PACKETS,
            help: "How many packets have been received (per ident, exporter and protocol).",
            kind: MetricKind::Counter,
        },
        MetricDesc {
            name: BYTES,
            help: "How many bytes have been received (per ident, exporter and protocol).",
            kind: MetricKind::Counter,
        },
    ]
}

/// Escape a label value per the exposition format.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// A label value the renderer refuses to emit. Should not occur for records
/// that passed frame decoding; the sample is skipped, never the response.
fn label_ok(v: &str) -> bool {
    !v.is_empty()
}

/// Render a full snapshot to exposition text.
///
/// An empty snapshot renders schema metadata only. A record whose ident
/// fails label validation is skipped with a warning; the rest of the
/// response is still produced.
pub fn render_snapshot(records: &[MetricRecord]) -> String {
    let mut out = String::new();

    for d in descriptors() {
        let _ = writeln!(out, "# HELP {} {}", d.name, d.help);
        let _ = writeln!(out, "# TYPE {} {}", d.name, d.kind.as_str());
    }

    for record in records {
        if !label_ok(&record.ident) {
            tracing::warn!(exporter_id = record.exporter_id, "skipping record with unrenderable ident");
            continue;
        }
        render_record(record, &mut out);
    }

    out
}

/// Emit the 12 counter samples plus the uptime gauge for one record.
fn render_record(record: &MetricRecord, out: &mut String) {
    let ident = escape_label(&record.ident);
    let exporter = record.exporter_id.to_string();

    for (proto, class) in record.counters.classes() {
        let proto = proto.as_str();
        for (name, value) in [
            (FLOWS, class.flows),
            (PACKETS, class.packets),
            (BYTES, class.bytes),
        ] {
            let _ = writeln!(
                out,
                "{name}{{ident=\"{ident}\",exporter=\"{exporter}\",proto=\"{proto}\"}} {value}"
            );
        }
    }

    let _ = writeln!(
        out,
        "{UPTIME}{{ident=\"{ident}\"}} {}",
        record.uptime_secs
    );
}
