//! Exposition rendering tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use nfmetrics_core::render::{descriptors, render_snapshot};
use nfmetrics_core::{ClassCounters, Counters, MetricRecord};

fn sample_record() -> MetricRecord {
    MetricRecord {
        ident: "live".into(),
        exporter_id: 7,
        uptime_secs: 60,
        counters: Counters {
            tcp: ClassCounters { flows: 100, packets: 200, bytes: 5000 },
            udp: ClassCounters { flows: 10, packets: 20, bytes: 500 },
            icmp: ClassCounters { flows: 1, packets: 2, bytes: 50 },
            other: ClassCounters { flows: 3, packets: 4, bytes: 60 },
        },
    }
}

#[test]
fn empty_snapshot_renders_schema_only() {
    let out = render_snapshot(&[]);
    for d in descriptors() {
        assert!(out.contains(&format!("# TYPE {} {}", d.name, d.kind.as_str())));
        assert!(out.contains(&format!("# HELP {}", d.name)));
    }
    // No samples: every non-comment line would start with a metric name
    // followed by a label set.
    assert!(out.lines().all(|l| l.starts_with('#')));
}

#[test]
fn record_renders_twelve_counters_and_uptime() {
    let out = render_snapshot(&[sample_record()]);

    assert!(out.contains(
        r#"nfsen_collector_flows{ident="live",exporter="7",proto="tcp"} 100"#
    ));
    assert!(out.contains(
        r#"nfsen_collector_packets{ident="live",exporter="7",proto="udp"} 20"#
    ));
    assert!(out.contains(r#"nfsen_collector_uptime{ident="live"} 60"#));

    let samples = out.lines().filter(|l| !l.starts_with('#')).count();
    assert_eq!(samples, 13);
}

#[test]
fn icmp_and_other_bytes_come_from_byte_counters() {
    // icmp/other byte samples must carry the byte totals, not the packet
    // totals for the same class.
    let out = render_snapshot(&[sample_record()]);
    assert!(out.contains(
        r#"nfsen_collector_bytes{ident="live",exporter="7",proto="icmp"} 50"#
    ));
    assert!(out.contains(
        r#"nfsen_collector_bytes{ident="live",exporter="7",proto="other"} 60"#
    ));
}

#[test]
fn label_values_are_escaped() {
    let mut r = sample_record();
    r.ident = "a\"b\\c\nd".into();
    let out = render_snapshot(&[r]);
    assert!(out.contains(r#"ident="a\"b\\c\nd""#));
}

#[test]
fn unrenderable_record_is_skipped_not_fatal() {
    let mut bad = sample_record();
    bad.ident = String::new();
    let good = MetricRecord { exporter_id: 8, ..sample_record() };

    let out = render_snapshot(&[bad, good]);
    let samples = out.lines().filter(|l| !l.starts_with('#')).count();
    assert_eq!(samples, 13);
    assert!(out.contains(r#"exporter="8""#));
}
