//! Typed metric record model.
//!
//! One record holds the cumulative totals reported by a single collector
//! (ident) for a single upstream traffic source (exporter id). Counters are
//! the collector's own running totals, so an update replaces the previous
//! record wholesale instead of summing into it.

/// Protocol class a counter is broken out by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proto {
    Tcp,
    Udp,
    Icmp,
    Other,
}

impl Proto {
    /// Label value used in the exposition format.
    pub fn as_str(self) -> &'static str {
        match self {
            Proto::Tcp => "tcp",
            Proto::Udp => "udp",
            Proto::Icmp => "icmp",
            Proto::Other => "other",
        }
    }
}

/// Flow/packet/byte totals for one protocol class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCounters {
    pub flows: u64,
    pub packets: u64,
    pub bytes: u64,
}

/// The full 12-counter set of a record, per protocol class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub tcp: ClassCounters,
    pub udp: ClassCounters,
    pub icmp: ClassCounters,
    pub other: ClassCounters,
}

impl Counters {
    /// Iterate classes in wire/exposition order.
    pub fn classes(&self) -> [(Proto, &ClassCounters); 4] {
        [
            (Proto::Tcp, &self.tcp),
            (Proto::Udp, &self.udp),
            (Proto::Icmp, &self.icmp),
            (Proto::Other, &self.other),
        ]
    }
}

/// Key uniquely identifying a record in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub ident: String,
    pub exporter_id: u64,
}

/// Latest cumulative report from one (ident, exporter) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRecord {
    /// Collection profile name of the reporting collector.
    pub ident: String,
    /// Upstream traffic source id within that ident.
    pub exporter_id: u64,
    /// Seconds since the collector started (gauge, not a counter).
    pub uptime_secs: u64,
    pub counters: Counters,
}

impl MetricRecord {
    pub fn key(&self) -> RecordKey {
        RecordKey {
            ident: self.ident.clone(),
            exporter_id: self.exporter_id,
        }
    }
}
