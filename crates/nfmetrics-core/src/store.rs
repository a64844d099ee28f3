//! Concurrent metric store.
//!
//! Holds the latest record per (ident, exporter) pair. The whole mapping sits
//! behind one `RwLock`: upserts take the write lock and replace the record
//! wholesale, snapshots take the read lock only long enough to copy the map.
//! A snapshot can therefore never observe a half-applied record, and readers
//! never hold the lock while rendering.
//!
//! Constructed once at process start and shared through an `Arc` by the
//! ingestion listener and the HTTP handlers.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::record::{MetricRecord, RecordKey};

#[derive(Default)]
pub struct MetricStore {
    records: RwLock<HashMap<RecordKey, MetricRecord>>,
}

impl MetricStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace the record keyed by (ident, exporter_id).
    ///
    /// Last write wins; the full counter set plus uptime are replaced
    /// together, never field by field.
    pub fn upsert(&self, record: MetricRecord) {
        let key = record.key();
        let mut map = match self.records.write() {
            Ok(g) => g,
            // A poisoned lock means a panic mid-write elsewhere; the map
            // itself is still whole-record consistent, so keep serving.
            Err(poisoned) => poisoned.into_inner(),
        };
        map.insert(key, record);
    }

    /// Point-in-time copy of all records, sorted by (ident, exporter_id)
    /// for deterministic rendering. The lock is released before return.
    pub fn snapshot(&self) -> Vec<MetricRecord> {
        let mut records: Vec<MetricRecord> = {
            let map = match self.records.read() {
                Ok(g) => g,
                Err(poisoned) => poisoned.into_inner(),
            };
            map.values().cloned().collect()
        };
        records.sort_by(|a, b| {
            (a.ident.as_str(), a.exporter_id).cmp(&(b.ident.as_str(), b.exporter_id))
        });
        records
    }

    pub fn len(&self) -> usize {
        match self.records.read() {
            Ok(g) => g.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
