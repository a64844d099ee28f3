//! End-to-end ingestion tests over a real Unix socket.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::UnixStream;

use nfmetrics_core::protocol::encode_framed;
use nfmetrics_core::{ClassCounters, Counters, MetricRecord, MetricStore};
use nfmetrics_daemon::ingest::IngestListener;
use nfmetrics_daemon::obs::DaemonMetrics;

static SOCKET_SEQ: AtomicU32 = AtomicU32::new(0);

fn socket_path() -> PathBuf {
    std::env::temp_dir().join(format!(
        "nfmetrics-test-{}-{}.sock",
        std::process::id(),
        SOCKET_SEQ.fetch_add(1, Ordering::Relaxed)
    ))
}

fn record(ident: &str, exporter_id: u64, tcp_flows: u64, tcp_bytes: u64) -> MetricRecord {
    MetricRecord {
        ident: ident.into(),
        exporter_id,
        uptime_secs: 60,
        counters: Counters {
            tcp: ClassCounters { flows: tcp_flows, packets: 0, bytes: tcp_bytes },
            ..Counters::default()
        },
    }
}

async fn start(path: &PathBuf) -> (IngestListener, Arc<MetricStore>, Arc<DaemonMetrics>) {
    let store = Arc::new(MetricStore::new());
    let obs = Arc::new(DaemonMetrics::default());
    let mut listener = IngestListener::open(path.clone()).expect("open failed");
    listener.run(Arc::clone(&store), Arc::clone(&obs)).expect("run failed");
    (listener, store, obs)
}

/// Poll until `pred` holds or the deadline passes.
async fn wait_for(mut pred: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !pred() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not reached in time"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn report_lands_in_store_and_update_supersedes() {
    let path = socket_path();
    let (mut listener, store, _obs) = start(&path).await;

    let mut client = UnixStream::connect(&path).await.unwrap();
    client
        .write_all(&encode_framed(&record("live", 7, 100, 5000)).unwrap())
        .await
        .unwrap();

    wait_for(|| store.len() == 1).await;
    assert_eq!(store.snapshot()[0].counters.tcp.flows, 100);

    // Same pair again: replaced, never summed.
    client
        .write_all(&encode_framed(&record("live", 7, 150, 5000)).unwrap())
        .await
        .unwrap();

    wait_for(|| store.snapshot()[0].counters.tcp.flows == 150).await;
    let snap = store.snapshot();
    assert_eq!(snap.len(), 1);
    assert_eq!(snap[0].ident, "live");
    assert_eq!(snap[0].exporter_id, 7);
    assert_eq!(snap[0].counters.tcp.flows, 150);

    listener.close().await;
}

#[tokio::test]
async fn malformed_frame_skipped_connection_survives() {
    let path = socket_path();
    let (mut listener, store, obs) = start(&path).await;

    let mut client = UnixStream::connect(&path).await.unwrap();

    // Valid length prefix, bad body (wrong version).
    let mut bad = 3u32.to_le_bytes().to_vec();
    bad.extend_from_slice(&[0x02, 0x00, 0x00]);
    client.write_all(&bad).await.unwrap();

    // Followed by a valid frame on the same connection.
    client
        .write_all(&encode_framed(&record("live", 7, 100, 5000)).unwrap())
        .await
        .unwrap();

    wait_for(|| store.len() == 1).await;
    assert_eq!(obs.decode_errors.get(&[("kind", "DECODE")]), 1);

    // Connection is still usable.
    client
        .write_all(&encode_framed(&record("live", 8, 1, 1)).unwrap())
        .await
        .unwrap();
    wait_for(|| store.len() == 2).await;

    listener.close().await;
}

#[tokio::test]
async fn concurrent_connections_all_land() {
    let path = socket_path();
    let (mut listener, store, _obs) = start(&path).await;

    let mut clients = Vec::new();
    for c in 0..4u64 {
        let path = path.clone();
        clients.push(tokio::spawn(async move {
            let mut client = UnixStream::connect(&path).await.unwrap();
            for i in 0..5u64 {
                let r = record(&format!("conn-{c}"), i, i + 1, 0);
                client.write_all(&encode_framed(&r).unwrap()).await.unwrap();
            }
        }));
    }
    for c in clients {
        c.await.unwrap();
    }

    wait_for(|| store.len() == 20).await;
    listener.close().await;
}

#[tokio::test]
async fn close_unlinks_socket_and_refuses_connections() {
    let path = socket_path();
    let (mut listener, _store, _obs) = start(&path).await;

    let client = UnixStream::connect(&path).await.unwrap();
    listener.close().await;

    assert!(!path.exists(), "socket path must be gone after close");
    assert!(UnixStream::connect(&path).await.is_err());
    drop(client);

    // Idempotent.
    listener.close().await;
}

#[tokio::test]
async fn open_refuses_live_socket_but_clears_stale_file() {
    let path = socket_path();
    let (mut listener, _store, _obs) = start(&path).await;

    let err = match IngestListener::open(path.clone()) {
        Ok(_) => panic!("second bind must fail"),
        Err(e) => e,
    };
    assert_eq!(err.kind().as_str(), "BIND");

    listener.close().await;

    // Leave a stale socket file behind, as a crashed instance would.
    let stale = std::os::unix::net::UnixListener::bind(&path).unwrap();
    drop(stale);
    assert!(path.exists());

    let mut reopened = IngestListener::open(path.clone()).expect("stale file must be cleared");
    reopened.close().await;
}
