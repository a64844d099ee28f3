//! Per-connection report reader.

use bytes::Bytes;
use tokio::io::AsyncReadExt;
use tokio::net::UnixStream;
use tokio::sync::watch;

use nfmetrics_core::error::{NfMetricsError, Result};
use nfmetrics_core::protocol::{decode_frame, MAX_FRAME_BYTES};
use nfmetrics_core::MetricStore;

use crate::obs::DaemonMetrics;

/// Read framed reports from one collector until close, read error, or
/// shutdown.
///
/// A malformed frame body is skipped and reading continues; the length
/// prefix keeps the stream in sync. A length prefix outside the valid range
/// cannot be trusted, so the connection is dropped instead.
pub async fn handle(
    mut stream: UnixStream,
    store: &MetricStore,
    obs: &DaemonMetrics,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let mut len_buf = [0u8; 4];

    loop {
        tokio::select! {
            _ = shutdown.changed() => return Ok(()),

            read = stream.read_exact(&mut len_buf) => {
                match read {
                    // Clean close between frames.
                    Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(()),
                    Err(e) => {
                        return Err(NfMetricsError::Connection(format!("read failed: {e}")));
                    }
                    Ok(_) => {}
                }

                let len = u32::from_le_bytes(len_buf) as usize;
                if len == 0 || len > MAX_FRAME_BYTES {
                    return Err(NfMetricsError::Connection(format!(
                        "unframeable length prefix {len}"
                    )));
                }

                let mut body = vec![0u8; len];
                stream
                    .read_exact(&mut body)
                    .await
                    .map_err(|e| NfMetricsError::Connection(format!("read failed: {e}")))?;

                match decode_frame(Bytes::from(body)) {
                    Ok(record) => {
                        tracing::debug!(
                            ident = %record.ident,
                            exporter_id = record.exporter_id,
                            "report applied"
                        );
                        obs.frames_total.inc(&[]);
                        store.upsert(record);
                    }
                    Err(e) => {
                        obs.decode_errors.inc(&[("kind", e.kind().as_str())]);
                        tracing::warn!(error = %e, "malformed frame skipped");
                    }
                }
            }
        }
    }
}
