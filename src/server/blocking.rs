//! Serialized connection handling.
//!
//! Every connection is read, answered, and closed on the accept loop itself,
//! so a stalled client holds up everyone queued behind it.

use std::io;
use tokio::io::AsyncWriteExt;

use crate::config::ServerConfig;
use crate::http::{CannedResponse, RequestBuffer};
use crate::net::{Connection, ConnectionEvent, Listener};

/// Single-task server: accept, read, respond, close, repeat.
pub struct BlockingServer {
    config: ServerConfig,
}

impl BlockingServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Run the accept loop. Never returns.
    pub async fn run(self, mut listener: Listener) {
        tracing::info!(variant = "simple", "Accept loop started");

        loop {
            let mut conn = match listener.accept().await {
                Ok(conn) => conn,
                Err(e) => {
                    tracing::warn!(error = %e, "Accept failed");
                    continue;
                }
            };

            if let Err(e) = handle(&mut conn, &self.config).await {
                tracing::debug!(connection_id = %conn.id, error = %e, "Connection failed");
            }

            // Best effort: the socket is closed on drop either way.
            let _ = conn.stream.shutdown().await;
            conn.transition(ConnectionEvent::Closed);
        }
    }
}

/// Read the request, then write the `Connection: close` response.
///
/// An empty request (peer half-closed without sending) is still answered.
pub async fn handle(conn: &mut Connection, config: &ServerConfig) -> io::Result<()> {
    let mut request = RequestBuffer::from_config(config);

    let n = request.read_from(&mut conn.stream).await?;
    if n > 0 {
        request.drain_ready(&conn.stream)?;
    }
    tracing::trace!(connection_id = %conn.id, bytes = request.len(), "Request read");

    CannedResponse::Close.write_to(&mut conn.stream).await?;
    conn.transition(ConnectionEvent::Responded);
    Ok(())
}
