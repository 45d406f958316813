//! Task-per-connection handling.
//!
//! # Responsibilities
//! - Spawn one task per accepted connection, unbounded
//! - Answer every complete request on a connection, keeping it open
//! - Reap finished tasks and report panics
//!
//! # Design Decisions
//! - Task handles live in a `JoinSet` owned by the accept loop
//! - Tasks share nothing but the read-only config
//! - No timeouts: a connection ends only when the peer closes it or I/O fails

use std::io;
use std::sync::Arc;
use tokio::task::{JoinError, JoinSet};

use crate::config::ServerConfig;
use crate::http::{CannedResponse, RequestBuffer};
use crate::net::{Connection, ConnectionEvent, Listener};

/// Multi-task server: one task per connection.
pub struct ConcurrentServer {
    config: Arc<ServerConfig>,
}

impl ConcurrentServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Run the accept loop. Never returns.
    pub async fn run(self, mut listener: Listener) {
        tracing::info!(variant = "threads", "Accept loop started");
        let mut tasks = JoinSet::new();

        loop {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok(conn) => {
                        let config = Arc::clone(&self.config);
                        tasks.spawn(serve_connection(conn, config));
                    }
                    Err(e) => tracing::warn!(error = %e, "Accept failed"),
                },
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => reap(joined),
            }
        }
    }
}

fn reap(joined: Result<(), JoinError>) {
    if let Err(e) = joined {
        if e.is_panic() {
            tracing::error!(error = %e, "Connection task panicked");
        }
    }
}

async fn serve_connection(mut conn: Connection, config: Arc<ServerConfig>) {
    tracing::debug!(connection_id = %conn.id, peer_addr = %conn.peer_addr, "Task launched");

    match respond_until_closed(&mut conn, &config).await {
        Ok(responses) => {
            tracing::debug!(connection_id = %conn.id, responses, "Peer closed connection");
        }
        Err(e) => {
            tracing::debug!(connection_id = %conn.id, error = %e, "Connection failed");
        }
    }

    conn.transition(ConnectionEvent::Closed);
    tracing::debug!(connection_id = %conn.id, "Task exiting");
}

/// Answer each end-of-headers marker until EOF. Returns the response count.
pub async fn respond_until_closed(conn: &mut Connection, config: &ServerConfig) -> io::Result<u64> {
    let mut request = RequestBuffer::from_config(config);
    let mut responses = 0;

    loop {
        if request.is_full() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "no end-of-headers marker within {} bytes",
                    config.max_request_bytes
                ),
            ));
        }

        if request.read_from(&mut conn.stream).await? == 0 {
            return Ok(responses);
        }

        while request.take_request().is_some() {
            CannedResponse::KeepOpen.write_to(&mut conn.stream).await?;
            conn.transition(ConnectionEvent::Responded);
            responses += 1;
        }
        conn.transition(ConnectionEvent::ReadMore);
    }
}
