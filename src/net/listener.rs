//! TCP listener implementation.
//!
//! # Responsibilities
//! - Create, bind, and listen on the configured address with a fixed backlog
//! - Accept incoming TCP connections and number them in accept order
//! - Hand each connection a tracking guard
//!
//! # Design Decisions
//! - Socket setup failures abort startup; an unbound listener is never used
//! - No connection limit: accept never waits for a free slot

use std::io;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::{TcpListener, TcpSocket};

use crate::config::validation::{validate_config, ValidationError};
use crate::config::ServerConfig;
use crate::net::connection::{Connection, ConnectionId, ConnectionTracker};

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Configuration rejected before touching the network.
    #[error("invalid configuration: {0:?}")]
    Config(Vec<ValidationError>),
    /// Failed to create the socket.
    #[error("failed to create socket: {0}")]
    Socket(#[source] io::Error),
    /// Failed to bind to address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    /// Failed to put the socket into listening state.
    #[error("failed to listen on {addr}: {source}")]
    Listen {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    /// Failed to accept connection.
    #[error("failed to accept: {0}")]
    Accept(#[source] io::Error),
}

/// A TCP listener that numbers accepted connections sequentially.
pub struct Listener {
    /// The underlying TCP listener.
    inner: TcpListener,
    /// Live connection bookkeeping.
    tracker: ConnectionTracker,
    /// ID handed to the next accepted connection.
    next_id: u64,
}

impl Listener {
    /// Create a socket, bind it to the configured address, and start listening.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn bind(config: &ServerConfig) -> Result<Self, ListenerError> {
        validate_config(config).map_err(ListenerError::Config)?;

        let addr = config.bind_address();
        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()
        } else {
            TcpSocket::new_v6()
        }
        .map_err(ListenerError::Socket)?;

        socket.set_reuseaddr(true).map_err(ListenerError::Socket)?;
        socket
            .bind(addr)
            .map_err(|source| ListenerError::Bind { addr, source })?;

        let listener = socket
            .listen(config.backlog)
            .map_err(|source| ListenerError::Listen { addr, source })?;

        let local_addr = listener
            .local_addr()
            .map_err(|source| ListenerError::Listen { addr, source })?;

        tracing::info!(
            address = %local_addr,
            backlog = config.backlog,
            "Listener bound"
        );

        Ok(Self {
            inner: listener,
            tracker: ConnectionTracker::new(),
            next_id: 0,
        })
    }

    /// Accept the next connection.
    ///
    /// The returned [`Connection`] carries a guard; the live count drops
    /// when the connection is dropped.
    pub async fn accept(&mut self) -> Result<Connection, ListenerError> {
        let (stream, peer_addr) = self.inner.accept().await.map_err(ListenerError::Accept)?;

        let id = ConnectionId::new(self.next_id);
        self.next_id += 1;
        let guard = self.tracker.track(id);

        tracing::debug!(
            connection_id = %id,
            peer_addr = %peer_addr,
            active = self.tracker.active_count(),
            "Connection accepted"
        );

        Ok(Connection::new(id, peer_addr, stream, guard))
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, io::Error> {
        self.inner.local_addr()
    }

    /// Handle to the live connection counter.
    pub fn tracker(&self) -> ConnectionTracker {
        self.tracker.clone()
    }
}
