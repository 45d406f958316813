//! Connection handle, state machine, and lifecycle tracking.
//!
//! # Responsibilities
//! - Pair each accepted socket with its sequential connection ID
//! - Track per-connection state (Open → Responded → … → Closed)
//! - Count live connections so tests and logs can observe reclamation

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::TcpStream;

/// Sequential identifier for an accepted connection.
///
/// Assigned by the accept loop in accept order, starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn new(n: u64) -> Self {
        Self(n)
    }

    /// Get the raw ID value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Connection state as seen by a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Waiting for (more) request bytes.
    Open,
    /// A response was just written; the handler loops back to `Open`.
    Responded,
    /// Peer closed, a read/write failed, or the handler finished.
    Closed,
}

impl ConnectionState {
    /// Apply one event to the state machine.
    ///
    /// `Closed` is terminal: every event leaves it unchanged.
    pub fn on(self, event: ConnectionEvent) -> Self {
        match (self, event) {
            (ConnectionState::Closed, _) => ConnectionState::Closed,
            (_, ConnectionEvent::Responded) => ConnectionState::Responded,
            (_, ConnectionEvent::ReadMore) => ConnectionState::Open,
            (_, ConnectionEvent::Closed) => ConnectionState::Closed,
        }
    }
}

/// Things that happen to a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// The fixed response was written.
    Responded,
    /// The handler goes back to reading.
    ReadMore,
    /// EOF, read/write failure, or handler exit.
    Closed,
}

/// An accepted connection handed from the accept loop to a handler.
///
/// Owns the socket; dropping the handle closes it.
#[derive(Debug)]
pub struct Connection {
    pub id: ConnectionId,
    pub peer_addr: SocketAddr,
    pub stream: TcpStream,
    state: ConnectionState,
    _guard: ConnectionGuard,
}

impl Connection {
    pub fn new(
        id: ConnectionId,
        peer_addr: SocketAddr,
        stream: TcpStream,
        guard: ConnectionGuard,
    ) -> Self {
        Self {
            id,
            peer_addr,
            stream,
            state: ConnectionState::Open,
            _guard: guard,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Advance the state machine and log the transition.
    pub fn transition(&mut self, event: ConnectionEvent) {
        let next = self.state.on(event);
        tracing::trace!(
            connection_id = %self.id,
            from = ?self.state,
            to = ?next,
            "Connection state change"
        );
        self.state = next;
    }
}

/// Counts connections whose handler has not yet finished.
#[derive(Debug, Clone, Default)]
pub struct ConnectionTracker {
    active_count: Arc<AtomicU64>,
}

impl ConnectionTracker {
    /// Create a new connection tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new live connection. Returns a guard that decrements on drop.
    pub fn track(&self, id: ConnectionId) -> ConnectionGuard {
        self.active_count.fetch_add(1, Ordering::SeqCst);
        ConnectionGuard {
            active_count: Arc::clone(&self.active_count),
            id,
        }
    }

    /// Get current live connection count.
    pub fn active_count(&self) -> u64 {
        self.active_count.load(Ordering::SeqCst)
    }
}

/// Guard that tracks a connection's lifetime.
/// Decrements the live count when dropped, including on handler panic.
#[derive(Debug)]
pub struct ConnectionGuard {
    active_count: Arc<AtomicU64>,
    id: ConnectionId,
}

impl ConnectionGuard {
    /// Get this connection's ID.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.active_count.fetch_sub(1, Ordering::SeqCst);
        tracing::trace!(connection_id = %self.id, "Connection released");
    }
}
