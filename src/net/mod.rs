//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (backlog 128, sequential connection IDs)
//!     → connection.rs (handle, state machine, live-count guard)
//!     → Hand off to a server variant
//!
//! Connection States:
//!     Open → Responded → Open → … → Closed
//! ```

pub mod connection;
pub mod listener;

pub use connection::{Connection, ConnectionEvent, ConnectionId, ConnectionState, ConnectionTracker};
pub use listener::{Listener, ListenerError};
