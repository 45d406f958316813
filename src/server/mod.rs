//! Accept loops for the two benchmark variants.
//!
//! # Data Flow
//! ```text
//! Listener::accept
//!     → blocking.rs   (handle inline: read, respond, close; next accept)
//!     → concurrent.rs (spawn a task per connection; respond per request)
//! ```
//!
//! # Design Decisions
//! - Neither loop returns; the process runs until killed
//! - Accept errors are logged and the loop keeps going
//! - Per-connection I/O errors end only that connection

pub mod blocking;
pub mod concurrent;

pub use blocking::BlockingServer;
pub use concurrent::ConcurrentServer;

use crate::config::ServerConfig;
use crate::net::Listener;

/// Which accept loop to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// One connection at a time, closed after the response.
    Blocking,
    /// One task per connection, kept open until the peer closes.
    Concurrent,
}

impl Variant {
    pub fn name(self) -> &'static str {
        match self {
            Variant::Blocking => "simple",
            Variant::Concurrent => "threads",
        }
    }
}

/// Run the accept loop for `variant` on an already bound listener.
pub async fn serve(variant: Variant, listener: Listener, config: ServerConfig) {
    match variant {
        Variant::Blocking => BlockingServer::new(config).run(listener).await,
        Variant::Concurrent => ConcurrentServer::new(config).run(listener).await,
    }
}
