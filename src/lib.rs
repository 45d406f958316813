//! Canned-response TCP backends for router throughput benchmarks.
//!
//! Two servers share this library:
//! - `bench-simple` handles one connection at a time and closes it after
//!   the response.
//! - `bench-threads` runs one task per connection and answers every
//!   request on it until the peer disconnects.
//!
//! Neither parses HTTP. A request is whatever precedes `\r\n\r\n`, and the
//! reply is always the same 200 with a 14-byte body.

pub mod cli;
pub mod config;
pub mod http;
pub mod net;
pub mod observability;
pub mod server;

pub use config::ServerConfig;
pub use net::{Listener, ListenerError};
pub use server::Variant;

/// Bind the configured port and run `variant`'s accept loop forever.
///
/// Returns only if the listening socket cannot be set up.
pub async fn run(variant: Variant, config: ServerConfig) -> Result<(), ListenerError> {
    tracing::info!(
        variant = variant.name(),
        port = config.port,
        backlog = config.backlog,
        "bench-backend v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let listener = match Listener::bind(&config) {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e);
        }
    };

    server::serve(variant, listener, config).await;
    Ok(())
}
