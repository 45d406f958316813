//! Configuration schema definitions.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Pending-connection queue length passed to `listen(2)`.
pub const DEFAULT_BACKLOG: u32 = 128;

/// Size of a single socket read.
pub const DEFAULT_READ_CHUNK: usize = 4096;

/// Upper bound on bytes buffered for one request before the end-of-headers marker.
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 64 * 1024;

/// Settings shared by both server variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind (wildcard by default).
    pub bind_host: IpAddr,

    /// TCP port. `0` asks the OS for an ephemeral port.
    pub port: u16,

    /// Listen backlog.
    pub backlog: u32,

    /// Bytes requested per read call.
    pub read_chunk: usize,

    /// Maximum buffered request bytes.
    pub max_request_bytes: usize,
}

impl ServerConfig {
    /// Default settings listening on `port`.
    pub fn for_port(port: u16) -> Self {
        Self {
            port,
            ..Self::default()
        }
    }

    /// Socket address the listener binds to.
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.bind_host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            backlog: DEFAULT_BACKLOG,
            read_chunk: DEFAULT_READ_CHUNK,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
        }
    }
}
