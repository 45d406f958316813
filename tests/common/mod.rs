//! Shared utilities for integration tests.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

use bench_backend::http::CannedResponse;
use bench_backend::net::ConnectionTracker;
use bench_backend::{server, Listener, ServerConfig, Variant};

/// Upper bound for any single network wait in a test.
pub const WAIT: Duration = Duration::from_secs(5);

/// Start `variant` on an ephemeral loopback port.
pub async fn start_server(variant: Variant) -> (SocketAddr, ConnectionTracker) {
    let config = ServerConfig {
        bind_host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        ..ServerConfig::for_port(0)
    };
    let listener = Listener::bind(&config).unwrap();
    let addr = listener.local_addr().unwrap();
    let tracker = listener.tracker();

    tokio::spawn(server::serve(variant, listener, config));
    (addr, tracker)
}

/// Read exactly one keep-open response.
#[allow(dead_code)]
pub async fn read_keep_open_response(stream: &mut TcpStream) -> Vec<u8> {
    let mut buf = vec![0; CannedResponse::KeepOpen.as_bytes().len()];
    tokio::time::timeout(WAIT, stream.read_exact(&mut buf))
        .await
        .expect("timed out waiting for response")
        .expect("read failed");
    buf
}

/// Read until the server closes the connection.
#[allow(dead_code)]
pub async fn read_until_closed(stream: &mut TcpStream) -> Vec<u8> {
    let mut buf = Vec::new();
    tokio::time::timeout(WAIT, stream.read_to_end(&mut buf))
        .await
        .expect("timed out waiting for close")
        .expect("read failed");
    buf
}

/// Poll until the tracker reports no live connections.
#[allow(dead_code)]
pub async fn wait_for_idle(tracker: &ConnectionTracker) {
    tokio::time::timeout(WAIT, async {
        while tracker.active_count() > 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("connections were not released");
}
