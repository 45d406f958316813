//! Process-level tests: argument handling and exit codes.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

const BINARIES: [&str; 2] = [
    env!("CARGO_BIN_EXE_bench-simple"),
    env!("CARGO_BIN_EXE_bench-threads"),
];

fn exit_code(binary: &str, args: &[&str]) -> Option<i32> {
    Command::new(binary)
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .unwrap()
        .code()
}

/// Kills the server process when the test ends.
struct ServerProcess(Child);

impl Drop for ServerProcess {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

fn connect_with_retry(port: u16) -> TcpStream {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        match TcpStream::connect(("127.0.0.1", port)) {
            Ok(stream) => return stream,
            Err(e) if Instant::now() > deadline => panic!("server never came up: {e}"),
            Err(_) => std::thread::sleep(Duration::from_millis(20)),
        }
    }
}

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[test]
fn missing_port_exits_255() {
    for binary in BINARIES {
        assert_eq!(exit_code(binary, &[]), Some(255), "{binary}");
    }
}

#[test]
fn non_numeric_port_exits_255() {
    for binary in BINARIES {
        assert_eq!(exit_code(binary, &["http"]), Some(255), "{binary}");
        assert_eq!(exit_code(binary, &["70000"]), Some(255), "{binary}");
    }
}

#[test]
fn help_exits_zero() {
    assert_eq!(exit_code(BINARIES[0], &["--help"]), Some(0));
}

#[test]
fn occupied_port_aborts_startup() {
    let occupied = TcpListener::bind("0.0.0.0:0").unwrap();
    let port = occupied.local_addr().unwrap().port().to_string();

    for binary in BINARIES {
        assert_eq!(exit_code(binary, &[&port]), Some(1), "{binary}");
    }
}

#[test]
fn serves_on_requested_port() {
    for binary in BINARIES {
        let port = free_port();
        let _server = ServerProcess(
            Command::new(binary)
                .arg(port.to_string())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .unwrap(),
        );

        let mut stream = connect_with_retry(port);
        stream
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        stream.write_all(b"GET / HTTP/1.1\r\n\r\n").unwrap();

        let mut response = Vec::new();
        let mut buf = [0u8; 512];
        while !response.ends_with(b"Hello from C!\n") {
            let n = stream.read(&mut buf).unwrap();
            assert_ne!(n, 0, "{binary} closed before the body");
            response.extend_from_slice(&buf[..n]);
        }
        assert!(response.starts_with(b"HTTP/1.1 200 OK\r\n"), "{binary}");
    }
}
