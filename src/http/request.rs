//! Request buffering and end-of-headers framing.
//!
//! # Responsibilities
//! - Read request bytes in fixed-size chunks into a growable buffer
//! - Bound total buffered bytes per request
//! - Split off complete requests at the `\r\n\r\n` marker
//!
//! # Design Decisions
//! - Request content is never parsed; only the marker matters
//! - A marker split across two reads is still found
//! - Marker search resumes where the previous search stopped

use bytes::{BufMut, Bytes, BytesMut};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::net::TcpStream;

use crate::config::ServerConfig;

/// End-of-headers marker.
pub const END_OF_HEADERS: &[u8] = b"\r\n\r\n";

/// Index just past the first end-of-headers marker in `buf`.
pub fn find_end_of_headers(buf: &[u8]) -> Option<usize> {
    buf.windows(END_OF_HEADERS.len())
        .position(|window| window == END_OF_HEADERS)
        .map(|start| start + END_OF_HEADERS.len())
}

/// Per-connection request buffer.
#[derive(Debug)]
pub struct RequestBuffer {
    buf: BytesMut,
    chunk: usize,
    max: usize,
    /// Prefix of `buf` already known not to contain a marker.
    scanned: usize,
}

impl RequestBuffer {
    pub fn new(chunk: usize, max: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(chunk),
            chunk,
            max,
            scanned: 0,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.read_chunk, config.max_request_bytes)
    }

    /// Buffered bytes not yet taken as a request.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// No more bytes may be buffered until a request is taken.
    pub fn is_full(&self) -> bool {
        self.buf.len() >= self.max
    }

    fn room(&self) -> usize {
        self.max.saturating_sub(self.buf.len()).min(self.chunk)
    }

    /// Await one read of at most one chunk. Returns bytes read; `0` means EOF
    /// or a full buffer.
    pub async fn read_from<R>(&mut self, reader: &mut R) -> io::Result<usize>
    where
        R: AsyncRead + Unpin,
    {
        let room = self.room();
        if room == 0 {
            return Ok(0);
        }
        self.buf.reserve(room);
        let mut limited = (&mut self.buf).limit(room);
        reader.read_buf(&mut limited).await
    }

    /// Pull in bytes the socket already has queued, without waiting.
    ///
    /// Stops at would-block, EOF, a complete request, or a full buffer.
    pub fn drain_ready(&mut self, stream: &TcpStream) -> io::Result<()> {
        while !self.is_full() && !self.has_request() {
            let room = self.room();
            self.buf.reserve(room);
            let mut limited = (&mut self.buf).limit(room);
            match stream.try_read_buf(&mut limited) {
                Ok(0) => break,
                Ok(_) => continue,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Whether a complete request is buffered.
    pub fn has_request(&mut self) -> bool {
        self.marker_end().is_some()
    }

    /// Split off the bytes up to and including the next marker.
    pub fn take_request(&mut self) -> Option<Bytes> {
        let end = self.marker_end()?;
        self.scanned = 0;
        Some(self.buf.split_to(end).freeze())
    }

    fn marker_end(&mut self) -> Option<usize> {
        // A marker may straddle the scanned boundary.
        let from = self.scanned.saturating_sub(END_OF_HEADERS.len() - 1);
        match find_end_of_headers(&self.buf[from..]) {
            Some(end) => Some(from + end),
            None => {
                self.scanned = self.buf.len();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[test]
    fn finds_marker() {
        assert_eq!(find_end_of_headers(b"GET / HTTP/1.1\r\n\r\n"), Some(18));
        assert_eq!(find_end_of_headers(b"\r\n\r\nrest"), Some(4));
        assert_eq!(find_end_of_headers(b"GET / HTTP/1.1\r\n"), None);
        assert_eq!(find_end_of_headers(b""), None);
    }

    #[tokio::test]
    async fn marker_split_across_reads() {
        let (mut client, mut server) = tokio::io::duplex(64);
        let mut buf = RequestBuffer::new(4096, 65536);

        client.write_all(b"GET / HTTP/1.1\r\n\r").await.unwrap();
        buf.read_from(&mut server).await.unwrap();
        assert!(!buf.has_request());

        client.write_all(b"\n").await.unwrap();
        buf.read_from(&mut server).await.unwrap();
        let request = buf.take_request().unwrap();
        assert_eq!(&request[..], b"GET / HTTP/1.1\r\n\r\n");
        assert!(buf.is_empty());
    }

    #[tokio::test]
    async fn pipelined_requests_are_taken_one_at_a_time() {
        let (mut client, mut server) = tokio::io::duplex(1024);
        let mut buf = RequestBuffer::new(4096, 65536);

        client.write_all(b"A\r\n\r\nB\r\n\r\nC").await.unwrap();
        buf.read_from(&mut server).await.unwrap();

        assert_eq!(&buf.take_request().unwrap()[..], b"A\r\n\r\n");
        assert_eq!(&buf.take_request().unwrap()[..], b"B\r\n\r\n");
        assert!(buf.take_request().is_none());
        assert_eq!(buf.len(), 1);
    }

    #[tokio::test]
    async fn reads_are_chunked_and_capped() {
        let (mut client, mut server) = tokio::io::duplex(64 * 1024);
        let mut buf = RequestBuffer::new(8, 20);

        client.write_all(&[b'x'; 64]).await.unwrap();
        assert_eq!(buf.read_from(&mut server).await.unwrap(), 8);
        assert_eq!(buf.read_from(&mut server).await.unwrap(), 8);
        assert_eq!(buf.read_from(&mut server).await.unwrap(), 4);
        assert!(buf.is_full());
        assert_eq!(buf.read_from(&mut server).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn eof_reads_zero() {
        let (client, mut server) = tokio::io::duplex(64);
        drop(client);
        let mut buf = RequestBuffer::new(4096, 65536);
        assert_eq!(buf.read_from(&mut server).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn drain_ready_collects_queued_bytes() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mut client = TcpStream::connect(listener.local_addr().unwrap()).await.unwrap();
        let (mut server, _) = listener.accept().await.unwrap();

        client.write_all(&[b'x'; 10_000]).await.unwrap();
        client.write_all(b"\r\n\r\n").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        let mut buf = RequestBuffer::new(4096, 65536);
        assert_eq!(buf.read_from(&mut server).await.unwrap(), 4096);
        buf.drain_ready(&server).unwrap();
        assert_eq!(buf.take_request().unwrap().len(), 10_004);
    }

    #[tokio::test]
    async fn drain_ready_stops_when_nothing_queued() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let _client = TcpStream::connect(listener.local_addr().unwrap()).await.unwrap();
        let (server, _) = listener.accept().await.unwrap();

        let mut buf = RequestBuffer::new(4096, 65536);
        buf.drain_ready(&server).unwrap();
        assert!(buf.is_empty());
    }
}
