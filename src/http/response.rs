//! The canned benchmark response.
//!
//! # Responsibilities
//! - Hold the fixed response bytes for both server variants
//! - Write them to a connection in a single call
//!
//! # Design Decisions
//! - Bytes are assembled at compile time; nothing is formatted per request
//! - `Date` is a fixed literal, not the current time
//! - `Server-Status: OK` is what a router's health probe looks for

use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Response body. `Content-Length` below must match its length.
pub const BODY: &str = "Hello from C!\n";

macro_rules! canned_response {
    ($($extra:literal)?) => {
        concat!(
            "HTTP/1.1 200 OK\r\n",
            "Content-Type: text/plain; charset=UTF-8\r\n",
            "Content-Length: 14\r\n",
            $($extra,)?
            "Date: Thu, 1 Jan 1970 00:00:00 GMT\r\n",
            "Server-Status: OK\r\n",
            "\r\n",
            "Hello from C!\n",
        )
    };
}

const CLOSE: &str = canned_response!("Connection: close\r\n");
const KEEP_OPEN: &str = canned_response!();

/// Which flavour of the canned response to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CannedResponse {
    /// Carries `Connection: close`; the server closes after writing it.
    Close,
    /// No `Connection` header; the server keeps reading afterwards.
    KeepOpen,
}

impl CannedResponse {
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            CannedResponse::Close => CLOSE.as_bytes(),
            CannedResponse::KeepOpen => KEEP_OPEN.as_bytes(),
        }
    }

    /// Write the whole response and flush.
    pub async fn write_to<W>(self, writer: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        writer.write_all(self.as_bytes()).await?;
        writer.flush().await
    }
}
