//! Just enough HTTP to benchmark with.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → request.rs (chunked reads, end-of-headers framing)
//!     → [request bytes discarded]
//!     → response.rs (fixed canned bytes)
//!     → Send to client
//! ```

pub mod request;
pub mod response;

pub use request::{find_end_of_headers, RequestBuffer, END_OF_HEADERS};
pub use response::{CannedResponse, BODY};
