//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command line (port)
//!     → cli.rs (parse, exit 255 on failure)
//!     → schema.rs (ServerConfig::for_port, fixed defaults)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → handed to Listener::bind and the accept loops
//! ```
//!
//! # Design Decisions
//! - No config file: the only knob on the command line is the port
//! - All other fields have fixed defaults matching the benchmark contract
//! - Log verbosity comes from `RUST_LOG`, not from this struct

pub mod schema;
pub mod validation;

pub use schema::ServerConfig;
pub use validation::ValidationError;
