//! Observability subsystem.
//!
//! Logging only: both servers emit structured `tracing` events to stderr.
//! Per-connection events sit at `debug`/`trace` so they are free during a
//! benchmark run unless `RUST_LOG` asks for them.

pub mod logging;

pub use logging::init;
