//! Configuration validation.
//!
//! # Responsibilities
//! - Reject values that would make the listener or read loop misbehave
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: &ServerConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::ServerConfig;

/// A single semantic problem with a [`ServerConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("backlog must be greater than zero")]
    ZeroBacklog,
    #[error("read_chunk must be greater than zero")]
    ZeroReadChunk,
    #[error("max_request_bytes ({max}) must be at least read_chunk ({chunk})")]
    RequestCapBelowChunk { max: usize, chunk: usize },
}

/// Check a configuration before it is handed to the listener.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.backlog == 0 {
        errors.push(ValidationError::ZeroBacklog);
    }
    if config.read_chunk == 0 {
        errors.push(ValidationError::ZeroReadChunk);
    }
    if config.max_request_bytes < config.read_chunk {
        errors.push(ValidationError::RequestCapBelowChunk {
            max: config.max_request_bytes,
            chunk: config.read_chunk,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
