//! # Error Types
//!
//! Error types used throughout the rasid library.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::spooler::SessionState;

/// Main error type for rasid operations
#[derive(Debug, Error)]
pub enum RasidError {
    /// Invoice could not be encoded. Encoding is total over decoded
    /// invoices, so this is only produced by upstream validation.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The printer target could not be resolved or opened
    #[error("Printer '{target}' unavailable: {source}")]
    ResourceUnavailable {
        target: String,
        #[source]
        source: io::Error,
    },

    /// The spooler refused to start a document or page on an open handle
    #[error("Spooler refused {stage}: {source}")]
    Spooler {
        stage: &'static str,
        #[source]
        source: io::Error,
    },

    /// A session method was called out of lifecycle order
    #[error("Protocol violation: {operation} is not allowed while {state}")]
    ProtocolViolation {
        operation: &'static str,
        state: SessionState,
    },

    /// The raw write was rejected or only partially accepted
    #[error("Write failed: {written} of {expected} bytes accepted")]
    WriteFailed {
        written: usize,
        expected: usize,
        source: Option<io::Error>,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Command buffer could not be persisted
    #[error("Failed to write {}: {source}", .path.display())]
    Artifact {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON decoding error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for rasid operations
pub type Result<T, E = RasidError> = std::result::Result<T, E>;
