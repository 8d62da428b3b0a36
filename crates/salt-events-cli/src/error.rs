//! CLI error type.

use salt_events_core::DecodeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("line {line}: invalid envelope: {source}")]
    InvalidEnvelope {
        line: u64,
        source: serde_json::Error,
    },
    #[error("line {line}: {source}")]
    Decode { line: u64, source: DecodeError },
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}
