//! Error types for the benchmark harness.

use machgrover::GroverError;
use thiserror::Error;

/// Errors raised while configuring or running a benchmark.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BenchError {
    /// Circuit construction failed.
    #[error("Circuit construction failed: {0}")]
    Grover(#[from] GroverError),

    /// A configuration or report file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed YAML.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// The configuration parsed but is not usable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for benchmark operations.
pub type BenchResult<T> = Result<T, BenchError>;
