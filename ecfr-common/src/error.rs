//! Common error types for the eCFR service

use thiserror::Error;

/// Common result type for load and configuration operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading the corpus or resolving configuration.
///
/// These only occur before the canonical table is published; once the
/// service is serving, engines report through [`CoreError`] instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input (wraps csv::Error)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON Lines input
    #[error("JSON error on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input table shape
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Errors reported by the query, aggregation and checksum engines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A column the operation depends on was absent from the input table
    #[error("No '{0}' column in dataset.")]
    MissingColumn(&'static str),
}

/// Result type for engine operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
