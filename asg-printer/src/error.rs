//! Error types for the printer library

use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// Spooler query failed or the spooler is unreachable
    #[error("Printer discovery failed: {0}")]
    Discovery(String),

    /// Spooler answered but no device matched the marker
    #[error("No printer matching '{0}' found")]
    NoPrinterFound(String),

    /// Raw print invocation failed
    #[error("Print dispatch failed: {0}")]
    Dispatch(String),

    /// Every QR dialect rejected the payload
    #[error("QR encoding failed for every dialect: {0}")]
    EncodingFallbackExhausted(String),

    /// IO error while handling the spool file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid printer configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
