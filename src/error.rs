//! Error types for klogstat
//!
//! Classification itself never fails: every line lands in some tally
//! bucket. Errors only come from the edges (opening input, compiling the
//! line patterns, bad configuration, rendering a report).

use thiserror::Error;

/// Result type alias using KlogError
pub type Result<T> = std::result::Result<T, KlogError>;

/// Unified error type for klogstat operations
#[derive(Debug, Error)]
pub enum KlogError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Grammar Errors
    // -------------------------------------------------------------------------
    #[error("Line pattern failed to compile: {0}")]
    Pattern(#[from] regex::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Report Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
