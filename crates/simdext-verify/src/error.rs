//! Error types for the verification crate.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for verification operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during verification.
#[derive(Debug, Error)]
pub enum Error {
    /// Capability name not recognised on this target.
    #[error("unknown SIMD capability: {0}")]
    UnknownCapability(String),

    /// Kernel precondition failure.
    #[error("kernel error: {0}")]
    Kernel(#[from] simdext_kernels::Error),

    /// Configuration rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file not found.
    #[error("config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// One or more kernels disagreed with their reference.
    #[error("verification failed: {failed} of {total} cases")]
    Failed { failed: usize, total: usize },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
