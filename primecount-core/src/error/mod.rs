//! Core error types for primecount
//!
//! The arithmetic kernel and the claim loop never fail; errors only come
//! from the edges (configuration files, thread-pool construction).

use thiserror::Error;

/// Main error type for primecount operations
#[derive(Error, Debug)]
pub enum PrimecountError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

/// Result type alias for primecount operations
pub type PrimecountResult<T> = Result<T, PrimecountError>;
