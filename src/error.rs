//! Error types for the librillo core
//!
//! The error surface is deliberately small: errors only occur at the dataset
//! boundary when an inbound payload cannot be decoded. Mutations on absent
//! ids inside the core are silent no-ops and out-of-range inputs clamp, so
//! neither produces an error.

use thiserror::Error;

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Payload error: {0}")]
    Payload(#[from] serde_json::Error),
}
